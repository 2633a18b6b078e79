/*!
Techniques of simplification, and the driver which runs the techniques.

Each technique is a method on a [simplifier](crate::context::GenericSimplifier) which returns true if the technique changed the formula.

The driver, [preprocess](crate::context::GenericSimplifier::preprocess), runs techniques in one of two ways:
- If a [schedule](crate::config::schedule) is configured, each line of the schedule is run in order, and a repeating line is run until no technique of the line reports a change.
- Otherwise, a fixed loop runs the enabled techniques in rounds, returning to the start of a round whenever a technique reports a change, and ending when a round passes without change.

Either way, simplification ends early on an unsatisfiable formula, an interrupt, or at the time limit.
Simplification which ends early is still valid, and reconstruction works from any point.

```rust
# use otter_simp::context::{Simplifier, Solution};
# use otter_simp::config::Config;
# use otter_simp::structures::literal::Lit;
let mut config = Config::default();
config.techniques = Some("u[psv]+".to_string());
let mut simplifier = Simplifier::from_config(config);

for clause in [[1, 2], [-1, 2], [1, -2], [-1, -2]] {
    let clause: Vec<Lit> = clause.iter().map(|i| Lit::from_dimacs(*i)).collect();
    simplifier.add_clause(clause).unwrap();
}

assert_eq!(simplifier.preprocess(), Ok(Solution::Unsatisfiable));
```
*/

pub mod bce;
pub mod bve;
pub mod compression;
pub mod equivalence;
pub mod hte;
pub mod maintenance;
pub mod probing;
pub mod propagation;
pub mod pure;
pub mod subsumption;
pub mod unhiding;
pub mod vivification;

use std::time::Instant;

use crate::{
    config::{schedule::Schedule, Technique},
    context::{GenericSimplifier, Solution},
    misc::log::targets::{self},
    structures::literal::Lit,
    types::err::{self},
};

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Simplifies the formula, returning what is known about the satisfiability of the formula.
    ///
    /// An error is returned only for a malformed schedule.
    pub fn preprocess(&mut self) -> Result<Solution, err::ErrorKind> {
        let start = Instant::now();
        self.deadline = self.config.time_limit.map(|limit| start + limit);
        let schedule = self.config.schedule()?;

        let too_large = self.var_count > self.config.variable_limit.value
            || self.clause_db.live_count() > self.config.clause_limit.value;
        if too_large && !self.config.unlimited.value {
            log::info!(target: targets::PREPROCESSING,
                "Skipping simplification of {} variables and {} clauses",
                self.var_count,
                self.clause_db.live_count()
            );
            self.propagate();
            return Ok(self.solution);
        }

        match schedule {
            Some(schedule) => self.run_schedule(&schedule),
            None => self.run_fixpoint(),
        }

        self.propagate();
        self.collect_garbage();

        if !self.is_unsatisfiable() && self.config.compress.value {
            self.compress();
        }

        if self.config.fast_sat.value && !self.is_unsatisfiable() && self.clause_db.live_count() == 0 {
            self.settle_free_roots();
            self.solution = Solution::Satisfiable;
        }

        self.counters.time += start.elapsed();
        log::info!(target: targets::PREPROCESSING,
            "{} after {} rounds: {} clauses, {} units, {} eliminated, {} equivalences",
            self.solution,
            self.counters.rounds,
            self.clause_db.live_count(),
            self.counters.units,
            self.counters.eliminated_variables,
            self.counters.equivalences
        );
        Ok(self.solution)
    }

    /// Runs `technique`, if the technique is switched on and the formula is not known to be unsatisfiable.
    ///
    /// Returns true if the technique reported a change.
    pub fn run_technique(&mut self, technique: Technique) -> bool {
        if self.is_unsatisfiable() || !self.config.enabled(technique) {
            return false;
        }
        log::debug!(target: targets::PREPROCESSING, "Running {technique}");
        let change = match technique {
            Technique::Propagation => self.propagate(),
            Technique::Pure => self.pure_literals(),
            Technique::Subsumption => self.subsume(),
            Technique::Bve => self.eliminate_variables(),
            Technique::Equivalence => self.equivalence_elimination(),
            Technique::Hte => self.hidden_tautology_elimination(),
            Technique::Bce => self.blocked_clause_elimination(),
            Technique::Probing => self.probing(),
            Technique::Vivification => self.vivification(),
            Technique::Unhiding => self.unhiding(),
        };
        self.collect_garbage();
        change
    }

    /// The fixed loop of techniques.
    fn run_fixpoint(&mut self) {
        let mut first = true;
        while !self.is_unsatisfiable() && !self.interrupted() {
            self.counters.rounds += 1;
            let restart = self.fixpoint_round(first);
            first = false;
            if !restart {
                break;
            }
        }
    }

    /// A round of the fixed loop, returning true if the round should be started again.
    fn fixpoint_round(&mut self, first: bool) -> bool {
        let ee_behind_bve = self.config.ee_behind_bve.value;

        self.run_technique(Technique::Propagation);

        if self.run_technique(Technique::Pure) || self.run_technique(Technique::Subsumption) {
            return true;
        }
        if !ee_behind_bve && self.run_technique(Technique::Equivalence) {
            return true;
        }
        if first && self.run_technique(Technique::Unhiding) {
            return true;
        }

        if self.out_of_time() {
            log::info!(target: targets::PREPROCESSING, "Out of time");
            return false;
        }

        if self.run_technique(Technique::Hte) {
            return true;
        }

        // Changes from BCE and BVE restart the round after the next technique.
        let mut change = self.run_technique(Technique::Bce);
        change = self.run_technique(Technique::Bve) || change;

        if ee_behind_bve {
            change = self.run_technique(Technique::Equivalence) || change;
        }
        if !first {
            change = self.run_technique(Technique::Unhiding) || change;
        }
        if change {
            return true;
        }

        self.run_technique(Technique::Probing) || self.run_technique(Technique::Vivification)
    }

    /// Runs each line of `schedule` in turn.
    fn run_schedule(&mut self, schedule: &Schedule) {
        log::info!(target: targets::PREPROCESSING, "Schedule {schedule}");
        for line in &schedule.lines {
            loop {
                if self.is_unsatisfiable() || self.interrupted() {
                    return;
                }
                self.counters.rounds += 1;
                let mut change = false;
                for technique in &line.techniques {
                    change = self.run_technique(*technique) || change;
                }
                if !line.repeat || !change {
                    break;
                }
            }
        }
    }

    /// True if the interrupt flag is set, or the time limit has passed.
    fn interrupted(&self) -> bool {
        let interrupted = self.out_of_time();
        if interrupted {
            log::info!(target: targets::PREPROCESSING, "Interrupted");
        }
        interrupted
    }

    /// Fixes every free representative, to the preferred polarity of a label or to false.
    fn settle_free_roots(&mut self) {
        for var in 1..=self.var_count {
            let root = self.equivalent_to.get(var as usize).is_some_and(|l| l.var() == var);
            if root && !self.is_eliminated(var) && self.assignment.is_undef(var) {
                let preferred = self.label_weight.get(&var).is_some_and(|weight| *weight > 0);
                self.assignment.set(Lit::new(var, preferred));
            }
        }
    }
}

#[cfg(test)]
mod driver_tests {
    use crate::{
        config::Config,
        context::{Simplifier, Solution},
        structures::literal::Lit,
    };

    fn lits(ints: &[i64]) -> Vec<Lit> {
        ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
    }

    #[test]
    fn empty_formula_satisfiable() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2])).unwrap();
        simplifier.add_clause(lits(&[-1, 2])).unwrap();

        assert_eq!(simplifier.preprocess(), Ok(Solution::Satisfiable));
        assert_eq!(simplifier.clauses().count(), 0);
    }

    #[test]
    fn without_fast_sat() {
        let mut config = Config::default();
        config.fast_sat.value = false;
        let mut simplifier = Simplifier::from_config(config);
        simplifier.add_clause(lits(&[1, 2])).unwrap();

        assert_eq!(simplifier.preprocess(), Ok(Solution::Unknown));
    }

    #[test]
    fn interrupted_before_start() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2, 3])).unwrap();
        simplifier.add_clause(lits(&[1, 2])).unwrap();
        simplifier
            .interrupt_handle()
            .store(true, std::sync::atomic::Ordering::Relaxed);

        assert_eq!(simplifier.preprocess(), Ok(Solution::Unknown));
        assert_eq!(simplifier.clauses().count(), 2);
    }

    #[test]
    fn malformed_schedule() {
        let mut config = Config::default();
        config.techniques = Some("[u".to_string());
        let mut simplifier = Simplifier::from_config(config);

        assert!(simplifier.preprocess().is_err());
    }

    #[test]
    fn size_limit() {
        let mut config = Config::default();
        config.variable_limit.value = 1;
        let mut simplifier = Simplifier::from_config(config);
        simplifier.add_clause(lits(&[1, 2, 3])).unwrap();
        simplifier.add_clause(lits(&[1, 2])).unwrap();

        assert_eq!(simplifier.preprocess(), Ok(Solution::Unknown));
        assert_eq!(simplifier.clauses().count(), 2);
    }
}
