/*!
Bounded variable elimination.

A variable is eliminated by replacing the clauses containing the variable with all (non-tautological) resolvents of those clauses on the variable.
As this may grow the formula, the elimination is rejected if the resolvents are larger than the clauses they replace, where larger is given by [bve_shrink](crate::config::Config::bve_shrink).

If the clauses of the variable contain a [gate](gates) only resolvents with some gate clause are made.

The clauses of an eliminated variable are pushed to the [stack](crate::reconstruction::stack) so reconstruction can give the variable a value.
Learnt clauses of the variable are not pushed, and are removed with the other clauses of the variable.

With [bve_otfss](crate::config::Config::bve_otfss) a resolvent one literal shorter than an antecedent is used to strengthen the antecedent whenever the elimination is rejected.
*/

mod gates;

use crate::{
    context::GenericSimplifier,
    db::ClauseRef,
    misc::log::targets::{self},
    reconstruction::stack::StackEntry,
    structures::{
        clause::{CClause, Clause},
        literal::Lit,
        variable::Var,
    },
};

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Eliminates variables, taking candidates in order of occurrence.
    ///
    /// Returns true if some variable was eliminated.
    pub fn eliminate_variables(&mut self) -> bool {
        let before = self.counters.eliminated_variables;
        let resolvents_before = self.counters.resolvents;

        while let Some(var) = self.bve_heap.pop_min() {
            if self.is_unsatisfiable() || self.budgets.bve.exhausted() || self.out_of_time() {
                break;
            }
            self.eliminate_variable(var as Var, false);
        }

        let eliminated = self.counters.eliminated_variables - before;
        if eliminated > 0 {
            log::info!(target: targets::BVE,
                "Eliminated {eliminated} variables with {} resolvents",
                self.counters.resolvents - resolvents_before
            );
        }
        eliminated > 0
    }

    /// Eliminates `var`, unless the resolvents would be larger than the clauses of `var`.
    /// If `force` is set the variable is eliminated regardless of the size of the resolvents.
    ///
    /// A variable which is fixed, frozen, eliminated, or replaced is not eliminated.
    ///
    /// Returns true if the variable was eliminated.
    pub fn eliminate_variable(&mut self, var: Var, force: bool) -> bool {
        if var == 0 || var > self.var_count || !self.is_active(var) {
            return false;
        }

        let pos = Lit::new(var, true);
        let neg = pos.negate();
        let positive = self.irredundant(pos);
        let negative = self.irredundant(neg);

        let clause_count = positive.len() + negative.len();
        let literal_count: usize = positive
            .iter()
            .chain(&negative)
            .map(|key| self.clause_db[*key].size())
            .sum();

        let gate = match positive.is_empty() || negative.is_empty() {
            true => None,
            false => self.find_gate(var, &positive, &negative),
        };

        let mut resolvents: Vec<CClause> = Vec::default();
        let mut resolvent_literals = 0;
        let mut strengthenings: Vec<(ClauseRef, Lit)> = Vec::default();
        let mut rejected = false;

        'resolution: for p in &positive {
            for n in &negative {
                if let Some(gate) = &gate {
                    if !gate.contains(p) && !gate.contains(n) {
                        continue;
                    }
                }
                let Some(resolvent) = self.resolve(var, *p, *n) else {
                    continue;
                };

                if self.config.bve_otfss.value {
                    if resolvent.len() + 1 == self.clause_db[*p].size() {
                        strengthenings.push((*p, pos));
                    }
                    if resolvent.len() + 1 == self.clause_db[*n].size() {
                        strengthenings.push((*n, neg));
                    }
                }

                resolvent_literals += resolvent.len();
                resolvents.push(resolvent);

                if !force && self.too_large(resolvents.len(), resolvent_literals, clause_count, literal_count) {
                    rejected = true;
                    break 'resolution;
                }
            }
        }

        if rejected {
            for (key, literal) in strengthenings {
                log::trace!(target: targets::BVE, "Strengthening with a resolvent on {var}");
                self.strengthen(key, literal);
                if self.is_unsatisfiable() {
                    break;
                }
            }
            return false;
        }

        log::trace!(target: targets::BVE, "Eliminating {var} with {} resolvents", resolvents.len());

        let clauses: Vec<CClause> = positive
            .iter()
            .chain(&negative)
            .map(|key| self.clause_db[*key].literals().to_vec())
            .collect();
        self.stack.push(StackEntry::Eliminated { var, clauses });
        self.eliminated[var as usize] = true;
        self.counters.eliminated_variables += 1;

        let mut removed = self.occurrences.list(pos).to_vec();
        removed.extend_from_slice(self.occurrences.list(neg));
        for key in removed {
            self.remove_clause(key);
        }
        self.big.remove_variable(pos);

        self.counters.resolvents += resolvents.len();
        for resolvent in resolvents {
            if let Err(e) = self.add_normalized(resolvent, false) {
                log::error!(target: targets::BVE, "Failed to store a resolvent: {e:?}");
            }
            if self.is_unsatisfiable() {
                return true;
            }
        }

        self.subsume();
        self.propagate();
        true
    }

    /// The clauses containing `literal` which are not learnt.
    fn irredundant(&self, literal: Lit) -> Vec<ClauseRef> {
        self.occurrences
            .list(literal)
            .iter()
            .filter(|key| self.clause_db.is_live(**key) && !self.clause_db[**key].is_learnt())
            .copied()
            .collect()
    }

    fn too_large(
        &self,
        resolvents: usize,
        resolvent_literals: usize,
        clauses: usize,
        literals: usize,
    ) -> bool {
        match self.config.bve_shrink.value {
            0 => resolvents > clauses,
            1 => resolvent_literals > literals,
            _ => resolvents > clauses || resolvent_literals > literals,
        }
    }

    /// The resolvent of two clauses on `var`, sorted, or nothing if the resolvent is a tautology.
    pub(crate) fn resolve(&mut self, var: Var, a: ClauseRef, b: ClauseRef) -> Option<CClause> {
        let first = &self.clause_db[a];
        let second = &self.clause_db[b];
        self.budgets.bve.spend((first.size() + second.size()) as u64);

        self.marks.next_step();
        let mut resolvent = CClause::with_capacity(first.size() + second.size());
        for literal in first.literals().iter().filter(|l| l.var() != var) {
            self.marks.set(literal.index());
            resolvent.push(*literal);
        }
        for literal in second.literals().iter().filter(|l| l.var() != var) {
            if self.marks.is_marked(literal.negate().index()) {
                return None;
            }
            if !self.marks.is_marked(literal.index()) {
                resolvent.push(*literal);
            }
        }
        resolvent.sort_unstable();
        Some(resolvent)
    }
}

#[cfg(test)]
mod bve_tests {
    use crate::{
        config::Config,
        context::Simplifier,
        structures::{clause::Clause, literal::Lit},
    };

    fn lits(ints: &[i64]) -> Vec<Lit> {
        ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
    }

    fn formula(simplifier: &Simplifier) -> Vec<String> {
        let mut clauses: Vec<String> = simplifier.clauses().map(|c| c.as_dimacs(false)).collect();
        clauses.sort();
        clauses
    }

    #[test]
    fn resolvents_replace() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2, 3])).unwrap();
        simplifier.add_clause(lits(&[-1, 4, 5])).unwrap();

        assert!(simplifier.eliminate_variable(1, false));
        assert!(simplifier.is_eliminated(1));
        assert_eq!(formula(&simplifier), vec!["2 3 4 5"]);
        assert_eq!(simplifier.stack.len(), 1);
    }

    #[test]
    fn growth_rejected() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2])).unwrap();
        simplifier.add_clause(lits(&[1, 3])).unwrap();
        simplifier.add_clause(lits(&[-1, 4])).unwrap();
        simplifier.add_clause(lits(&[-1, 5])).unwrap();
        simplifier.add_clause(lits(&[-1, 6])).unwrap();
        simplifier.config.bve_gates.value = false;

        // Six resolvents replace five clauses.
        assert!(!simplifier.eliminate_variable(1, false));
        assert!(simplifier.eliminate_variable(1, true));
        assert_eq!(simplifier.clause_db.live_count(), 6);
    }

    #[test]
    fn and_gate_without_resolvents() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[3, 1])).unwrap();
        simplifier.add_clause(lits(&[3, 2])).unwrap();
        simplifier.add_clause(lits(&[-3, -1, -2])).unwrap();

        assert!(simplifier.eliminate_variable(3, false));
        assert_eq!(simplifier.clause_db.live_count(), 0);
    }

    #[test]
    fn ite_gate() {
        let mut config = Config::default();
        config.bve_ite_gates.value = true;
        let mut simplifier = Simplifier::from_config(config);
        // 1 ↔ ITE(2, 3, 4)
        simplifier.add_clause(lits(&[-1, -2, 3])).unwrap();
        simplifier.add_clause(lits(&[-1, 2, 4])).unwrap();
        simplifier.add_clause(lits(&[1, -2, -3])).unwrap();
        simplifier.add_clause(lits(&[1, 2, -4])).unwrap();
        simplifier.add_clause(lits(&[1, 5, 6])).unwrap();

        assert!(simplifier.eliminate_variable(1, false));
        assert_eq!(formula(&simplifier), vec!["-2 3 5 6", "2 4 5 6"]);
    }

    #[test]
    fn frozen_kept() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2])).unwrap();
        simplifier.freeze(1);
        assert!(!simplifier.eliminate_variable(1, false));
    }

    #[test]
    fn learnt_dropped() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2])).unwrap();
        simplifier.add_clause(lits(&[-1, 3])).unwrap();
        simplifier.add_learnt_clause(lits(&[1, 3, 4])).unwrap();

        assert!(simplifier.eliminate_variable(1, false));
        assert_eq!(formula(&simplifier), vec!["2 3"]);
    }
}
