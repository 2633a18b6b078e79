/*!
Failed literal probing.

Each candidate variable is probed by assuming each literal of the variable in turn and propagating, with binary clauses taken from the [implication graph](crate::db::big) and longer clauses through a (local) watched literal propagator.

- If assuming a literal gives a conflict, the conflict is analysed to a unit clause (the negation of the first unique implication point), and the unit is fixed.
- If both literals of a variable propagate without conflict, a literal implied by both is fixed, and a literal implied by one while the complement is implied by the other is equivalent to (the complement of) the variable.

# Lazy hyper-binary resolution
When a long clause propagates some literal `p` while each other literal of the clause was made false through binary clauses from the probed literal `d` (or is false at the root), the binary clause `[-d, p]` is implied.
The binary clause is added to the formula, and `p` is given the binary clause as a reason.

# Double look-ahead
After the probed literal propagates without conflict, a few literals of clauses shortened by the probe are assumed at a second level.
A conflict at the second level shows the first assumption implies the complement of the second, and the binary clause is kept.
Anything else found at the second level is forgotten.

Probing works on a copy of the long clauses, built at the start of each call, so the clause database is untouched until probing ends.
*/

use rand::seq::SliceRandom;

use crate::{
    context::{Budget, GenericSimplifier},
    misc::log::targets::{self},
    structures::{
        assignment::Assignment,
        clause::{CClause, Clause},
        literal::{literal_capacity, Lit},
        variable::Var,
    },
};

/// Why a literal was assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reason {
    /// Fixed at the root.
    Root,

    Decision,

    /// Implied by the literal through a binary clause.
    Binary(Lit),

    /// Implied through the long clause at the index.
    Long(usize),
}

/// A conflict, given by the clause with every literal false.
#[derive(Clone, Copy, Debug)]
enum Conflict {
    Binary(Lit, Lit),
    Long(usize),
}

/// A propagator over a copy of the formula.
struct ProbeEngine {
    values: Assignment,
    level: Vec<u32>,
    reason: Vec<Reason>,

    /// Whether the literal of each variable follows from the decision through binary clauses alone.
    binary_reach: Vec<bool>,

    trail: Vec<Lit>,
    head: usize,

    /// Root literals before this index are fixed in the formula.
    synced: usize,
    level_starts: Vec<usize>,

    implied: Vec<Vec<Lit>>,
    clauses: Vec<CClause>,
    watches: Vec<Vec<usize>>,

    /// Long clauses shortened at the first level, as candidates for double look-ahead.
    shortened: Vec<usize>,

    lhbr: bool,
    new_binaries: Vec<[Lit; 2]>,
    hyper_binaries: usize,
    double_binaries: usize,
    checks: u64,
}

impl ProbeEngine {
    fn level(&self) -> u32 {
        self.level_starts.len() as u32
    }

    fn assign(&mut self, literal: Lit, reason: Reason) {
        let var = literal.var() as usize;
        self.values.set(literal);
        self.level[var] = self.level();
        self.reason[var] = reason;
        self.binary_reach[var] = match reason {
            Reason::Decision => true,
            Reason::Binary(from) => self.binary_reach[from.var() as usize],
            Reason::Root | Reason::Long(_) => false,
        };
        self.trail.push(literal);
    }

    fn decide(&mut self, literal: Lit) {
        self.level_starts.push(self.trail.len());
        if self.level_starts.len() == 1 {
            self.shortened.clear();
        }
        self.assign(literal, Reason::Decision);
    }

    fn backtrack(&mut self, level: u32) {
        while self.level() > level {
            let Some(start) = self.level_starts.pop() else {
                break;
            };
            for literal in self.trail.drain(start..) {
                self.values.clear(literal.var());
            }
        }
        self.head = self.trail.len();
    }

    /// The literals assigned at the first level, without the decision.
    fn first_level_consequences(&self) -> &[Lit] {
        match self.level_starts.first() {
            Some(start) => &self.trail[start + 1..],
            None => &[],
        }
    }

    /// Records the implied binary clause `[a, b]`, which is also used in propagation from now.
    fn add_binary(&mut self, a: Lit, b: Lit) {
        self.implied[a.negate().index()].push(b);
        self.implied[b.negate().index()].push(a);
        self.new_binaries.push([a, b]);
    }

    fn propagate(&mut self) -> Option<Conflict> {
        while let Some(literal) = self.trail.get(self.head).copied() {
            self.head += 1;

            for index in 0..self.implied[literal.index()].len() {
                let implied = self.implied[literal.index()][index];
                self.checks += 1;
                if self.values.is_true(implied) {
                    continue;
                }
                if self.values.is_false(implied) {
                    return Some(Conflict::Binary(literal.negate(), implied));
                }
                self.assign(implied, Reason::Binary(literal));
            }

            let false_literal = literal.negate();
            let mut watchers = std::mem::take(&mut self.watches[false_literal.index()]);
            let mut conflict = None;
            let mut kept = 0;
            let mut index = 0;
            while index < watchers.len() {
                let clause_index = watchers[index];
                index += 1;
                self.checks += 1;

                let clause = &mut self.clauses[clause_index];
                if clause[0] == false_literal {
                    clause.swap(0, 1);
                }
                let first = clause[0];
                if self.values.is_true(first) {
                    watchers[kept] = clause_index;
                    kept += 1;
                    continue;
                }

                let replacement = (2..clause.len()).find(|k| !self.values.is_false(clause[*k]));
                if let Some(k) = replacement {
                    clause.swap(1, k);
                    self.watches[clause[1].index()].push(clause_index);
                    if self.level() == 1 {
                        self.shortened.push(clause_index);
                    }
                    continue;
                }

                watchers[kept] = clause_index;
                kept += 1;
                if self.values.is_false(first) {
                    conflict = Some(Conflict::Long(clause_index));
                    while index < watchers.len() {
                        watchers[kept] = watchers[index];
                        kept += 1;
                        index += 1;
                    }
                    break;
                }
                self.assign_from_long(first, clause_index);
            }
            watchers.truncate(kept);
            self.watches[false_literal.index()] = watchers;

            if conflict.is_some() {
                return conflict;
            }
        }
        None
    }

    /// Assigns `literal` as propagated by the long clause at `clause_index`, shortcutting with a hyper-binary resolvent if possible.
    fn assign_from_long(&mut self, literal: Lit, clause_index: usize) {
        if self.lhbr && self.level() == 1 {
            let decision = self.trail[self.level_starts[0]];
            let justified = self.clauses[clause_index]
                .iter()
                .filter(|l| **l != literal)
                .all(|l| {
                    let var = l.var() as usize;
                    self.level[var] == 0 || self.binary_reach[var]
                });
            if justified {
                self.add_binary(decision.negate(), literal);
                self.hyper_binaries += 1;
                self.assign(literal, Reason::Binary(decision));
                return;
            }
        }
        self.assign(literal, Reason::Long(clause_index));
    }

    /// The unit clause of the first unique implication point of a conflict at the first level.
    fn analyze(&self, conflict: Conflict) -> Lit {
        let mut seen = vec![false; self.level.len()];
        let mut count = 0;
        let note = |literal: Lit, seen: &mut Vec<bool>, count: &mut usize| {
            let var = literal.var() as usize;
            if self.level[var] > 0 && !seen[var] {
                seen[var] = true;
                *count += 1;
            }
        };

        match conflict {
            Conflict::Binary(a, b) => {
                note(a, &mut seen, &mut count);
                note(b, &mut seen, &mut count);
            }
            Conflict::Long(index) => {
                for literal in &self.clauses[index] {
                    note(*literal, &mut seen, &mut count);
                }
            }
        }

        let start = self.level_starts.first().copied().unwrap_or(0);
        let mut index = self.trail.len();
        while index > start {
            index -= 1;
            let literal = self.trail[index];
            if !seen[literal.var() as usize] {
                continue;
            }
            count -= 1;
            if count == 0 {
                return literal.negate();
            }
            match self.reason[literal.var() as usize] {
                Reason::Binary(from) => note(from, &mut seen, &mut count),
                Reason::Long(clause_index) => {
                    for other in &self.clauses[clause_index] {
                        if *other != literal {
                            note(*other, &mut seen, &mut count);
                        }
                    }
                }
                Reason::Root | Reason::Decision => {}
            }
        }
        self.trail[start].negate()
    }

    /// Probes `decision`, returning a unit clause if the decision fails.
    ///
    /// If the decision does not fail the engine is left at the first level.
    fn probe(&mut self, decision: Lit, doubles: usize, double_budget: &mut Budget) -> Option<Lit> {
        self.decide(decision);
        if let Some(conflict) = self.propagate() {
            let unit = self.analyze(conflict);
            self.backtrack(0);
            return Some(unit);
        }

        if doubles == 0 || double_budget.exhausted() {
            return None;
        }

        let mut candidates: Vec<Lit> = Vec::with_capacity(doubles);
        for clause_index in std::mem::take(&mut self.shortened) {
            if candidates.len() >= doubles {
                break;
            }
            let clause = &self.clauses[clause_index];
            if clause.iter().any(|l| self.values.is_true(*l)) {
                continue;
            }
            if let Some(open) = clause.iter().find(|l| self.values.is_undef(l.var())) {
                if !candidates.iter().any(|c| c.var() == open.var()) {
                    candidates.push(open.negate());
                }
            }
        }

        for candidate in candidates {
            if double_budget.exhausted() {
                break;
            }
            if !self.values.is_undef(candidate.var()) {
                continue;
            }
            let before = self.checks;
            self.decide(candidate);
            let conflict = self.propagate();
            self.backtrack(1);
            double_budget.spend(self.checks - before);

            if conflict.is_some() {
                log::trace!(target: targets::PROBING, "{decision} implies {}", candidate.negate());
                self.add_binary(decision.negate(), candidate.negate());
                self.double_binaries += 1;
                self.assign(candidate.negate(), Reason::Binary(decision));
                if let Some(conflict) = self.propagate() {
                    let unit = self.analyze(conflict);
                    self.backtrack(0);
                    return Some(unit);
                }
            }
        }
        None
    }
}

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// A probe engine over the current formula.
    fn probe_engine(&self) -> ProbeEngine {
        let capacity = literal_capacity(self.var_count);
        let mut engine = ProbeEngine {
            values: self.assignment.clone(),
            level: vec![0; self.var_count as usize + 1],
            reason: vec![Reason::Root; self.var_count as usize + 1],
            binary_reach: vec![false; self.var_count as usize + 1],
            trail: Vec::default(),
            head: 0,
            synced: 0,
            level_starts: Vec::default(),
            implied: (0..capacity)
                .map(|index| self.big.implied(Lit::from_index(index)).to_vec())
                .collect(),
            clauses: Vec::default(),
            watches: vec![Vec::default(); capacity],
            shortened: Vec::default(),
            lhbr: self.config.probe_lhbr.value,
            new_binaries: Vec::default(),
            hyper_binaries: 0,
            double_binaries: 0,
            checks: 0,
        };
        engine.values.extend(self.var_count);

        for (_, clause) in self.clause_db.live() {
            if clause.size() < 3 || clause.satisfied_on(&self.assignment) {
                continue;
            }
            let literals: CClause = clause
                .literals()
                .iter()
                .filter(|l| !self.assignment.is_false(**l))
                .copied()
                .collect();
            match literals.len() {
                2 => {
                    let (a, b) = (literals[0], literals[1]);
                    engine.implied[a.negate().index()].push(b);
                    engine.implied[b.negate().index()].push(a);
                }
                3.. => {
                    let index = engine.clauses.len();
                    engine.watches[literals[0].index()].push(index);
                    engine.watches[literals[1].index()].push(index);
                    engine.clauses.push(literals);
                }
                // Left for propagation.
                _ => {}
            }
        }
        engine
    }

    /// Failed literal probing, with equivalences found through probing merged.
    ///
    /// Returns true if some literal was fixed, some binary clause was added, or some equivalence was found.
    pub fn probing(&mut self) -> bool {
        self.propagate();
        if self.is_unsatisfiable() {
            return false;
        }
        let units_before = self.counters.units;
        let equivalences_before = self.counters.equivalences;

        let mut engine = self.probe_engine();
        let mut candidates: Vec<Var> = (1..=self.var_count).filter(|v| self.is_active(*v)).collect();
        if self.config.randomized.value {
            candidates.shuffle(&mut self.rng);
        }

        let mut classes: Vec<[Lit; 2]> = Vec::default();
        for var in candidates {
            if self.is_unsatisfiable() || self.budgets.probe.exhausted() || self.out_of_time() {
                break;
            }
            if !engine.values.is_undef(var) {
                continue;
            }
            let before_checks = engine.checks;
            self.probe_variable(&mut engine, var, &mut classes);
            self.budgets.probe.spend(engine.checks - before_checks);

            if self.config.probe_binary.value && !self.budgets.probe_binary.exhausted() {
                let implied: Vec<Lit> = engine.implied[Lit::new(var, true).index()]
                    .iter()
                    .filter(|l| engine.values.is_undef(l.var()) && self.is_active(l.var()))
                    .copied()
                    .collect();
                if let Some(pick) = implied.choose(&mut self.rng) {
                    let before_checks = engine.checks;
                    self.probe_variable(&mut engine, pick.var(), &mut classes);
                    self.budgets.probe_binary.spend(engine.checks - before_checks);
                }
            }
        }

        self.counters.hyper_binaries += engine.hyper_binaries;
        self.counters.double_lookahead_binaries += engine.double_binaries;
        let new_binaries = engine.new_binaries.len();
        for [a, b] in std::mem::take(&mut engine.new_binaries) {
            if self.is_unsatisfiable() {
                break;
            }
            let mut clause = vec![a, b];
            clause.sort_unstable();
            if let Err(e) = self.add_normalized(clause, true) {
                log::error!(target: targets::PROBING, "Failed to store a binary clause: {e:?}");
            }
        }
        self.propagate();

        if !self.is_unsatisfiable() && !classes.is_empty() {
            let mut merged = Vec::default();
            for class in classes {
                self.add_equivalences(&class, &mut merged);
                if self.is_unsatisfiable() {
                    return true;
                }
            }
            self.apply_equivalences(merged);
        }

        let units = self.counters.units - units_before;
        let equivalences = self.counters.equivalences - equivalences_before;
        if units + equivalences + new_binaries > 0 {
            log::info!(target: targets::PROBING,
                "Found {units} units, {equivalences} equivalences, and {new_binaries} binary clauses"
            );
        }
        units + equivalences + new_binaries > 0
    }

    /// Probes both literals of `var`.
    fn probe_variable(&mut self, engine: &mut ProbeEngine, var: Var, classes: &mut Vec<[Lit; 2]>) {
        let doubles = self.config.probe_double.value as usize;
        let positive = Lit::new(var, true);
        let negative = positive.negate();

        if let Some(unit) = engine.probe(positive, doubles, &mut self.budgets.probe_double) {
            self.probe_unit(engine, unit, true);
            return;
        }
        let positive_consequences = engine.first_level_consequences().to_vec();
        engine.backtrack(0);

        if let Some(unit) = engine.probe(negative, doubles, &mut self.budgets.probe_double) {
            self.probe_unit(engine, unit, true);
            return;
        }
        let negative_consequences = engine.first_level_consequences().to_vec();
        engine.backtrack(0);

        self.marks.next_step();
        for literal in &positive_consequences {
            self.marks.set(literal.index());
        }
        for literal in negative_consequences {
            if self.marks.is_marked(literal.index()) {
                log::trace!(target: targets::PROBING, "Both {positive} and {negative} imply {literal}");
                self.probe_unit(engine, literal, false);
                if self.is_unsatisfiable() {
                    return;
                }
            } else if self.marks.is_marked(literal.negate().index()) {
                classes.push([negative, literal]);
            }
        }
    }

    /// Fixes `unit`, in the formula and in the engine.
    fn probe_unit(&mut self, engine: &mut ProbeEngine, unit: Lit, failed: bool) {
        if failed {
            log::trace!(target: targets::PROBING, "Failed literal {}", unit.negate());
            self.counters.failed_literals += 1;
        }
        self.enqueue(unit);
        if self.is_unsatisfiable() {
            return;
        }
        if engine.values.is_false(unit) {
            self.set_unsatisfiable(targets::PROBING);
            return;
        }
        if engine.values.is_undef(unit.var()) {
            engine.assign(unit, Reason::Root);
            if engine.propagate().is_some() {
                self.set_unsatisfiable(targets::PROBING);
                return;
            }
        }
        // Consequences at the root of the engine are fixed in the formula too.
        for literal in engine.trail[engine.synced..].to_vec() {
            self.enqueue(literal);
        }
        engine.synced = engine.trail.len();
    }
}

#[cfg(test)]
mod probing_tests {
    use crate::{config::Config, context::Simplifier, structures::literal::Lit};

    fn lits(ints: &[i64]) -> Vec<Lit> {
        ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
    }

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.probe_double.value = 0;
        config.probe_lhbr.value = false;
        config.probe_binary.value = false;
        config
    }

    #[test]
    fn failed_literal() {
        let mut simplifier = Simplifier::from_config(quiet_config());
        // 1 implies 2 and 3, and so both 4 and -4.
        simplifier.add_clause(lits(&[-1, 2])).unwrap();
        simplifier.add_clause(lits(&[-1, 3])).unwrap();
        simplifier.add_clause(lits(&[-2, -3, 4])).unwrap();
        simplifier.add_clause(lits(&[-2, -3, -4])).unwrap();

        assert!(simplifier.probing());
        assert!(simplifier.assignment.is_true(Lit::from_dimacs(-1)));
        assert!(simplifier.counters.failed_literals > 0);
    }

    #[test]
    fn common_consequence() {
        let mut simplifier = Simplifier::from_config(quiet_config());
        // Both 1 and -1 imply 3.
        simplifier.add_clause(lits(&[-1, 2])).unwrap();
        simplifier.add_clause(lits(&[-2, 3])).unwrap();
        simplifier.add_clause(lits(&[1, 4])).unwrap();
        simplifier.add_clause(lits(&[-4, 3])).unwrap();
        simplifier.add_clause(lits(&[3, 5, 6])).unwrap();

        assert!(simplifier.probing());
        assert!(simplifier.assignment.is_true(Lit::from_dimacs(3)));
    }

    #[test]
    fn equivalence_through_long_clauses() {
        let mut simplifier = Simplifier::from_config(quiet_config());
        // 1 implies 2 and -1 implies -2, each through a long clause.
        simplifier.add_clause(lits(&[-1, 2, 3])).unwrap();
        simplifier.add_clause(lits(&[-1, -3])).unwrap();
        simplifier.add_clause(lits(&[1, -2, 4])).unwrap();
        simplifier.add_clause(lits(&[1, -4])).unwrap();
        simplifier.add_clause(lits(&[2, 4, 5])).unwrap();

        assert!(simplifier.probing());
        assert_eq!(
            simplifier.representative(Lit::from_dimacs(2)),
            Lit::from_dimacs(1)
        );
        assert!(simplifier
            .clauses()
            .all(|clause| clause.iter().all(|literal| literal.var() != 2)));
    }

    #[test]
    fn hyper_binary_resolution() {
        let mut config = quiet_config();
        config.probe_lhbr.value = true;
        let mut simplifier = Simplifier::from_config(config);
        // 1 falsifies 2 and 3 through binary clauses, and so implies 4 through [2, 3, 4].
        simplifier.add_clause(lits(&[-1, -2])).unwrap();
        simplifier.add_clause(lits(&[-1, -3])).unwrap();
        simplifier.add_clause(lits(&[2, 3, 4])).unwrap();
        simplifier.add_clause(lits(&[2, 5, 6])).unwrap();

        assert!(simplifier.probing());
        assert!(simplifier.counters.hyper_binaries > 0);
        assert!(simplifier.big.has_edge(Lit::from_dimacs(1), Lit::from_dimacs(4)));
    }
}
