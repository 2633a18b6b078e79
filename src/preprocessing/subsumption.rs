/*!
Subsumption and self-subsuming resolution.

Clauses are taken from the subsumption queue, and each clause C is checked against every clause D containing some literal of the variable of C with fewest occurrences.
- If every literal of C is a literal of D, D is subsumed by C and removed.
- If every literal of C but one is a literal of D, and the complement of the remaining literal is a literal of D, the complement is removed from D.

Before the exact check the signatures of C and D are compared, as the signature of C sets a bit not set by the signature of D only if C is not contained in D (up to complementation of a literal).
*/

use crate::{
    context::GenericSimplifier,
    db::ClauseRef,
    misc::log::targets::{self},
    structures::{clause::Clause, literal::Lit},
};

/// The relation of a clause C to a clause D.
enum Subsumes {
    No,
    Subsumed,
    Strengthens(Lit),
}

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Applies subsumption and self-subsuming resolution to the clauses on the subsumption queue, until the queue is empty.
    ///
    /// Returns true if some clause was removed or strengthened.
    pub fn subsume(&mut self) -> bool {
        let subsumed_before = self.counters.subsumed;
        let strengthened_before = self.counters.strengthened;

        while let Some(key) = self.subsumption_q.pop() {
            if self.is_unsatisfiable() || self.budgets.subsumption.exhausted() {
                break;
            }
            if !self.clause_db.is_live(key) {
                continue;
            }
            self.subsume_with(key);
        }
        if self.budgets.subsumption.exhausted() {
            self.subsumption_q.clear();
        }
        self.propagate();

        let subsumed = self.counters.subsumed - subsumed_before;
        let strengthened = self.counters.strengthened - strengthened_before;
        if subsumed + strengthened > 0 {
            log::info!(target: targets::SUBSUMPTION, "Subsumed {subsumed} and strengthened {strengthened} clauses");
        }
        subsumed + strengthened > 0
    }

    /// Checks a clause against the clauses of its variable with fewest occurrences.
    fn subsume_with(&mut self, key: ClauseRef) {
        let clause = &self.clause_db[key];
        let Some(pivot) = clause
            .literals()
            .iter()
            .min_by_key(|l| self.occurrences.var_count(l.var()))
            .copied()
        else {
            return;
        };

        self.marks.next_step();
        for literal in clause.literals() {
            self.marks.set(literal.index());
        }

        let candidates: Vec<ClauseRef> = [pivot, pivot.negate()]
            .iter()
            .flat_map(|l| self.occurrences.list(*l).iter().copied())
            .collect();

        for other in candidates {
            if other == key || !self.clause_db.is_live(other) || !self.clause_db.is_live(key) {
                continue;
            }
            match self.subsumes(key, other) {
                Subsumes::No => {}

                Subsumes::Subsumed => {
                    log::trace!(target: targets::SUBSUMPTION, "{} subsumes {}", self.clause_db[key].as_dimacs(false), self.clause_db[other].as_dimacs(false));
                    if !self.clause_db[other].is_learnt() {
                        self.clause_db[key].flags_mut().learnt = false;
                    }
                    self.remove_clause(other);
                    self.counters.subsumed += 1;
                }

                Subsumes::Strengthens(literal) => {
                    self.strengthen(other, literal);
                    self.counters.strengthened += 1;
                    if self.is_unsatisfiable() {
                        return;
                    }
                    // Strengthening may fix a literal, which changes the marks.
                    if !self.clause_db.is_live(key) {
                        return;
                    }
                    self.marks.next_step();
                    for literal in self.clause_db[key].literals() {
                        self.marks.set(literal.index());
                    }
                }
            }
        }
    }

    /// The relation of the clause `key` to the clause `other`, where the literals of `key` are marked.
    fn subsumes(&mut self, key: ClauseRef, other: ClauseRef) -> Subsumes {
        let clause = &self.clause_db[key];
        let candidate = &self.clause_db[other];
        if candidate.size() < clause.size()
            || clause.signature() & !candidate.signature() != 0
        {
            return Subsumes::No;
        }

        self.budgets.subsumption.spend(candidate.size() as u64);

        let mut hits = 0;
        let mut complement = None;
        for literal in candidate.literals() {
            if self.marks.is_marked(literal.index()) {
                hits += 1;
            } else if self.marks.is_marked(literal.negate().index()) {
                if complement.is_some() {
                    return Subsumes::No;
                }
                complement = Some(*literal);
            }
        }

        match complement {
            None if hits == clause.size() => Subsumes::Subsumed,
            Some(literal) if hits + 1 == clause.size() => Subsumes::Strengthens(literal),
            _ => Subsumes::No,
        }
    }
}

#[cfg(test)]
mod subsumption_tests {
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
    fn subsumed() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2, 3])).unwrap();
        simplifier.add_clause(lits(&[1, 2])).unwrap();

        assert!(simplifier.subsume());
        assert_eq!(formula(&simplifier), vec!["1 2"]);
    }

    #[test]
    fn strengthened() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2, 3])).unwrap();
        simplifier.add_clause(lits(&[-1, 2])).unwrap();

        assert!(simplifier.subsume());
        assert_eq!(formula(&simplifier), vec!["-1 2", "2 3"]);
    }

    #[test]
    fn strengthened_to_unit() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2])).unwrap();
        simplifier.add_clause(lits(&[1, -2])).unwrap();
        simplifier.add_clause(lits(&[-1, 3, 4])).unwrap();

        assert!(simplifier.subsume());
        assert!(simplifier.assignment.is_true(Lit::from_dimacs(1)));
        assert_eq!(formula(&simplifier), vec!["3 4"]);
    }

    #[test]
    fn learnt_subsumer_kept() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2, 3])).unwrap();
        simplifier.add_learnt_clause(lits(&[1, 2, 4, 5])).unwrap();
        simplifier.add_learnt_clause(lits(&[1, 2])).unwrap();

        simplifier.subsume();
        let (_, clause) = simplifier.clause_db.live().next().unwrap();
        assert_eq!(clause.as_dimacs(false), "1 2");
        assert!(!clause.is_learnt());
    }
}
