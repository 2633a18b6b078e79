/*!
Blocked clause elimination.

A clause C is *blocked* on a literal `l` of C if every resolvent of C on `l` is a tautology.
That is, if each clause D containing the complement of `l` also contains the complement of some other literal of C.

Removing a blocked clause may add models to the formula, and so each removed clause is pushed to the [stack](crate::reconstruction::stack) together with the literal the clause is blocked on.
On reconstruction, the literal is set true whenever the clause is not otherwise satisfied.

Only clauses which are not learnt are removed, though the check is against every clause of the formula.

With the `hbce` option, the literals of C are first extended by hidden literal addition: a literal which implies some literal of C through the binary implication graph may be added to C without changing the models of the formula, and so adds to the ways a resolvent may be a tautology.
If hidden literal addition finds a complementary pair, the clause is a hidden tautology and is removed outright.
Binary clauses are checked without hidden literal addition.
*/

use crate::{
    context::GenericSimplifier,
    misc::log::targets::{self},
    reconstruction::stack::StackEntry,
    structures::{clause::Clause, literal::Lit},
};

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Removes blocked clauses, taking touched variables in order of occurrence.
    ///
    /// Returns true if some clause was removed.
    pub fn blocked_clause_elimination(&mut self) -> bool {
        let before = self.counters.blocked_clauses + self.counters.hidden_tautologies;

        while let Some(var) = self.bce_heap.pop_min() {
            if self.is_unsatisfiable() || self.budgets.bce.exhausted() || self.out_of_time() {
                break;
            }
            if !self.is_active(var as u32) {
                continue;
            }
            for literal in [Lit::new(var as u32, true), Lit::new(var as u32, false)] {
                self.eliminate_blocked(literal);
            }
        }

        let removed = self.counters.blocked_clauses + self.counters.hidden_tautologies - before;
        if removed > 0 {
            log::info!(target: targets::BCE, "Removed {removed} blocked clauses");
        }
        removed > 0
    }

    /// Removes the clauses containing `literal` which are blocked on `literal`.
    fn eliminate_blocked(&mut self, literal: Lit) {
        for key in self.occurrences.list(literal).to_vec() {
            if !self.clause_db.is_live(key) || self.clause_db[key].is_learnt() {
                continue;
            }
            if self.budgets.bce.exhausted() {
                return;
            }
            let clause = self.clause_db[key].literals().to_vec();

            // The edges of a binary clause would make the clause a hidden tautology of itself.
            let hidden = self.config.hbce.value && clause.len() > 2 && !self.budgets.hbce.exhausted();
            if hidden {
                let (tautology, checks) = self.mark_predecessors(&clause);
                self.budgets.hbce.spend(checks);
                if tautology.is_some() {
                    log::trace!(target: targets::BCE, "Hidden tautology {}", clause.as_dimacs(false));
                    self.remove_clause(key);
                    self.counters.hidden_tautologies += 1;
                    continue;
                }
            } else {
                self.marks.next_step();
                for other in &clause {
                    self.marks.set(other.index());
                }
            }

            if self.blocked_on(literal) {
                log::trace!(target: targets::BCE, "{} blocked on {literal}", clause.as_dimacs(false));
                self.remove_clause(key);
                self.flippable[literal.var() as usize] = true;
                self.stack.push(StackEntry::BlockedClause { literal, clause });
                self.counters.blocked_clauses += 1;
            }
        }
    }

    /// True if each clause containing the complement of `literal` contains the complement of some other marked literal.
    fn blocked_on(&mut self, literal: Lit) -> bool {
        let complement = literal.negate();
        for key in self.occurrences.list(complement) {
            let other = &self.clause_db[*key];
            self.budgets.bce.spend(other.size() as u64);
            let tautology = other
                .literals()
                .iter()
                .any(|l| *l != complement && self.marks.is_marked(l.negate().index()));
            if !tautology {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod bce_tests {
    use crate::{
        config::Config,
        context::Simplifier,
        reconstruction::stack::StackEntry,
        structures::{clause::Clause, literal::Lit},
    };

    fn lits(ints: &[i64]) -> Vec<Lit> {
        ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
    }

    #[test]
    fn blocked_clauses_removed() {
        let mut simplifier = Simplifier::from_config(Config::default());
        // [1, 2] is blocked on 1, as the only resolvent partner [-1, -2] gives a tautology.
        // After removal, [-1, -2] is (trivially) blocked on -1.
        simplifier.add_clause(lits(&[1, 2])).unwrap();
        simplifier.add_clause(lits(&[-1, -2])).unwrap();
        simplifier.freeze(2);

        assert!(simplifier.blocked_clause_elimination());
        assert_eq!(simplifier.clauses().count(), 0);
        assert_eq!(simplifier.stack.len(), 2);
        assert!(simplifier
            .stack
            .entries()
            .iter()
            .all(|entry| matches!(entry, StackEntry::BlockedClause { literal, .. } if literal.var() == 1)));
        assert!(simplifier.is_flippable(1));
        assert!(!simplifier.is_flippable(2));
    }

    #[test]
    fn not_blocked() {
        let mut simplifier = Simplifier::from_config(Config::default());
        for clause in [[1, 2], [-1, 2], [1, -2], [-1, -2]] {
            simplifier.add_clause(lits(&clause)).unwrap();
        }

        assert!(!simplifier.blocked_clause_elimination());
        let mut clauses: Vec<String> = simplifier.clauses().map(|c| c.as_dimacs(false)).collect();
        clauses.sort();
        assert_eq!(clauses, vec!["-1 -2", "-1 2", "1 -2", "1 2"]);
    }

    #[test]
    fn frozen_literal_not_used() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2])).unwrap();
        simplifier.add_clause(lits(&[-1, -2])).unwrap();
        simplifier.freeze(1);
        simplifier.freeze(2);

        assert!(!simplifier.blocked_clause_elimination());
        assert_eq!(simplifier.clauses().count(), 2);
    }
}
