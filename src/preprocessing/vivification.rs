/*!
Vivification.

A clause is *vivified* by assuming the negations of the literals of the clause one at a time, and propagating each assumption through the [binary implication graph](crate::db::big).
For a clause `l1 ∨ … ∨ ln`, with the negations of `l1, …, lk` assumed:
- If `l(k+1)` is implied, the clause is shortened to `l1 ∨ … ∨ l(k+1)`.
- If the negation of `l(k+1)` is implied, `l(k+1)` is dropped.
- If the assumptions are inconsistent, the clause is shortened to `l1 ∨ … ∨ lk`.

Only clauses whose length is at least some percentage of the longest clause are vivified, and each clause is vivified against the binary clauses alone, so the clause never takes part in its own vivification.

Literals are assumed in order of occurrence (most first), or in a random order if randomized.
All assumptions are forgotten after each clause.
*/

use rand::seq::SliceRandom;

use crate::{
    context::GenericSimplifier,
    misc::log::targets::{self},
    structures::{
        clause::{CClause, Clause},
        literal::Lit,
    },
};

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Vivifies long clauses.
    ///
    /// Returns true if some literal was removed.
    pub fn vivification(&mut self) -> bool {
        let before = self.counters.vivified_literals;

        let longest = self.clause_db.live().map(|(_, clause)| clause.size()).max().unwrap_or(0);
        let threshold = std::cmp::max(
            3,
            longest * self.config.vivi_length_percent.value as usize / 100,
        );

        let candidates: Vec<_> = self
            .clause_db
            .live()
            .filter(|(_, clause)| clause.size() >= threshold)
            .map(|(key, _)| key)
            .collect();

        for key in candidates {
            if self.is_unsatisfiable() || self.budgets.vivi.exhausted() || self.out_of_time() {
                break;
            }
            if !self.clause_db.is_live(key) {
                continue;
            }

            let mut literals = self.clause_db[key].literals().to_vec();
            match self.config.randomized.value {
                true => literals.shuffle(&mut self.rng),
                false => literals.sort_by_key(|l| std::cmp::Reverse(self.occurrences.count(*l))),
            }

            let vivified = self.vivify_literals(&literals);
            if vivified.len() < literals.len() {
                log::trace!(target: targets::VIVIFICATION, "{} vivified to {}", literals.as_dimacs(false), vivified.as_dimacs(false));
                self.counters.vivified_literals += literals.len() - vivified.len();
                let mut vivified = vivified;
                vivified.sort_unstable();
                self.replace_literals(key, vivified);
            }
        }
        self.propagate();

        let removed = self.counters.vivified_literals - before;
        if removed > 0 {
            log::info!(target: targets::VIVIFICATION, "Removed {removed} literals");
        }
        removed > 0
    }

    /// The literals of a clause which are kept by vivification, with literals assumed in the given order.
    fn vivify_literals(&mut self, literals: &[Lit]) -> CClause {
        self.marks.next_step();
        let mut kept = CClause::default();

        for literal in literals {
            if self.marks.is_marked(literal.index()) {
                kept.push(*literal);
                return kept;
            }
            if self.marks.is_marked(literal.negate().index()) {
                continue;
            }

            kept.push(*literal);
            if self.assume(literal.negate()) {
                return kept;
            }
        }
        kept
    }

    /// Marks `literal` and every literal implied by `literal` as true.
    ///
    /// Returns true if some literal is marked together with the complement.
    fn assume(&mut self, literal: Lit) -> bool {
        let mut queue = vec![literal];
        self.marks.set(literal.index());
        while let Some(current) = queue.pop() {
            for implied in self.big.implied(current) {
                self.budgets.vivi.spend(1);
                if self.marks.is_marked(implied.negate().index()) {
                    return true;
                }
                if !self.marks.is_marked(implied.index()) {
                    self.marks.set(implied.index());
                    queue.push(*implied);
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod vivification_tests {
    use crate::{
        config::Config,
        context::Simplifier,
        structures::{clause::Clause, literal::Lit},
    };

    fn lits(ints: &[i64]) -> Vec<Lit> {
        ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
    }

    #[test]
    fn implied_literal_removed() {
        let mut config = Config::default();
        config.vivi_length_percent.value = 100;
        let mut simplifier = Simplifier::from_config(config);
        // Assuming -1 gives 2 through [1, 2], and so -2 is never required in [1, -2, 3, 4].
        simplifier.add_clause(lits(&[1, 2])).unwrap();
        simplifier.add_clause(lits(&[1, -2, 3, 4])).unwrap();

        assert!(simplifier.vivification());
        let mut clauses: Vec<String> = simplifier.clauses().map(|c| c.as_dimacs(false)).collect();
        clauses.sort();
        assert_eq!(clauses, vec!["1 2", "1 3 4"]);
    }

    #[test]
    fn nothing_to_vivify() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2, 3])).unwrap();
        simplifier.add_clause(lits(&[-1, -2, -3])).unwrap();

        assert!(!simplifier.vivification());
        assert_eq!(simplifier.clauses().count(), 2);
    }
}
