//! Pure literal elimination.
//!
//! A literal is pure if the literal occurs in some clause while the complement of the literal occurs in none.
//! Fixing a pure literal only satisfies clauses, and so the literal is fixed.
//!
//! Literals are taken in order of occurrence, and so the literals without occurrences come first.
//! A frozen variable, or a variable which has been replaced by a representative, is skipped.
use crate::{
    context::GenericSimplifier,
    generic::index_heap::IndexHeap,
    misc::log::targets::{self},
    structures::literal::Lit,
};

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Fixes pure literals, and propagates, until no literal is pure.
    ///
    /// Returns true if some literal was fixed.
    pub fn pure_literals(&mut self) -> bool {
        let before = self.counters.pure_literals;

        loop {
            if self.is_unsatisfiable() {
                break;
            }

            let mut heap = IndexHeap::default();
            for var in 1..=self.var_count {
                if !self.is_active(var) || self.equivalent_to[var as usize].var() != var {
                    continue;
                }
                for literal in [Lit::new(var, true), Lit::new(var, false)] {
                    heap.add(literal.index(), self.occurrences.count(literal));
                    heap.activate(literal.index());
                }
            }

            let mut found = false;
            while let Some(index) = heap.pop_min() {
                if *heap.value_at(index) > 0 {
                    break;
                }
                let absent = Lit::from_index(index);
                let pure = absent.negate();
                if !self.assignment.is_undef(pure.var())
                    || self.occurrences.count(absent) > 0
                    || self.occurrences.count(pure) == 0
                {
                    continue;
                }
                log::trace!(target: targets::PURE, "Pure {pure}");
                self.enqueue(pure);
                self.counters.pure_literals += 1;
                found = true;
            }

            if !found {
                break;
            }
            self.propagate();
        }

        let fixed = self.counters.pure_literals - before;
        if fixed > 0 {
            log::info!(target: targets::PURE, "Fixed {fixed} pure literals");
        }
        fixed > 0
    }
}

#[cfg(test)]
mod pure_tests {
    use crate::{config::Config, context::Simplifier, structures::literal::Lit};

    fn lits(ints: &[i64]) -> Vec<Lit> {
        ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
    }

    #[test]
    fn pure_and_frozen() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2])).unwrap();
        simplifier.add_clause(lits(&[1, -2, 3])).unwrap();
        simplifier.add_clause(lits(&[-3, 4])).unwrap();
        simplifier.freeze(4);

        assert!(simplifier.pure_literals());
        assert!(simplifier.assignment.is_true(Lit::from_dimacs(1)));
        assert!(simplifier.assignment.is_undef(4));
        assert_eq!(simplifier.clause_db.live_count(), 0);
    }
}
