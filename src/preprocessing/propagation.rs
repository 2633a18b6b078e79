/*!
Unit propagation.

Each queued literal is taken in turn:
- Clauses containing the literal are satisfied, and are removed.
- The complement of the literal is removed from every clause containing the complement.

A clause shortened to a unit clause queues the literal of the clause, and a clause shortened to the empty clause makes the formula unsatisfiable.
*/

use crate::{context::GenericSimplifier, misc::log::targets::{self}};

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Propagates all queued literals.
    ///
    /// Returns true if some literal was propagated.
    pub fn propagate(&mut self) -> bool {
        let start = self.propagation_head;
        let removed_before = self.counters.removed_clauses;

        while let Some(literal) = self.propagation_q.get(self.propagation_head).copied() {
            self.propagation_head += 1;
            if self.is_unsatisfiable() {
                break;
            }

            self.big.remove_variable(literal);

            for key in self.occurrences.take(literal) {
                self.remove_clause(key);
            }

            for key in self.occurrences.take(literal.negate()) {
                self.strengthen(key, literal.negate());
                if self.is_unsatisfiable() {
                    log::info!(target: targets::PROPAGATION, "Conflict on {literal}");
                    break;
                }
            }
        }

        let propagated = self.propagation_head - start;
        if propagated > 0 {
            log::info!(target: targets::PROPAGATION,
                "Propagated {propagated} literals, removing {} clauses",
                self.counters.removed_clauses - removed_before
            );
        }
        propagated > 0
    }
}
