/*!
Maintenance of the formula.

Every change to the clauses of the formula goes through the methods here, which keep the clause database, the occurrence lists, and the binary implication graph consistent with one another.
In addition, changed clauses are queued for subsumption, and the variables of changed clauses are queued as candidates for elimination.

A stored clause always has at least two literals.
When a clause is shortened to a unit clause the clause is removed and the literal is fixed, and when a clause is shortened to the empty clause the formula is unsatisfiable.
*/

use crate::{
    context::GenericSimplifier,
    db::{clause::GC_THRESHOLD, ClauseRef},
    misc::log::targets::{self},
    structures::{
        clause::{CClause, Clause},
        literal::Lit,
        variable::Var,
    },
    types::err::{self},
};

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Stores a clause of at least two literals, and records the clause in the indicies.
    pub(crate) fn store_clause(
        &mut self,
        literals: CClause,
        learnt: bool,
    ) -> Result<ClauseRef, err::ClauseDBError> {
        debug_assert!(literals.len() > 1);
        let key = self.clause_db.create(literals, learnt)?;
        let literals = self.clause_db[key].literals().to_vec();
        self.occurrences.add(key, &literals);
        if let [a, b] = literals[..] {
            self.big.add_clause(a, b);
            self.eq_do_analyze.extend([a, b]);
        }
        self.subsumption_q.push(key);
        for literal in literals {
            self.touch(literal.var());
        }
        Ok(key)
    }

    /// Queues `var` as a candidate for elimination.
    pub(crate) fn touch(&mut self, var: Var) {
        let count = self.occurrences.var_count(var);
        for heap in [&mut self.bve_heap, &mut self.bce_heap] {
            heap.add(var as usize, count);
            heap.activate(var as usize);
        }
    }

    /// Removes a clause from the formula.
    pub(crate) fn remove_clause(&mut self, key: ClauseRef) {
        if !self.clause_db.ignore(key) {
            return;
        }
        let literals = self.clause_db[key].literals().to_vec();
        self.occurrences.remove(key, &literals);
        if let [a, b] = literals[..] {
            self.big.remove_clause(a, b);
        }
        for literal in literals {
            self.touch(literal.var());
        }
        self.counters.removed_clauses += 1;
    }

    /// Removes `literal` from a clause.
    pub(crate) fn strengthen(&mut self, key: ClauseRef, literal: Lit) {
        if !self.clause_db.is_live(key) {
            return;
        }
        let was_binary = self.clause_db[key].size() == 2;
        if !self.clause_db[key].remove_literal(literal) {
            return;
        }
        self.occurrences.remove_from(literal, key);
        if was_binary {
            let other = self.clause_db[key].literals()[0];
            self.big.remove_clause(literal, other);
        }
        self.counters.removed_literals += 1;
        log::trace!(target: targets::CLAUSE_DB, "Removed {literal} from {}", self.clause_db[key].as_dimacs(false));
        self.settle(key);
    }

    /// Replaces the literals of a clause with `literals`, which must be sorted and free of duplicates and complementary literals.
    pub(crate) fn replace_literals(&mut self, key: ClauseRef, literals: CClause) {
        if !self.clause_db.is_live(key) {
            return;
        }
        let old = self.clause_db[key].take_literals();
        self.occurrences.remove(key, &old);
        if let [a, b] = old[..] {
            self.big.remove_clause(a, b);
        }
        self.occurrences.add(key, &literals);
        self.counters.removed_literals += old.len().saturating_sub(literals.len());
        self.clause_db[key].set_literals(literals);
        self.settle(key);
    }

    /// Updates the indicies after the literals of a clause have changed.
    ///
    /// The clause must be recorded in the occurrence lists of its literals, and must not have edges in the implication graph.
    fn settle(&mut self, key: ClauseRef) {
        let literals = self.clause_db[key].literals().to_vec();
        match literals[..] {
            [] => {
                self.clause_db.ignore(key);
                self.set_unsatisfiable(targets::CLAUSE_DB);
            }

            [unit] => {
                self.clause_db.ignore(key);
                self.occurrences.remove_from(unit, key);
                self.counters.removed_clauses += 1;
                self.enqueue(unit);
            }

            [a, b] => {
                self.clause_db[key].flags_mut().learnt = false;
                self.big.add_clause(a, b);
                self.eq_do_analyze.extend([a, b]);
                self.subsumption_q.push(key);
                self.touch(a.var());
                self.touch(b.var());
            }

            _ => {
                self.subsumption_q.push(key);
                for literal in literals.iter() {
                    self.touch(literal.var());
                }
            }
        }
    }

    /// Releases ignored clauses, if the fraction of ignored clauses is large enough.
    pub(crate) fn collect_garbage(&mut self) {
        if self.clause_db.wasted_fraction() > GC_THRESHOLD {
            let released = self.clause_db.collect_garbage();
            self.subsumption_q.retain(|key| self.clause_db.is_live(*key));
            log::debug!(target: targets::CLAUSE_DB, "Collected {released} clauses");
        }
    }
}
