/*!
Hidden tautology and hidden literal elimination.

For a literal `l`, the *hidden literals* of `l` are the literals which imply `l` through the [binary implication graph](crate::db::big).
Then, for a clause C containing `l` and some other literal `k`:
- If the complement of `k` implies `l`, then the binary clause `[k, l]` is implied, and C is a hidden tautology.
  The clause is removed.
- If `k` implies `l` then `k` adds nothing to C, and is removed.

Both changes keep the models of the formula, as the binary clauses used remain.

If the complement of `l` is found to imply `l`, then `l` is a failed literal, and `l` is fixed.
*/

use crate::{
    context::GenericSimplifier,
    generic::index_heap::IndexHeap,
    misc::log::targets::{self},
    structures::{clause::Clause, literal::Lit},
};

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Removes hidden tautologies and hidden literals, taking variables in order of occurrence.
    ///
    /// Returns true if some clause was removed or strengthened, or some literal was fixed.
    pub fn hidden_tautology_elimination(&mut self) -> bool {
        let before = self.counters.hidden_tautologies
            + self.counters.hidden_literals
            + self.counters.failed_literals;

        let mut heap = IndexHeap::default();
        for var in 1..=self.var_count {
            if self.assignment.is_undef(var) && !self.is_eliminated(var) && !self.is_replaced(var) {
                heap.add(var as usize, self.occurrences.var_count(var));
                heap.activate(var as usize);
            }
        }

        'var_loop: while let Some(var) = heap.pop_min() {
            for literal in [Lit::new(var as u32, true), Lit::new(var as u32, false)] {
                if self.is_unsatisfiable() || self.budgets.hte.exhausted() || self.out_of_time() {
                    break 'var_loop;
                }
                if !self.assignment.is_undef(literal.var()) {
                    continue 'var_loop;
                }

                let (failed, checks) = self.mark_predecessors(&[literal]);
                self.budgets.hte.spend(checks);
                if failed.is_some() {
                    log::trace!(target: targets::HTE, "Failed literal {}", literal.negate());
                    self.counters.failed_literals += 1;
                    self.enqueue(literal);
                    continue 'var_loop;
                }
                self.eliminate_hidden(literal);
            }
        }
        self.propagate();

        let changes = self.counters.hidden_tautologies
            + self.counters.hidden_literals
            + self.counters.failed_literals
            - before;
        if changes > 0 {
            log::info!(target: targets::HTE, "Removed {} hidden tautologies and {} hidden literals",
                self.counters.hidden_tautologies, self.counters.hidden_literals
            );
        }
        changes > 0
    }

    /// Marks each of `sources` together with every literal which implies some source.
    ///
    /// Returns a source whose complement was marked, if any, together with the count of edges visited.
    pub(crate) fn mark_predecessors(&mut self, sources: &[Lit]) -> (Option<Lit>, u64) {
        self.marks.next_step();
        let mut queue: Vec<Lit> = Vec::with_capacity(sources.len());
        for source in sources {
            if !self.marks.is_marked(source.index()) {
                self.marks.set(source.index());
                queue.push(*source);
            }
        }

        let mut checks = 0;
        let mut head = 0;
        while let Some(current) = queue.get(head).copied() {
            head += 1;
            // k → current exactly when ¬current → ¬k.
            for implied in self.big.implied(current.negate()) {
                checks += 1;
                let predecessor = implied.negate();
                if !self.marks.is_marked(predecessor.index()) {
                    self.marks.set(predecessor.index());
                    queue.push(predecessor);
                }
            }
        }

        let failed = sources
            .iter()
            .find(|source| self.marks.is_marked(source.negate().index()))
            .copied();
        (failed, checks)
    }

    /// Removes hidden tautologies and literals among the clauses of `literal`, where the predecessors of `literal` are marked.
    fn eliminate_hidden(&mut self, literal: Lit) {
        for key in self.occurrences.list(literal).to_vec() {
            if !self.clause_db.is_live(key) || self.clause_db[key].size() <= 2 {
                continue;
            }
            if !self.assignment.is_undef(literal.var()) || self.is_unsatisfiable() {
                return;
            }

            let literals = self.clause_db[key].literals().to_vec();
            self.budgets.hte.spend(literals.len() as u64);

            let tautology = literals
                .iter()
                .any(|l| *l != literal && self.marks.is_marked(l.negate().index()));
            if tautology {
                log::trace!(target: targets::HTE, "Hidden tautology {}", literals.as_dimacs(false));
                self.remove_clause(key);
                self.counters.hidden_tautologies += 1;
                continue;
            }

            let hidden: Vec<Lit> = literals
                .iter()
                .filter(|l| **l != literal && self.marks.is_marked(l.index()))
                .copied()
                .collect();
            for hidden_literal in hidden {
                self.strengthen(key, hidden_literal);
                self.counters.hidden_literals += 1;
                if self.is_unsatisfiable() {
                    return;
                }
            }
        }
    }
}
