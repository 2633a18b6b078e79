/*!
Compression of the variables of the formula.

After simplification many variables are fixed, eliminated, or replaced, and no longer appear in any clause.
Compression renumbers the remaining variables contiguously, in order, and rewrites every clause to the new numbering.

A variable survives compression if the variable is unassigned, neither eliminated nor replaced, and either occurs in some clause or is frozen.
So, every label of the formula which is not yet fixed keeps a (new) variable.

The old numbering, the fixed literals, and the equivalence forest are pushed to the [stack](crate::reconstruction::stack) as a [CompressionTable], from which a model over the new variables is expanded to a model over the old variables.

Compression is idempotent, and a second call without changes between calls does nothing.
*/

use std::collections::BTreeMap;

use crate::{
    context::GenericSimplifier,
    db::{big::ImplicationGraph, occurrence::OccurrenceDB},
    generic::{index_heap::IndexHeap, mark_array::MarkArray},
    misc::log::targets::{self},
    reconstruction::stack::{CompressionTable, StackEntry},
    structures::{
        assignment::Assignment,
        clause::{CClause, Clause},
        literal::Lit,
        variable::Var,
    },
};

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Renumbers the variables of the formula contiguously.
    ///
    /// Returns true if some variable was removed.
    pub fn compress(&mut self) -> bool {
        self.propagate();
        if self.is_unsatisfiable() {
            return false;
        }

        let old_count = self.var_count;
        let mut forward: Vec<Var> = vec![0; old_count as usize + 1];
        let mut inverse: Vec<Var> = vec![0];

        for var in 1..=old_count {
            let occurs = self.occurrences.var_count(var) > 0;
            let kept = self.assignment.is_undef(var)
                && !self.is_eliminated(var)
                && !self.is_replaced(var)
                && (occurs || self.is_frozen(var));
            if kept {
                forward[var as usize] = inverse.len() as Var;
                inverse.push(var);
            }
        }

        let new_count = (inverse.len() - 1) as Var;
        let diff = old_count - new_count;
        if diff == 0 {
            log::debug!(target: targets::COMPRESSION, "Nothing to compress");
            return false;
        }

        // Labels which are dropped are fixed, and so their weight is settled here.
        self.removed_weight += self.falsified_label_weight();
        let labels: BTreeMap<Var, i64> = self
            .label_weight
            .iter()
            .filter(|(var, _)| forward[**var as usize] != 0)
            .map(|(var, weight)| (forward[*var as usize], *weight))
            .collect();
        let frozen: Vec<Var> = (1..=old_count)
            .filter(|var| forward[*var as usize] != 0 && self.is_frozen(*var))
            .map(|var| forward[var as usize])
            .collect();
        let flippable: Vec<Var> = (1..=old_count)
            .filter(|var| forward[*var as usize] != 0 && self.is_flippable(*var))
            .map(|var| forward[var as usize])
            .collect();

        let table = CompressionTable {
            variables: old_count,
            inverse,
            units: self.assignment.true_literals().collect(),
            equivalences: self.equivalent_to.clone(),
        };

        let clauses: Vec<(CClause, bool)> = self
            .clause_db
            .live()
            .map(|(_, clause)| {
                let literals = clause
                    .literals()
                    .iter()
                    .map(|literal| literal.with_var(forward[literal.var() as usize]))
                    .collect();
                (literals, clause.is_learnt())
            })
            .collect();

        self.reset_variables(new_count);
        self.clause_db.clear();
        for (literals, learnt) in clauses {
            if let Err(e) = self.store_clause(literals, learnt) {
                log::error!(target: targets::COMPRESSION, "Failed to store a renumbered clause: {e:?}");
            }
        }
        for var in frozen {
            self.do_not_touch[var as usize] = true;
        }
        for var in flippable {
            self.flippable[var as usize] = true;
        }
        self.label_weight = labels;

        self.stack.push(StackEntry::Compression(table));
        self.counters.compressed_variables += diff as usize;
        log::info!(target: targets::COMPRESSION, "Removed {diff} variables, {new_count} remain");
        true
    }

    /// Replaces every structure indexed by variable with an empty structure over variables `1..=var_count`.
    fn reset_variables(&mut self, var_count: Var) {
        let original = self.original_var_count;

        self.var_count = 0;
        self.assignment = Assignment::with_vars(0);
        self.eliminated = vec![false];
        self.equivalent_to = vec![Lit::new(0, true)];
        self.eq_replaced = vec![false];
        self.do_not_touch = vec![false];
        self.flippable = vec![false];
        self.occurrences = OccurrenceDB::default();
        self.big = ImplicationGraph::default();
        self.bve_heap = IndexHeap::default();
        self.bce_heap = IndexHeap::default();
        self.marks = MarkArray::with_capacity(2);

        self.propagation_q.clear();
        self.propagation_head = 0;
        self.subsumption_q.clear();
        self.eq_do_analyze.clear();
        self.eq_initialised = false;

        self.ensure_vars(var_count);
        self.original_var_count = original;
    }
}

#[cfg(test)]
mod compression_tests {
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
    fn renumbered() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[-1])).unwrap();
        simplifier.add_clause(lits(&[1, 3, -5])).unwrap();
        simplifier.add_clause(lits(&[2, 5])).unwrap();
        simplifier.add_clause(lits(&[-2, 4])).unwrap();
        simplifier.propagate();

        assert!(simplifier.compress());
        assert_eq!(simplifier.var_count(), 4);
        assert_eq!(simplifier.original_var_count(), 5);

        let mut clauses: Vec<String> = simplifier.clauses().map(|c| c.as_dimacs(false)).collect();
        clauses.sort();
        assert_eq!(clauses, vec!["-1 3", "1 4", "2 -4"]);

        let Some(StackEntry::Compression(table)) = simplifier.stack.entries().last() else {
            panic!("Missing compression entry");
        };
        assert_eq!(table.inverse, vec![0, 2, 3, 4, 5]);
        assert_eq!(table.units, vec![Lit::from_dimacs(-1)]);
    }

    #[test]
    fn indicies_follow() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[-2])).unwrap();
        simplifier.add_clause(lits(&[1, 3, -5])).unwrap();
        simplifier.add_clause(lits(&[3, 5])).unwrap();
        simplifier.add_clause(lits(&[-1, 4])).unwrap();
        simplifier.propagate();

        assert!(simplifier.compress());

        let clauses: Vec<Vec<Lit>> = simplifier.clauses().map(|c| c.to_vec()).collect();
        let occurrences: usize = (1..=simplifier.var_count())
            .map(|var| simplifier.occurrences.var_count(var))
            .sum();
        assert_eq!(occurrences, clauses.iter().map(|c| c.len()).sum::<usize>());

        let mut edges = 0;
        for clause in &clauses {
            for literal in clause {
                assert!(simplifier.occurrences.count(*literal) > 0);
            }
            if let [a, b] = clause[..] {
                assert!(simplifier.big.has_edge(-a, b));
                assert!(simplifier.big.has_edge(-b, a));
                edges += 2;
            }
        }
        let graph_edges: usize = (2..simplifier.big.literal_count())
            .map(|index| simplifier.big.implied(Lit::from_index(index)).len())
            .sum();
        assert_eq!(graph_edges, edges);
    }

    #[test]
    fn idempotent() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[-1])).unwrap();
        simplifier.add_clause(lits(&[2, 3])).unwrap();

        assert!(simplifier.compress());
        let count = simplifier.var_count();
        let stack_len = simplifier.stack.len();

        assert!(!simplifier.compress());
        assert_eq!(simplifier.var_count(), count);
        assert_eq!(simplifier.stack.len(), stack_len);
    }

    #[test]
    fn labels_follow() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1])).unwrap();
        simplifier.set_label(1, -4);
        simplifier.set_label(3, 2);
        simplifier.add_clause(lits(&[2, 3])).unwrap();

        assert!(simplifier.compress());
        assert_eq!(simplifier.removed_weight, 4);
        assert_eq!(simplifier.labels().collect::<Vec<_>>(), vec![(2, 2)]);
        assert!(simplifier.is_frozen(2));
        assert!(!simplifier.is_frozen(1));
    }
}
