/*!
Reconstruction of models of the original formula from models of the simplified formula.

Each transformation which changes the models of the formula pushes an entry to the [stack](stack), and reconstruction replays the stack in reverse:
- A [blocked clause](stack::StackEntry::BlockedClause) which is not satisfied has the literal it was blocked on set true.
- An [eliminated](stack::StackEntry::Eliminated) variable is set to satisfy the first of its clauses which is not otherwise satisfied.
  If every clause is satisfied either value works, and both models are kept if further [solutions](crate::config::Config::solutions) are wanted.
- A variable [merged](stack::StackEntry::EquivalenceRound) into some literal takes the value of the literal.
- A [compression](stack::StackEntry::Compression) expands the model to the old variables and adds the literals fixed before compression.

The stack may be written to (and read from) a [map file](map_file), so reconstruction can happen in some other process.

# Example
```rust
# use otter_simp::context::Simplifier;
# use otter_simp::config::Config;
# use otter_simp::structures::{assignment::Assignment, literal::Lit};
let mut simplifier = Simplifier::from_config(Config::default());
for clause in [[1, 2], [-1, 3]] {
    let clause: Vec<Lit> = clause.iter().map(|i| Lit::from_dimacs(*i)).collect();
    simplifier.add_clause(clause).unwrap();
}
simplifier.freeze(2);
simplifier.freeze(3);

assert!(simplifier.eliminate_variable(1, false));

let mut model = Assignment::with_vars(3);
model.set(Lit::from_dimacs(-2));
model.set(Lit::from_dimacs(3));

let models = simplifier.postprocess(&model);
assert_eq!(models[0].value_of(1), Some(true));
```
*/

pub mod map_file;
pub mod stack;

use std::collections::BTreeMap;

use stack::StackEntry;

use crate::{
    context::GenericSimplifier,
    misc::log::targets::{self},
    structures::{assignment::Assignment, clause::Clause, literal::Lit, variable::Var},
};

/// Replays `entries` in reverse on `model`.
///
/// At most `solutions` models are returned, or every model if `solutions` is negative, though always at least one.
pub fn reconstruct(entries: &[StackEntry], model: Assignment, solutions: i64) -> Vec<Assignment> {
    let mut finished = Vec::default();
    let mut pending = vec![(model, entries.len())];

    while let Some((mut model, mut position)) = pending.pop() {
        while position > 0 {
            position -= 1;
            match &entries[position] {
                StackEntry::BlockedClause { literal, clause } => {
                    if !clause.satisfied_on(&model) {
                        model.set(*literal);
                    }
                }

                StackEntry::Eliminated { var, clauses } => {
                    model.clear(*var);
                    let forced = clauses.iter().find_map(|clause| {
                        let mut own = None;
                        for literal in clause {
                            if literal.var() == *var {
                                own = Some(*literal);
                            } else if model.is_true(*literal) {
                                return None;
                            }
                        }
                        own
                    });

                    match forced {
                        Some(literal) => model.set(literal),
                        None => {
                            let found = finished.len() + pending.len() + 1;
                            if solutions < 0 || (found as i64) < solutions {
                                let mut other = model.clone();
                                other.set_value(*var, false);
                                pending.push((other, position));
                            }
                            model.set_value(*var, true);
                        }
                    }
                }

                StackEntry::EquivalenceRound { merged } => {
                    for (var, literal) in merged {
                        if let Some(value) = model.value_of(literal.var()) {
                            model.set_value(*var, value == literal.polarity());
                        }
                    }
                }

                StackEntry::Compression(table) => {
                    let mut expanded = Assignment::with_vars(table.variables);
                    for (new, old) in table.inverse.iter().enumerate().skip(1) {
                        if let Some(value) = model.value_of(new as Var) {
                            expanded.set_value(*old, value);
                        }
                    }
                    for unit in &table.units {
                        expanded.set(*unit);
                    }
                    model = expanded;
                }
            }
        }
        finished.push(model);
    }

    log::debug!(target: targets::RECONSTRUCTION, "Reconstructed {} models", finished.len());
    finished
}

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Models of the original formula, from a model of the simplified formula.
    ///
    /// Literals fixed by simplification are added to the model first, and so need not be part of the model.
    /// Variables with no value in any model of the original formula are left without a value.
    pub fn postprocess(&self, model: &Assignment) -> Vec<Assignment> {
        let mut model = model.clone();
        for literal in self.assignment.true_literals() {
            model.set(literal);
        }

        let mut models = reconstruct(self.stack.entries(), model, self.config.solutions.value);
        for model in &mut models {
            model.extend(self.original_var_count);
        }
        models
    }

    /// Models of the original formula, from a model of the simplified formula, with every variable given a value.
    ///
    /// A variable without a value takes the preferred polarity of the label on the variable, if any, and is false otherwise.
    /// Variables of the simplified formula are given a value before reconstruction, so equivalences hold in every model.
    pub fn complete_models(&self, model: &Assignment) -> Vec<Assignment> {
        let mut model = model.clone();
        model.extend(self.var_count);
        for var in 1..=self.var_count {
            if model.is_undef(var) && self.assignment.is_undef(var) {
                let preferred = self.label_weight.get(&var).is_some_and(|weight| *weight > 0);
                model.set_value(var, preferred);
            }
        }

        let labels = self.original_labels();
        let mut models = self.postprocess(&model);
        for model in &mut models {
            for var in 1..=self.original_var_count {
                if model.is_undef(var) {
                    let preferred = labels.get(&var).is_some_and(|weight| *weight > 0);
                    model.set_value(var, preferred);
                }
            }
        }
        models
    }

    /// The variable of the original formula which `var` was renumbered from, if any.
    pub fn original_var(&self, var: Var) -> Option<Var> {
        let mut var = var;
        for entry in self.stack.entries().iter().rev() {
            if let StackEntry::Compression(table) = entry {
                var = table.old_var(var)?;
            }
        }
        Some(var)
    }

    /// Labels of the formula, over the variables of the original formula.
    pub fn original_labels(&self) -> BTreeMap<Var, i64> {
        self.label_weight
            .iter()
            .filter_map(|(var, weight)| self.original_var(*var).map(|original| (original, *weight)))
            .collect()
    }

    /// The weight removed by simplification, including the weight of labels fixed against their preferred polarity.
    pub fn total_removed_weight(&self) -> i64 {
        self.removed_weight + self.falsified_label_weight()
    }
}

/// The assignment which makes each of `literals` true.
pub fn assignment_from(literals: &[Lit]) -> Assignment {
    let mut assignment = Assignment::default();
    for literal in literals {
        assignment.set(*literal);
    }
    assignment
}

#[cfg(test)]
mod reconstruction_tests {
    use super::*;
    use crate::reconstruction::stack::CompressionTable;

    fn lits(ints: &[i64]) -> Vec<Lit> {
        ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
    }

    #[test]
    fn blocked_clause_repaired() {
        let entries = vec![StackEntry::BlockedClause {
            literal: Lit::from_dimacs(1),
            clause: lits(&[1, 2]),
        }];
        let models = reconstruct(&entries, assignment_from(&lits(&[-1, -2])), 1);
        assert!(models[0].is_true(Lit::from_dimacs(1)));

        let models = reconstruct(&entries, assignment_from(&lits(&[-1, 2])), 1);
        assert!(models[0].is_false(Lit::from_dimacs(1)));
    }

    #[test]
    fn elimination_with_choice() {
        let entries = vec![StackEntry::Eliminated {
            var: 1,
            clauses: vec![lits(&[1, 2]), lits(&[-1, 3])],
        }];
        let model = assignment_from(&lits(&[2, 3]));

        assert_eq!(reconstruct(&entries, model.clone(), 1).len(), 1);

        let models = reconstruct(&entries, model, -1);
        assert_eq!(models.len(), 2);
        let mut values: Vec<_> = models.iter().map(|m| m.value_of(1)).collect();
        values.sort();
        assert_eq!(values, vec![Some(false), Some(true)]);
    }

    #[test]
    fn elimination_forced() {
        let entries = vec![StackEntry::Eliminated {
            var: 1,
            clauses: vec![lits(&[1, 2]), lits(&[-1, 3])],
        }];
        let models = reconstruct(&entries, assignment_from(&lits(&[-2, 3])), -1);
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].value_of(1), Some(true));
    }

    #[test]
    fn equivalence_then_compression() {
        let entries = vec![
            StackEntry::EquivalenceRound {
                merged: vec![(2, Lit::from_dimacs(-1))],
            },
            StackEntry::Compression(CompressionTable {
                variables: 3,
                inverse: vec![0, 1],
                units: lits(&[3]),
                equivalences: Vec::default(),
            }),
        ];
        let models = reconstruct(&entries, assignment_from(&lits(&[1])), 1);
        assert_eq!(models[0].true_literals().collect::<Vec<_>>(), lits(&[1, -2, 3]));
    }
}
