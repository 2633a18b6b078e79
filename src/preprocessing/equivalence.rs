/*!
Equivalence elimination.

Literals in a strongly connected component of the [binary implication graph](crate::db::big) imply one another, and so are equivalent.
Components are found with (an iterative rendition of) Tarjan's algorithm, and each component is merged into the equivalence forest, with the literal of least variable as the representative.
If a component holds a literal together with the complement of the literal, the formula is unsatisfiable.

After merging, each literal of a replaced variable is rewritten to the representative throughout the clause database.
Tautologies given by the rewrite are removed and duplicate literals collapsed.

Frozen variables are never merged, and neither are variables some blocked clause was removed on.

The first search covers the whole graph, later searches start from the literals of binary clauses added since the previous search.
*/

use crate::{
    context::{Budget, GenericSimplifier},
    db::big::ImplicationGraph,
    misc::log::targets::{self},
    reconstruction::stack::StackEntry,
    structures::{
        clause::{normalize, CClause, Clause, Normalized},
        literal::Lit,
        variable::Var,
    },
};

/// The strongly connected components with more than one literal reachable from `starts`.
///
/// If the budget is exhausted during the search the components found so far are returned.
pub fn strongly_connected_components(
    big: &ImplicationGraph,
    starts: impl IntoIterator<Item = Lit>,
    budget: &mut Budget,
) -> Vec<Vec<Lit>> {
    let count = big.literal_count();
    let mut index = vec![0_usize; count];
    let mut low = vec![0_usize; count];
    let mut on_stack = vec![false; count];
    let mut stack: Vec<Lit> = Vec::default();
    let mut work: Vec<(Lit, usize)> = Vec::default();
    let mut counter = 1;
    let mut components = Vec::default();

    for start in starts {
        if start.index() >= count || index[start.index()] != 0 {
            continue;
        }

        index[start.index()] = counter;
        low[start.index()] = counter;
        counter += 1;
        stack.push(start);
        on_stack[start.index()] = true;
        work.push((start, 0));

        while let Some((node, child)) = work.last().copied() {
            if budget.exhausted() {
                return components;
            }

            match big.implied(node).get(child).copied() {
                Some(next) => {
                    budget.spend(1);
                    if let Some(top) = work.last_mut() {
                        top.1 += 1;
                    }
                    if index[next.index()] == 0 {
                        index[next.index()] = counter;
                        low[next.index()] = counter;
                        counter += 1;
                        stack.push(next);
                        on_stack[next.index()] = true;
                        work.push((next, 0));
                    } else if on_stack[next.index()] {
                        low[node.index()] = low[node.index()].min(index[next.index()]);
                    }
                }

                None => {
                    work.pop();
                    if let Some((parent, _)) = work.last() {
                        low[parent.index()] = low[parent.index()].min(low[node.index()]);
                    }
                    if low[node.index()] == index[node.index()] {
                        let mut component = Vec::default();
                        while let Some(literal) = stack.pop() {
                            on_stack[literal.index()] = false;
                            component.push(literal);
                            if literal == node {
                                break;
                            }
                        }
                        if component.len() > 1 {
                            components.push(component);
                        }
                    }
                }
            }
        }
    }

    components
}

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Finds and applies equivalences of literals.
    ///
    /// Returns true if some variable was replaced.
    pub fn equivalence_elimination(&mut self) -> bool {
        if self.budgets.ee.exhausted() {
            return false;
        }

        let starts: Vec<Lit> = match self.eq_initialised {
            false => {
                self.eq_initialised = true;
                self.eq_do_analyze.clear();
                (2..self.big.literal_count()).map(Lit::from_index).collect()
            }
            true => std::mem::take(&mut self.eq_do_analyze)
                .into_iter()
                .flat_map(|l| [l, l.negate()])
                .collect(),
        };

        let components = strongly_connected_components(&self.big, starts, &mut self.budgets.ee);

        let mut merged = Vec::default();
        for component in components {
            self.add_equivalences(&component, &mut merged);
            if self.is_unsatisfiable() {
                return true;
            }
        }

        if merged.is_empty() {
            return false;
        }
        log::info!(target: targets::EQUIVALENCE, "Merged {} literals", merged.len());
        self.apply_equivalences(merged);
        true
    }

    /// The strongly connected components of the whole implication graph, with more than one literal.
    pub fn implication_components(&self) -> Vec<Vec<Lit>> {
        let starts = (2..self.big.literal_count()).map(Lit::from_index);
        strongly_connected_components(&self.big, starts, &mut Budget::unlimited())
    }

    /// Merges the literals of `class` in the equivalence forest, recording replaced literals in `merged`.
    ///
    /// Frozen, fixed, eliminated, and flippable variables are skipped.
    pub(crate) fn add_equivalences(&mut self, class: &[Lit], merged: &mut Vec<Lit>) {
        let mut representatives: Vec<Lit> = Vec::with_capacity(class.len());
        for literal in class {
            let representative = self.representative(*literal);
            let var = representative.var();
            if self.is_frozen(var)
                || self.is_flippable(var)
                || self.is_eliminated(var)
                || !self.assignment.is_undef(var)
            {
                continue;
            }
            representatives.push(representative);
        }
        representatives.sort_unstable();

        let Some(target) = representatives.first().copied() else {
            return;
        };

        for representative in representatives.into_iter().skip(1) {
            if representative.var() == target.var() {
                if representative != target {
                    log::info!(target: targets::EQUIVALENCE, "{target} is equivalent to its complement");
                    self.set_unsatisfiable(targets::EQUIVALENCE);
                    return;
                }
                continue;
            }
            let var = representative.var();
            log::trace!(target: targets::EQUIVALENCE, "{representative} replaced by {target}");
            self.equivalent_to[var as usize] = representative.apply_polarity(target);
            self.eq_replaced[var as usize] = true;
            self.counters.equivalences += 1;
            merged.push(representative);
        }
    }

    /// Rewrites the clauses of replaced variables in `merged` to their representatives, and fixes the values of equivalent variables.
    pub(crate) fn apply_equivalences(&mut self, merged: Vec<Lit>) {
        for var in 1..=self.var_count {
            if self.equivalent_to[var as usize].var() == var {
                continue;
            }
            let representative = self.representative(Lit::new(var, true));
            match (self.assignment.value_of(var), self.assignment.value_of(representative.var())) {
                (Some(value), None) => self.enqueue(Lit::new(var, value).apply_polarity(representative)),
                (None, Some(_)) => {
                    let value = self.assignment.is_true(representative);
                    self.enqueue(Lit::new(var, value));
                }
                (Some(value), Some(_)) => {
                    if self.assignment.is_false(Lit::new(var, value).apply_polarity(representative)) {
                        self.set_unsatisfiable(targets::EQUIVALENCE);
                    }
                }
                (None, None) => {}
            }
            if self.is_unsatisfiable() {
                return;
            }
        }

        let vars: Vec<Var> = merged.iter().map(|l| l.var()).collect();
        for var in vars {
            for literal in [Lit::new(var, true), Lit::new(var, false)] {
                for key in self.occurrences.list(literal).to_vec() {
                    if !self.clause_db.is_live(key) {
                        continue;
                    }
                    let literals = self.clause_db[key].literals().to_vec();
                    let rewritten: CClause =
                        literals.into_iter().map(|l| self.representative(l)).collect();
                    match normalize(rewritten) {
                        Normalized::Tautology => self.remove_clause(key),
                        Normalized::Clause(clause) => self.replace_literals(key, clause),
                    }
                    if self.is_unsatisfiable() {
                        return;
                    }
                }
            }
        }

        if merged.is_empty() {
            self.propagate();
            return;
        }
        let merged = merged
            .iter()
            .map(|literal| (literal.var(), self.representative(Lit::new(literal.var(), true))))
            .collect();
        self.stack.push(StackEntry::EquivalenceRound { merged });
        self.propagate();
    }
}

#[cfg(test)]
mod equivalence_tests {
    use crate::{
        config::Config,
        context::Simplifier,
        structures::{clause::Clause, literal::Lit},
    };

    fn lits(ints: &[i64]) -> Vec<Lit> {
        ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
    }

    #[test]
    fn cycle_merged() {
        let mut simplifier = Simplifier::from_config(Config::default());
        // 1 → 2 → 3 → 1
        simplifier.add_clause(lits(&[-1, 2])).unwrap();
        simplifier.add_clause(lits(&[-2, 3])).unwrap();
        simplifier.add_clause(lits(&[-3, 1])).unwrap();
        simplifier.add_clause(lits(&[2, 4, 5])).unwrap();
        simplifier.add_clause(lits(&[-3, -4, 6])).unwrap();

        assert!(simplifier.equivalence_elimination());
        assert!(simplifier.is_replaced(2));
        assert!(simplifier.is_replaced(3));
        assert_eq!(simplifier.representative(Lit::from_dimacs(-3)), Lit::from_dimacs(-1));

        let mut clauses: Vec<String> = simplifier.clauses().map(|c| c.as_dimacs(false)).collect();
        clauses.sort();
        assert_eq!(clauses, vec!["-1 -4 6", "1 4 5"]);
    }

    #[test]
    fn complement_in_component() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[1, 2])).unwrap();
        simplifier.add_clause(lits(&[-1, 2])).unwrap();
        simplifier.add_clause(lits(&[1, -2])).unwrap();
        simplifier.add_clause(lits(&[-1, -2])).unwrap();

        simplifier.equivalence_elimination();
        assert!(simplifier.is_unsatisfiable());
    }

    #[test]
    fn frozen_not_merged() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[-1, 2])).unwrap();
        simplifier.add_clause(lits(&[-2, 1])).unwrap();
        simplifier.freeze(1);

        assert!(!simplifier.equivalence_elimination());
        assert!(!simplifier.is_replaced(2));
    }

    #[test]
    fn flippable_not_merged() {
        let mut simplifier = Simplifier::from_config(Config::default());
        for clause in [[-1, 2], [-2, 1], [-2, 3], [-3, 2]] {
            simplifier.add_clause(lits(&clause)).unwrap();
        }
        simplifier.flippable[3] = true;

        assert!(simplifier.equivalence_elimination());
        assert!(simplifier.is_replaced(2));
        assert!(!simplifier.is_replaced(1));
        assert!(!simplifier.is_replaced(3));
    }
}
