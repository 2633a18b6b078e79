/*!
The binary implication graph.

For each binary clause `[a, b]` the graph has the edges `¬a → b` and `¬b → a`.
So, the graph is closed under contraposition, and any path from `l` to `k` in the graph has a mirror path from `¬k` to `¬l`.

Edges are held in per-literal adjacency lists.
Duplicate binary clauses give duplicate edges, and removing a binary clause removes a single copy of each edge.

```rust
# use otter_simp::db::big::ImplicationGraph;
# use otter_simp::structures::literal::Lit;
let mut big = ImplicationGraph::default();
let (a, b) = (Lit::from_dimacs(1), Lit::from_dimacs(-2));
big.add_clause(a, b);

assert_eq!(big.implied(-a), &[b]);
assert_eq!(big.implied(-b), &[a]);

big.remove_clause(a, b);
assert!(big.implied(-a).is_empty());
```
*/

use crate::structures::{
    literal::{literal_capacity, Lit},
    variable::Var,
};

/// Adjacency lists of implications between literals.
#[derive(Clone, Debug, Default)]
pub struct ImplicationGraph {
    adjacency: Vec<Vec<Lit>>,
}

impl ImplicationGraph {
    /// Ensures adjacency lists exist for every literal of variables `1..=var_count`.
    pub fn ensure(&mut self, var_count: Var) {
        let required = literal_capacity(var_count);
        if self.adjacency.len() < required {
            self.adjacency.resize_with(required, Vec::default);
        }
    }

    pub fn truncate(&mut self, var_count: Var) {
        self.adjacency.truncate(literal_capacity(var_count));
    }

    fn list_mut(&mut self, literal: Lit) -> &mut Vec<Lit> {
        if self.adjacency.len() <= literal.index() {
            self.adjacency
                .resize_with((literal.index() | 1) + 1, Vec::default);
        }
        &mut self.adjacency[literal.index()]
    }

    /// Adds the edges of the binary clause `[a, b]`.
    pub fn add_clause(&mut self, a: Lit, b: Lit) {
        self.list_mut(a.negate()).push(b);
        self.list_mut(b.negate()).push(a);
    }

    /// Removes (one copy of) the edges of the binary clause `[a, b]`.
    pub fn remove_clause(&mut self, a: Lit, b: Lit) {
        self.remove_edge(a.negate(), b);
        self.remove_edge(b.negate(), a);
    }

    /// Removes one copy of the edge `from → to`, returning true if an edge was removed.
    pub fn remove_edge(&mut self, from: Lit, to: Lit) -> bool {
        match self.adjacency.get_mut(from.index()) {
            Some(list) => match list.iter().position(|l| *l == to) {
                Some(position) => {
                    list.swap_remove(position);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Removes every edge to or from either literal of the variable of `literal`.
    pub fn remove_variable(&mut self, literal: Lit) {
        for side in [literal, literal.negate()] {
            let implied = match self.adjacency.get_mut(side.index()) {
                Some(list) => std::mem::take(list),
                None => continue,
            };
            // Each edge side → k has the mirror ¬k → ¬side.
            for k in implied {
                self.remove_edge(k.negate(), side.negate());
            }
        }
    }

    /// The literals directly implied by `literal`.
    pub fn implied(&self, literal: Lit) -> &[Lit] {
        self.adjacency
            .get(literal.index())
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// Mutable access to the literals directly implied by `literal`, for reordering.
    pub fn implied_mut(&mut self, literal: Lit) -> &mut Vec<Lit> {
        self.list_mut(literal)
    }

    /// True if the graph has some edge `from → to`.
    pub fn has_edge(&self, from: Lit, to: Lit) -> bool {
        self.implied(from).contains(&to)
    }

    /// The number of literal indicies the graph ranges over.
    pub fn literal_count(&self) -> usize {
        self.adjacency.len()
    }
}
