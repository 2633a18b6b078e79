/*!
The simplifier --- to which formulas are added and within which simplification takes place.

Strictly, a [GenericSimplifier] and a [Simplifier].

The generic simplifier is generic over the source of randomness, while [from_config](Simplifier::from_config) is implemented for a simplifier to avoid requiring a source of randomness to be supplied alongside a config.

All state of simplification lives in the simplifier: the clause database and the indicies kept alongside it, the assignment, the equivalence forest, the stack of transformations used for reconstruction, and so on.
Techniques are methods on the simplifier, and so each technique has exclusive (mutable) access to the state for as long as the technique runs.

# Example
```rust
# use otter_simp::context::{Simplifier, Solution};
# use otter_simp::config::Config;
# use otter_simp::structures::literal::Lit;
let mut simplifier = Simplifier::from_config(Config::default());

let p = Lit::from_dimacs(1);
let q = Lit::from_dimacs(2);

assert!(simplifier.add_clause(vec![p, q]).is_ok());
assert!(simplifier.add_clause(vec![-p]).is_ok());

assert!(simplifier.preprocess().is_ok());
assert_eq!(simplifier.solution(), Solution::Satisfiable);
assert_eq!(simplifier.assignment.value_of(q.var()), Some(true));
```
*/

mod counters;
pub use counters::{Budget, Budgets, Counters};
mod generic;
pub use generic::GenericSimplifier;
mod specific;
pub use specific::Simplifier;

/// What is known about the satisfiability of the formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Solution {
    /// Simplification did not decide the formula.
    Unknown,

    /// The formula is satisfiable, and simplification found a model.
    Satisfiable,

    /// The formula is unsatisfiable.
    Unsatisfiable,
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "s UNKNOWN"),
            Self::Satisfiable => write!(f, "s SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "s UNSATISFIABLE"),
        }
    }
}
