/*!
Tools for building a simplifier, and for writing the simplified formula.

# Basic methods

A formula is built in a simplifier through three methods:
- [add_clause](crate::context::GenericSimplifier::add_clause), to add a (hard) clause.
- [set_label](crate::context::GenericSimplifier::set_label), to mark a variable as the label of a soft clause with some weight.
- [freeze](crate::context::GenericSimplifier::freeze), to keep a variable away from every technique.

A labelled variable is frozen, and so the labels of a formula are preserved through simplification.

# Formulas from files

[read_dimacs](crate::context::GenericSimplifier::read_dimacs) reads a CNF or (weighted) WCNF formula:
- Every clause of a CNF formula is hard, as is every clause of a WCNF formula with the top weight.
- A soft unit clause labels the variable of the literal directly.
- Any other soft clause is extended with a fresh blocking variable, which is labelled.

[write_wcnf](crate::context::GenericSimplifier::write_wcnf) writes the simplified formula, with the labels as soft unit clauses.

```rust
# use otter_simp::context::Simplifier;
# use otter_simp::config::Config;
let mut simplifier = Simplifier::from_config(Config::default());

let wcnf = b"p wcnf 3 4 10
10 1 2 0
10 -1 3 0
4 -3 0
2 -2 3 0
";

assert!(simplifier.read_dimacs(wcnf.as_slice()).is_ok());
assert_eq!(simplifier.var_count(), 4);
assert_eq!(simplifier.labels().collect::<Vec<_>>(), vec![(3, -4), (4, -2)]);
```
*/

mod dimacs;
pub use dimacs::ParseSummary;

mod write;
