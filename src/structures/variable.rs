/*!
(The internal representation of) a variable.

Each variable is a u32 *v* with *v* > 0.
Zero is never a variable, and the zero index of a per-variable structure is unused.

This allows variables to be used as the indices of a structure without translation, e.g. `eliminated[v]`.

```rust
# use otter_simp::structures::variable::{Var, NO_VAR};
let vars = (1..=4).collect::<Vec<Var>>();
assert!(!vars.contains(&NO_VAR));
```
*/

/// A variable.
pub type Var = u32;

/// The reserved zero variable, which is never part of a formula.
pub const NO_VAR: Var = 0;
