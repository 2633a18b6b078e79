/*!
A (partial) function from variables to truth values, together with a backup polarity for each variable.

The canonical representation is a vector of optional booleans indexed by variable, where the zero index is unused.
- `values[v] = Some(true)` *if and only if* v is assigned true.
- `values[v] = Some(false)` *if and only if* v is assigned false.
- `values[v] = None` *if and only if* v is unassigned.

The backup polarity records the last value given to a variable, and survives [clearing](Assignment::clear) a variable.

```rust
# use otter_simp::structures::assignment::Assignment;
# use otter_simp::structures::literal::Lit;
let mut assignment = Assignment::with_vars(3);
assignment.set(Lit::from_dimacs(-2));

assert!(assignment.is_true(Lit::from_dimacs(-2)));
assert!(assignment.is_false(Lit::from_dimacs(2)));
assert!(assignment.is_undef(3));

assignment.clear(2);
assert!(assignment.is_undef(2));
assert!(!assignment.backup(2));
```
*/

use crate::structures::{literal::Lit, variable::Var};

/// A partial assignment with backup polarities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<Option<bool>>,
    backup: Vec<bool>,
}

impl Assignment {
    /// An empty assignment over variables `1..=var_count`.
    pub fn with_vars(var_count: Var) -> Self {
        Assignment {
            values: vec![None; var_count as usize + 1],
            backup: vec![false; var_count as usize + 1],
        }
    }

    /// The number of variables the assignment ranges over.
    pub fn var_count(&self) -> Var {
        (self.values.len().saturating_sub(1)) as Var
    }

    /// Extends the assignment to range over variables `1..=var_count`, if required.
    pub fn extend(&mut self, var_count: Var) {
        if self.values.len() <= var_count as usize {
            self.values.resize(var_count as usize + 1, None);
            self.backup.resize(var_count as usize + 1, false);
        }
    }

    /// Shrinks the assignment to range over variables `1..=var_count`.
    pub fn truncate(&mut self, var_count: Var) {
        self.values.truncate(var_count as usize + 1);
        self.backup.truncate(var_count as usize + 1);
    }

    /// The value of `var`, if any.
    /// Variables outside the range of the assignment have no value.
    pub fn value_of(&self, var: Var) -> Option<bool> {
        self.values.get(var as usize).copied().flatten()
    }

    /// True if `literal` is true.
    pub fn is_true(&self, literal: Lit) -> bool {
        self.value_of(literal.var()) == Some(literal.polarity())
    }

    /// True if `literal` is false.
    pub fn is_false(&self, literal: Lit) -> bool {
        self.value_of(literal.var()) == Some(!literal.polarity())
    }

    /// True if `var` has no value.
    pub fn is_undef(&self, var: Var) -> bool {
        self.value_of(var).is_none()
    }

    /// Makes `literal` true, extending the assignment if required.
    pub fn set(&mut self, literal: Lit) {
        self.extend(literal.var());
        self.values[literal.var() as usize] = Some(literal.polarity());
        self.backup[literal.var() as usize] = literal.polarity();
    }

    /// Sets the value of `var`, extending the assignment if required.
    pub fn set_value(&mut self, var: Var, value: bool) {
        self.set(Lit::new(var, value))
    }

    /// Removes the value of `var`, if any.
    pub fn clear(&mut self, var: Var) {
        if let Some(value) = self.values.get_mut(var as usize) {
            *value = None;
        }
    }

    /// The backup polarity of `var`.
    pub fn backup(&self, var: Var) -> bool {
        self.backup.get(var as usize).copied().unwrap_or(false)
    }

    /// Sets the backup polarity of `var`, without assigning a value.
    pub fn set_backup(&mut self, var: Var, polarity: bool) {
        self.extend(var);
        self.backup[var as usize] = polarity;
    }

    /// The true literals of the assignment, in order of variable.
    pub fn true_literals(&self) -> impl Iterator<Item = Lit> + '_ {
        self.values
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(var, value)| value.map(|polarity| Lit::new(var as Var, polarity)))
    }

    /// The unassigned variables, in order.
    pub fn unassigned(&self) -> impl Iterator<Item = Var> + '_ {
        self.values
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, value)| value.is_none())
            .map(|(var, _)| var as Var)
    }

    /// The assignment as a string of DIMACS literals, with unassigned variables omitted.
    pub fn as_dimacs(&self) -> String {
        let mut the_string = String::default();
        for literal in self.true_literals() {
            the_string.push_str(&format!("{literal} "));
        }
        the_string.pop();
        the_string
    }
}
