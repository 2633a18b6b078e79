//! Literals are variables paired with a (boolean) polarity.
//!
//! A literal is packed into a single u32 as `2 * var + bit`, where the bit is `0` for the positive and `1` for the negative literal of a variable.
//! So:
//! - The complement of a literal flips only the low bit.
//! - The variable of a literal is independent of the polarity.
//! - The packed value is dense, and is used as the index of per-literal structures.
//!
//! ```rust
//! # use otter_simp::structures::literal::Lit;
//! let literal = Lit::from_dimacs(-7);
//!
//! assert_eq!(literal.var(), 7);
//! assert!(!literal.polarity());
//! assert_eq!(literal.index(), 15);
//!
//! assert_eq!(literal.negate(), Lit::new(7, true));
//! assert_eq!(literal.negate().negate(), literal);
//! assert_eq!(literal.as_dimacs(), -7);
//! ```
//!
//! Literals are ordered by their packed value, and so first by variable and then with the positive literal before the negative literal.

use crate::structures::variable::Var;

/// A literal, packed as `2 * var + bit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit(u32);

impl Lit {
    /// A fresh literal, specified by pairing a variable with a polarity.
    pub const fn new(var: Var, polarity: bool) -> Self {
        Lit(2 * var + (!polarity) as u32)
    }

    /// The literal from some signed DIMACS integer.
    ///
    /// The integer must be non-zero.
    pub fn from_dimacs(int: i64) -> Self {
        debug_assert!(int != 0, "Zero is not a DIMACS literal");
        Lit::new(int.unsigned_abs() as Var, int > 0)
    }

    /// The literal with the packed representation `index`.
    pub const fn from_index(index: usize) -> Self {
        Lit(index as u32)
    }

    /// The negation of the literal.
    pub const fn negate(self) -> Self {
        Lit(self.0 ^ 1)
    }

    /// The variable of the literal.
    pub const fn var(self) -> Var {
        self.0 >> 1
    }

    /// The polarity of the literal, true for a positive literal.
    pub const fn polarity(self) -> bool {
        self.0 & 1 == 0
    }

    /// The packed representation of the literal, for use as an index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The literal as a signed DIMACS integer.
    pub fn as_dimacs(self) -> i64 {
        match self.polarity() {
            true => self.var() as i64,
            false => -(self.var() as i64),
        }
    }

    /// The literal with the same polarity on `var`.
    pub fn with_var(self, var: Var) -> Self {
        Lit::new(var, self.polarity())
    }

    /// The literal with the polarity of `self` applied to `other`.
    ///
    /// That is, `other` if `self` is positive and the negation of `other` otherwise.
    pub fn apply_polarity(self, other: Lit) -> Self {
        match self.polarity() {
            true => other,
            false => other.negate(),
        }
    }
}

impl std::ops::Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_dimacs())
    }
}

/// The number of literal indices required for `var_count` variables.
///
/// Indices `0` and `1` belong to the unused zero variable.
pub fn literal_capacity(var_count: Var) -> usize {
    2 * (var_count as usize + 1)
}

#[cfg(test)]
mod literal_tests {
    use super::*;

    #[test]
    fn packing() {
        let p = Lit::new(2, true);
        let not_p = Lit::new(2, false);

        assert_eq!(p.index(), 4);
        assert_eq!(not_p.index(), 5);
        assert_eq!(-p, not_p);
        assert_eq!(p.var(), not_p.var());
    }

    #[test]
    fn apply_polarity() {
        let p = Lit::from_dimacs(3);
        let q = Lit::from_dimacs(-5);

        assert_eq!(p.apply_polarity(q), q);
        assert_eq!((-p).apply_polarity(q), -q);
    }

    #[test]
    fn order_by_var() {
        let mut literals = vec![Lit::from_dimacs(-2), Lit::from_dimacs(1), Lit::from_dimacs(2)];
        literals.sort();
        assert_eq!(
            literals.iter().map(|l| l.as_dimacs()).collect::<Vec<_>>(),
            vec![1, 2, -2]
        );
    }
}
