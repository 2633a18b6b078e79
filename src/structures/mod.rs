//! Key structures, such as variables, literals, clauses, and assignments.
//!
//! ## Formulas
//!
//! A formula 𝐅 is a set of [clauses](clause), interpreted as the conjunction of those clauses.
//! Within a [simplifier](crate::context) the formula is the collection of clauses in the [clause database](crate::db::clause) which are not ignored.
//!
//! ## Variables and literals
//!
//! Variables are positive integers, and literals pair a variable with a polarity.
//! Internally a literal is a single unsigned integer, so literals may be used directly as indices of per-literal structures such as [occurrence lists](crate::db::occurrence).

pub mod assignment;
pub mod clause;
pub mod literal;
pub mod variable;
