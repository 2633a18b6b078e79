/*!
Databases for holding information relevant to simplification.

- The [clause database](crate::db::clause) is an arena of clauses, each accessed through a [ClauseRef].
- The [occurrence database](crate::db::occurrence) records, for each literal, the clauses containing the literal.
- The [binary implication graph](crate::db::big) records the implications given by binary clauses.

The databases are kept independent of one another, and consistency between them is maintained by the [simplifier](crate::context::GenericSimplifier) through the methods of [maintenance](crate::preprocessing::maintenance).
*/

pub mod big;
pub mod clause;
mod keys;
pub mod occurrence;

pub use keys::ClauseRef;
