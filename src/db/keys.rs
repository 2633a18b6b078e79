//! Keys to access stored clauses.

slotmap::new_key_type! {
    /// A key to access a clause stored in the [clause database](crate::db::clause::ClauseDB).
    ///
    /// Keys are generational: when the slot of a released clause is reused the key of the released clause remains distinct from the key of the new clause.
    /// The default (null) key is never issued by the database.
    pub struct ClauseRef;
}
