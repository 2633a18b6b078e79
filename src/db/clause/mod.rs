/*!
A database of clauses.

Clauses are stored in a [slot map](slotmap::SlotMap) and accessed through a [ClauseRef].
So, keys are stable across growth of the database and slots of released clauses are reused.

A clause is removed in two steps:
1. The clause is [ignored](ClauseDB::ignore), after which the clause is logically deleted though still occupies a slot.
2. Ignored clauses are [collected](ClauseDB::collect_garbage), releasing their slots.

Collection is left to the simplifier, typically when the [wasted fraction](ClauseDB::wasted_fraction) of the database crosses [GC_THRESHOLD].

```rust
# use otter_simp::db::clause::ClauseDB;
# use otter_simp::structures::literal::Lit;
let mut clause_db = ClauseDB::default();
let key = clause_db.create(vec![Lit::from_dimacs(1), Lit::from_dimacs(-2)], false).unwrap();

clause_db.ignore(key);
assert_eq!(clause_db.live_count(), 0);
assert_eq!(clause_db.collect_garbage(), 1);
assert!(clause_db.get(key).is_err());
```
*/

pub mod db_clause;

use db_clause::DbClause;
use slotmap::SlotMap;

use crate::{
    db::ClauseRef,
    misc::log::targets::{self},
    structures::clause::CClause,
    types::err::{self},
};

/// The fraction of ignored clauses above which garbage should be collected.
pub const GC_THRESHOLD: f64 = 0.1;

/// A database of clauses.
#[derive(Default)]
pub struct ClauseDB {
    clauses: SlotMap<ClauseRef, DbClause>,
    ignored_count: usize,
}

impl ClauseDB {
    /// Stores a clause, returning the key to the clause.
    ///
    /// The literals are sorted and deduplicated, though tautologies are not checked for.
    pub fn create(&mut self, literals: CClause, learnt: bool) -> Result<ClauseRef, err::ClauseDBError> {
        if literals.is_empty() {
            log::error!(target: targets::CLAUSE_DB, "Attempt to store an empty clause");
            return Err(err::ClauseDBError::EmptyClause);
        }
        Ok(self.clauses.insert(DbClause::new(literals, learnt)))
    }

    /// The clause with key `key`.
    pub fn get(&self, key: ClauseRef) -> Result<&DbClause, err::ClauseDBError> {
        self.clauses.get(key).ok_or(err::ClauseDBError::Missing)
    }

    /// The clause with key `key`, mutably.
    pub fn get_mut(&mut self, key: ClauseRef) -> Result<&mut DbClause, err::ClauseDBError> {
        self.clauses.get_mut(key).ok_or(err::ClauseDBError::Missing)
    }

    /// True if `key` is the key to some clause which has not been ignored.
    pub fn is_live(&self, key: ClauseRef) -> bool {
        self.clauses.get(key).is_some_and(|clause| !clause.is_ignored())
    }

    /// Marks the clause as ignored.
    /// Returns true if the clause was not already ignored.
    pub fn ignore(&mut self, key: ClauseRef) -> bool {
        match self.clauses.get_mut(key) {
            Some(clause) if !clause.is_ignored() => {
                clause.flags_mut().ignored = true;
                self.ignored_count += 1;
                true
            }
            _ => false,
        }
    }

    /// Releases the slot of a clause, returning the clause.
    pub fn release(&mut self, key: ClauseRef) -> Option<DbClause> {
        let clause = self.clauses.remove(key)?;
        if clause.is_ignored() {
            self.ignored_count -= 1;
        }
        Some(clause)
    }

    /// Releases every ignored clause, returning a count of the clauses released.
    pub fn collect_garbage(&mut self) -> usize {
        let before = self.clauses.len();
        self.clauses.retain(|_, clause| !clause.is_ignored());
        let released = before - self.clauses.len();
        log::trace!(target: targets::CLAUSE_DB, "Released {released} clauses");
        self.ignored_count = 0;
        released
    }

    /// The fraction of stored clauses which are ignored.
    pub fn wasted_fraction(&self) -> f64 {
        match self.clauses.len() {
            0 => 0.0,
            total => self.ignored_count as f64 / total as f64,
        }
    }

    /// A count of stored clauses which are not ignored.
    pub fn live_count(&self) -> usize {
        self.clauses.len() - self.ignored_count
    }

    /// Keys and clauses which are not ignored, in a stable order.
    pub fn live(&self) -> impl Iterator<Item = (ClauseRef, &DbClause)> {
        self.clauses.iter().filter(|(_, clause)| !clause.is_ignored())
    }

    /// Keys of clauses which are not ignored.
    pub fn live_keys(&self) -> Vec<ClauseRef> {
        self.live().map(|(key, _)| key).collect()
    }

    /// Releases every clause.
    pub fn clear(&mut self) {
        self.clauses.clear();
        self.ignored_count = 0;
    }
}

impl std::ops::Index<ClauseRef> for ClauseDB {
    type Output = DbClause;

    fn index(&self, key: ClauseRef) -> &Self::Output {
        &self.clauses[key]
    }
}

impl std::ops::IndexMut<ClauseRef> for ClauseDB {
    fn index_mut(&mut self, key: ClauseRef) -> &mut Self::Output {
        &mut self.clauses[key]
    }
}

#[cfg(test)]
mod clause_db_tests {
    use super::*;
    use crate::structures::{clause::Clause, literal::Lit};

    fn lits(ints: &[i64]) -> CClause {
        ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
    }

    #[test]
    fn empty_rejected() {
        let mut clause_db = ClauseDB::default();
        assert_eq!(
            clause_db.create(vec![], false),
            Err(err::ClauseDBError::EmptyClause)
        );
    }

    #[test]
    fn keys_are_not_null() {
        let mut clause_db = ClauseDB::default();
        let key = clause_db.create(lits(&[1, 2]), false).unwrap();
        assert_ne!(key, ClauseRef::default());
    }

    #[test]
    fn stale_keys_after_reuse() {
        let mut clause_db = ClauseDB::default();
        let a = clause_db.create(lits(&[1, 2]), false).unwrap();
        clause_db.ignore(a);
        clause_db.collect_garbage();

        let b = clause_db.create(lits(&[3, 4]), false).unwrap();
        assert_ne!(a, b);
        assert!(clause_db.get(a).is_err());
        assert_eq!(clause_db[b].as_dimacs(false), "3 4");
    }

    #[test]
    fn wasted_fraction() {
        let mut clause_db = ClauseDB::default();
        let keys: Vec<_> = (1..=10)
            .map(|i| clause_db.create(lits(&[i, i + 1]), false).unwrap())
            .collect();
        assert!(clause_db.ignore(keys[0]));
        assert!(!clause_db.ignore(keys[0]));
        assert!((clause_db.wasted_fraction() - 0.1).abs() < f64::EPSILON);
        assert_eq!(clause_db.live_count(), 9);
        assert_eq!(clause_db.live_keys().len(), 9);
    }
}
