/*!
Occurrence lists, from literals to the clauses containing the literal.

The lists hold exactly the clauses which are not ignored, with the exception of the interval during which some technique rewrites a clause.
Order within a list is irrelevant, and removal swaps the last element of the list into place.

Occurrence counts are the lengths of the lists, and so are always consistent with the lists.
*/

use crate::{
    db::ClauseRef,
    structures::{
        literal::{literal_capacity, Lit},
        variable::Var,
    },
};

/// Occurrence lists indexed by literal.
#[derive(Clone, Debug, Default)]
pub struct OccurrenceDB {
    lists: Vec<Vec<ClauseRef>>,
}

impl OccurrenceDB {
    /// Ensures lists exist for every literal of variables `1..=var_count`.
    pub fn ensure(&mut self, var_count: Var) {
        let required = literal_capacity(var_count);
        if self.lists.len() < required {
            self.lists.resize_with(required, Vec::default);
        }
    }

    /// Shrinks to the literals of variables `1..=var_count`.
    pub fn truncate(&mut self, var_count: Var) {
        self.lists.truncate(literal_capacity(var_count));
    }

    /// Records `key` as an occurrence of each of `literals`.
    pub fn add(&mut self, key: ClauseRef, literals: &[Lit]) {
        for literal in literals {
            self.add_to(*literal, key);
        }
    }

    pub fn add_to(&mut self, literal: Lit, key: ClauseRef) {
        if self.lists.len() <= literal.index() {
            self.lists.resize_with(literal.index() + 1, Vec::default);
        }
        self.lists[literal.index()].push(key);
    }

    /// Removes `key` as an occurrence of each of `literals`.
    pub fn remove(&mut self, key: ClauseRef, literals: &[Lit]) {
        for literal in literals {
            self.remove_from(*literal, key);
        }
    }

    /// Removes `key` from the list of `literal`, returning true if `key` was present.
    pub fn remove_from(&mut self, literal: Lit, key: ClauseRef) -> bool {
        match self.lists.get_mut(literal.index()) {
            Some(list) => match list.iter().position(|k| *k == key) {
                Some(position) => {
                    list.swap_remove(position);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// The clauses containing `literal`.
    pub fn list(&self, literal: Lit) -> &[ClauseRef] {
        self.lists
            .get(literal.index())
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// Empties the list of `literal`, returning the previous list.
    pub fn take(&mut self, literal: Lit) -> Vec<ClauseRef> {
        match self.lists.get_mut(literal.index()) {
            Some(list) => std::mem::take(list),
            None => Vec::default(),
        }
    }

    /// A count of clauses containing `literal`.
    pub fn count(&self, literal: Lit) -> usize {
        self.list(literal).len()
    }

    /// A count of clauses containing either literal of `var`.
    pub fn var_count(&self, var: Var) -> usize {
        self.count(Lit::new(var, true)) + self.count(Lit::new(var, false))
    }
}

#[cfg(test)]
mod occurrence_tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn counts_follow_lists() {
        let mut keys: SlotMap<ClauseRef, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let b = keys.insert(());

        let p = Lit::from_dimacs(1);
        let q = Lit::from_dimacs(-2);

        let mut occurrences = OccurrenceDB::default();
        occurrences.ensure(2);
        occurrences.add(a, &[p, q]);
        occurrences.add(b, &[p]);

        assert_eq!(occurrences.count(p), 2);
        assert_eq!(occurrences.var_count(2), 1);

        assert!(occurrences.remove_from(p, a));
        assert!(!occurrences.remove_from(p, a));
        assert_eq!(occurrences.list(p), &[b]);
        assert_eq!(occurrences.count(Lit::from_dimacs(9)), 0);
    }
}
