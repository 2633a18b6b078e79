//! A struct holding a clause and associated flags.
//!
//! The literals of a stored clause are kept sorted and free of duplicates.
//! Mutation of the literals goes through [DbClause] methods to ensure this, and the subsumption signature is refreshed on each mutation.

use crate::structures::{
    clause::{CClause, Clause},
    literal::Lit,
};

/// Flags of a stored clause.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClauseFlags {
    /// The clause is implied by the formula and may be dropped without loss.
    pub learnt: bool,

    /// The clause is logically deleted, though still occupies a slot in the database.
    pub ignored: bool,

    /// The clause has been marked for removal by some technique.
    pub to_delete: bool,

    /// The clause is part of an XOR constraint.
    pub is_xor: bool,

    /// The clause should be kept regardless of activity.
    pub keep_me: bool,
}

/// A clause together with its flags and a subsumption signature.
#[derive(Clone, Debug)]
pub struct DbClause {
    literals: CClause,
    flags: ClauseFlags,
    signature: u64,
}

/// The signature of some literals, setting one bit per variable modulo 64.
pub fn signature(literals: &[Lit]) -> u64 {
    literals
        .iter()
        .fold(0, |signature, literal| signature | 1 << (literal.var() & 63))
}

impl DbClause {
    /// A fresh clause, with literals sorted and deduplicated.
    pub fn new(mut literals: CClause, learnt: bool) -> Self {
        literals.sort_unstable();
        literals.dedup();
        let signature = signature(&literals);
        DbClause {
            literals,
            flags: ClauseFlags {
                learnt,
                ..Default::default()
            },
            signature,
        }
    }

    pub fn size(&self) -> usize {
        self.literals.len()
    }

    pub fn flags(&self) -> ClauseFlags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut ClauseFlags {
        &mut self.flags
    }

    pub fn is_learnt(&self) -> bool {
        self.flags.learnt
    }

    pub fn is_ignored(&self) -> bool {
        self.flags.ignored
    }

    pub fn signature(&self) -> u64 {
        self.signature
    }

    /// Removes `literal` from the clause, returning true if the literal was present.
    pub fn remove_literal(&mut self, literal: Lit) -> bool {
        match self.literals.binary_search(&literal) {
            Ok(position) => {
                self.literals.remove(position);
                self.signature = signature(&self.literals);
                true
            }
            Err(_) => false,
        }
    }

    /// Replaces the literals of the clause.
    pub fn set_literals(&mut self, mut literals: CClause) {
        literals.sort_unstable();
        literals.dedup();
        self.signature = signature(&literals);
        self.literals = literals;
    }

    /// Takes the literals of the clause, leaving the clause empty.
    pub fn take_literals(&mut self) -> CClause {
        self.signature = 0;
        std::mem::take(&mut self.literals)
    }
}

impl Clause for DbClause {
    fn literals(&self) -> &[Lit] {
        &self.literals
    }
}

#[cfg(test)]
mod db_clause_tests {
    use super::*;

    #[test]
    fn sorted_on_creation() {
        let clause = DbClause::new(
            vec![Lit::from_dimacs(3), Lit::from_dimacs(-1), Lit::from_dimacs(3)],
            false,
        );
        assert_eq!(clause.as_dimacs(false), "-1 3");
        assert_eq!(clause.signature(), (1 << 1) | (1 << 3));
    }

    #[test]
    fn removal_refreshes_signature() {
        let mut clause = DbClause::new(vec![Lit::from_dimacs(1), Lit::from_dimacs(2)], false);
        assert!(clause.remove_literal(Lit::from_dimacs(2)));
        assert!(!clause.remove_literal(Lit::from_dimacs(-1)));
        assert_eq!(clause.signature(), 1 << 1);
    }
}
