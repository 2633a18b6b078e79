/*!
The stack of transformations.

Each transformation which changes the models of the formula (rather than only the clauses) pushes an entry to the stack.
Entries are only ever pushed, and are replayed in reverse order by [postprocess](crate::context::GenericSimplifier::postprocess).
*/

use crate::structures::{clause::CClause, literal::Lit, variable::Var};

/// A table to reverse the renumbering of variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompressionTable {
    /// The number of variables before renumbering.
    pub variables: Var,

    /// For each new variable, the old variable, with the zero index unused.
    pub inverse: Vec<Var>,

    /// Literals fixed before renumbering, over the old variables.
    pub units: Vec<Lit>,

    /// The equivalence forest before renumbering, indexed by old variable.
    pub equivalences: Vec<Lit>,
}

impl CompressionTable {
    /// The old variable of `var`, if any.
    pub fn old_var(&self, var: Var) -> Option<Var> {
        self.inverse.get(var as usize).copied().filter(|v| *v != 0)
    }
}

/// A transformation, with the information required to reverse the transformation.
///
/// Conversion of 1-of-N constraints is not a transformation of this crate, so no entry is produced for one, and a `convert` entry of a map file is skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackEntry {
    /// `clause` was removed as blocked on `literal`.
    BlockedClause { literal: Lit, clause: CClause },

    /// `var` was eliminated, and `clauses` are the clauses of `var` before elimination.
    Eliminated { var: Var, clauses: Vec<CClause> },

    /// Each variable was merged into the paired literal, which is equivalent to the positive literal of the variable.
    EquivalenceRound { merged: Vec<(Var, Lit)> },

    /// Variables were renumbered.
    Compression(CompressionTable),
}

/// The stack of transformations.
#[derive(Clone, Debug, Default)]
pub struct PostprocessStack {
    entries: Vec<StackEntry>,
}

impl PostprocessStack {
    pub fn push(&mut self, entry: StackEntry) {
        self.entries.push(entry)
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }

    /// The most recent compression table, if any.
    pub fn last_compression(&self) -> Option<&CompressionTable> {
        self.entries.iter().rev().find_map(|entry| match entry {
            StackEntry::Compression(table) => Some(table),
            _ => None,
        })
    }
}
