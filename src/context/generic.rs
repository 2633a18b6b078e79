use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

use crate::{
    config::Config,
    db::{big::ImplicationGraph, clause::ClauseDB, occurrence::OccurrenceDB, ClauseRef},
    generic::{index_heap::IndexHeap, mark_array::MarkArray},
    misc::log::targets::{self},
    reconstruction::stack::PostprocessStack,
    structures::{
        assignment::Assignment,
        clause::{normalize, CClause, Normalized},
        literal::{literal_capacity, Lit},
        variable::Var,
    },
    types::err::{self},
};

use super::{Budgets, Counters, Solution};

/// A generic simplifier, paramaterised to a source of randomness.
///
/// Requires a source of [rng](rand::Rng) which (also) implements [Default].
///
/// # Example
///
/// ```rust
/// # use otter_simp::context::GenericSimplifier;
/// # use otter_simp::generic::minimal_pcg::MinimalPCG32;
/// # use otter_simp::config::Config;
/// let simplifier = GenericSimplifier::<MinimalPCG32>::from_config(Config::default());
/// ```
pub struct GenericSimplifier<R: rand::Rng + std::default::Default> {
    /// The configuration of the simplifier.
    pub config: Config,

    /// Counters related to simplification.
    pub counters: Counters,

    /// Budgets of the techniques.
    pub budgets: Budgets,

    /// The clause database.
    /// See [db::clause](crate::db::clause) for details.
    pub clause_db: ClauseDB,

    /// Occurrence lists of the clauses in the clause database.
    pub occurrences: OccurrenceDB,

    /// The binary implication graph of the binary clauses in the clause database.
    pub big: ImplicationGraph,

    /// The fixed literals.
    pub assignment: Assignment,

    /// The stack of transformations, for reconstruction.
    pub stack: PostprocessStack,

    /// Variables removed by elimination.
    pub(crate) eliminated: Vec<bool>,

    /// The equivalence forest, with a variable pointing to itself (positively) as a root.
    pub(crate) equivalent_to: Vec<Lit>,

    /// Variables replaced by their representative throughout the clause database.
    pub(crate) eq_replaced: Vec<bool>,

    /// Variables no technique may eliminate, merge, or reassign.
    pub(crate) do_not_touch: Vec<bool>,

    /// Variables some blocked clause was removed on, whose value reconstruction may flip.
    /// These are never merged, so the equivalence forest may be replayed whole.
    pub(crate) flippable: Vec<bool>,

    /// Literals to propagate, with the head of the queue at `propagation_head`.
    pub(crate) propagation_q: Vec<Lit>,
    pub(crate) propagation_head: usize,

    /// Clauses to check for subsumption and strengthening.
    pub(crate) subsumption_q: Vec<ClauseRef>,

    /// Candidate variables for elimination, by occurrence count.
    pub(crate) bve_heap: IndexHeap<usize>,

    /// Candidate variables for blocked clause elimination, by occurrence count.
    pub(crate) bce_heap: IndexHeap<usize>,

    /// General purpose marks.
    pub(crate) marks: MarkArray,

    /// Literals of new binary clauses, from which equivalence elimination searches.
    pub(crate) eq_do_analyze: Vec<Lit>,

    /// Whether equivalence elimination has searched the whole graph.
    pub(crate) eq_initialised: bool,

    pub(crate) solution: Solution,

    pub(crate) var_count: Var,
    pub(crate) original_var_count: Var,

    /// Label variables of soft clauses, with signed weight.
    /// A negative weight prefers the variable false.
    pub(crate) label_weight: BTreeMap<Var, i64>,

    /// Weight of soft clauses falsified by simplification.
    pub removed_weight: i64,

    /// The weight of hard clauses.
    pub top_weight: u64,

    pub(crate) interrupt: Arc<AtomicBool>,
    pub(crate) deadline: Option<Instant>,

    /// The source of rng.
    pub rng: R,
}

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// What is known about the satisfiability of the formula.
    pub fn solution(&self) -> Solution {
        self.solution
    }

    /// Records the formula as unsatisfiable.
    pub(crate) fn set_unsatisfiable(&mut self, target: &str) {
        if self.solution != Solution::Unsatisfiable {
            log::info!(target: target, "Unsatisfiable");
        }
        self.solution = Solution::Unsatisfiable;
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.solution == Solution::Unsatisfiable
    }

    /// The number of variables of the (current) formula.
    pub fn var_count(&self) -> Var {
        self.var_count
    }

    /// The number of variables of the formula as given, before any compression.
    pub fn original_var_count(&self) -> Var {
        self.original_var_count
    }

    /// Ensures all structures range over variables `1..=var_count`.
    pub fn ensure_vars(&mut self, var_count: Var) {
        if var_count <= self.var_count {
            return;
        }
        let required = var_count as usize + 1;
        self.assignment.extend(var_count);
        self.eliminated.resize(required, false);
        self.eq_replaced.resize(required, false);
        self.do_not_touch.resize(required, false);
        self.flippable.resize(required, false);
        for var in self.equivalent_to.len()..required {
            self.equivalent_to.push(Lit::new(var as Var, true));
        }
        self.occurrences.ensure(var_count);
        self.big.ensure(var_count);
        self.marks.ensure(literal_capacity(var_count));
        for var in self.var_count + 1..=var_count {
            self.bve_heap.add(var as usize, 0);
            self.bce_heap.add(var as usize, 0);
        }
        self.var_count = var_count;
        self.original_var_count = self.original_var_count.max(var_count);
    }

    /// A fresh variable.
    pub fn fresh_var(&mut self) -> Var {
        let var = self.var_count + 1;
        self.ensure_vars(var);
        var
    }

    /// Marks `var` as a variable no technique may eliminate, merge, or reassign.
    pub fn freeze(&mut self, var: Var) {
        self.ensure_vars(var);
        self.do_not_touch[var as usize] = true;
    }

    pub fn is_frozen(&self, var: Var) -> bool {
        self.do_not_touch.get(var as usize).copied().unwrap_or(false)
    }

    pub fn is_eliminated(&self, var: Var) -> bool {
        self.eliminated.get(var as usize).copied().unwrap_or(false)
    }

    pub fn is_flippable(&self, var: Var) -> bool {
        self.flippable.get(var as usize).copied().unwrap_or(false)
    }

    pub fn is_replaced(&self, var: Var) -> bool {
        self.eq_replaced.get(var as usize).copied().unwrap_or(false)
    }

    /// True if some technique may change the value or the clauses of `var`.
    pub(crate) fn is_active(&self, var: Var) -> bool {
        self.assignment.is_undef(var)
            && !self.is_eliminated(var)
            && !self.is_replaced(var)
            && !self.is_frozen(var)
    }

    /// Labels `var` as the variable of a soft clause with the given (signed) weight.
    /// The variable is also frozen.
    pub fn set_label(&mut self, var: Var, weight: i64) {
        self.freeze(var);
        self.label_weight.insert(var, weight);
    }

    /// Labels, with signed weight.
    pub fn labels(&self) -> impl Iterator<Item = (Var, i64)> + '_ {
        self.label_weight.iter().map(|(var, weight)| (*var, *weight))
    }

    /// The weight of labels fixed against their preferred polarity.
    pub fn falsified_label_weight(&self) -> i64 {
        self.label_weight
            .iter()
            .filter(|(var, weight)| match self.assignment.value_of(**var) {
                Some(value) => value != (**weight > 0),
                None => false,
            })
            .map(|(_, weight)| weight.abs())
            .sum()
    }

    /// A handle to the interrupt flag.
    /// Setting the flag ends simplification at the next check, leaving a valid (partial) simplification.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupt.clone()
    }

    /// True if simplification should stop, due to an interrupt or the time limit.
    pub(crate) fn out_of_time(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// The representative of `literal` in the equivalence forest, compressing the path to the representative.
    pub fn representative(&mut self, literal: Lit) -> Lit {
        let mut root = Lit::new(literal.var(), true);
        while let Some(next) = self.equivalent_to.get(root.var() as usize).copied() {
            if next.var() == root.var() {
                break;
            }
            root = root.apply_polarity(next);
        }

        // Compression, each variable on the path points straight to the root.
        let mut current = literal.var();
        let mut polarity_root = root;
        while let Some(next) = self.equivalent_to.get(current as usize).copied() {
            if next.var() == current {
                break;
            }
            self.equivalent_to[current as usize] = polarity_root;
            polarity_root = next.apply_polarity(polarity_root);
            current = next.var();
        }

        literal.apply_polarity(root)
    }

    /// Adds a clause to the formula.
    ///
    /// The clause is normalised, and:
    /// - A tautology is skipped.
    /// - A unit clause fixes the value of the literal.
    /// - An empty clause makes the formula unsatisfiable.
    pub fn add_clause(&mut self, clause: impl Into<CClause>) -> Result<(), err::ErrorKind> {
        self.add_clause_with(clause.into(), false)
    }

    /// Adds a clause to the formula, marked as learnt.
    ///
    /// A learnt clause is implied by the other clauses of the formula, and so is not kept when some variable of the clause is eliminated.
    pub fn add_learnt_clause(&mut self, clause: impl Into<CClause>) -> Result<(), err::ErrorKind> {
        self.add_clause_with(clause.into(), true)
    }

    fn add_clause_with(&mut self, clause: CClause, learnt: bool) -> Result<(), err::ErrorKind> {
        if let Some(max) = clause.iter().map(|literal| literal.var()).max() {
            self.ensure_vars(max);
        }
        let clause: CClause = clause.into_iter().map(|l| self.representative(l)).collect();
        match normalize(clause) {
            Normalized::Tautology => Ok(()),
            Normalized::Clause(clause) => {
                self.add_normalized(clause, learnt)?;
                Ok(())
            }
        }
    }

    /// Stores a normalised clause, returning the key if a clause was stored.
    ///
    /// Literals fixed false are dropped and a clause satisfied by the assignment is skipped.
    pub(crate) fn add_normalized(
        &mut self,
        mut clause: CClause,
        learnt: bool,
    ) -> Result<Option<ClauseRef>, err::ClauseDBError> {
        if clause.iter().any(|l| self.assignment.is_true(*l)) {
            return Ok(None);
        }
        clause.retain(|l| !self.assignment.is_false(*l));
        match clause.len() {
            0 => {
                self.set_unsatisfiable(targets::CLAUSE_DB);
                Ok(None)
            }
            1 => {
                self.enqueue(clause[0]);
                Ok(None)
            }
            _ => Ok(Some(self.store_clause(clause, learnt)?)),
        }
    }

    /// Fixes the value of `literal`, queuing the literal for propagation.
    ///
    /// If the literal is false the formula is unsatisfiable.
    /// If the variable of the literal has been replaced, the representative is fixed first.
    pub fn enqueue(&mut self, literal: Lit) {
        if self.assignment.is_true(literal) {
            return;
        }
        if self.assignment.is_false(literal) {
            self.set_unsatisfiable(targets::PROPAGATION);
            return;
        }
        let representative = self.representative(literal);
        if representative != literal {
            self.enqueue(representative);
            if self.is_unsatisfiable() {
                return;
            }
        }
        log::trace!(target: targets::PROPAGATION, "Fixed {literal}");
        self.assignment.set(literal);
        self.propagation_q.push(literal);
        self.counters.units += 1;
    }

    /// The clauses of the (current) formula, without fixed literals.
    pub fn clauses(&self) -> impl Iterator<Item = &[Lit]> {
        use crate::structures::clause::Clause;
        self.clause_db.live().map(|(_, clause)| clause.literals())
    }
}
