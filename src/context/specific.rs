use std::sync::{atomic::AtomicBool, Arc};

use crate::{
    config::Config,
    db::{big::ImplicationGraph, clause::ClauseDB, occurrence::OccurrenceDB},
    generic::{index_heap::IndexHeap, mark_array::MarkArray, minimal_pcg::MinimalPCG32},
    reconstruction::stack::PostprocessStack,
    structures::{assignment::Assignment, literal::Lit},
};

use rand::SeedableRng;

use super::{Budgets, Counters, GenericSimplifier, Solution};

/// A simplifier which uses [MinimalPCG32] as a source of randomness.
pub type Simplifier = GenericSimplifier<MinimalPCG32>;

impl Simplifier {
    /// Creates a simplifier from some given configuration.
    pub fn from_config(mut config: Config) -> Self {
        // Equivalences found by advanced stamping are applied through equivalence elimination.
        if config.unhide.value && config.unhide_advanced.value && config.unhide_ee.value {
            config.ee.value = true;
        }

        let rng = MinimalPCG32::seed_from_u64(config.seed.value);

        Self {
            budgets: Budgets::from_config(&config),
            counters: Counters::default(),

            clause_db: ClauseDB::default(),
            occurrences: OccurrenceDB::default(),
            big: ImplicationGraph::default(),
            assignment: Assignment::with_vars(0),
            stack: PostprocessStack::default(),

            eliminated: vec![false],
            equivalent_to: vec![Lit::new(0, true)],
            eq_replaced: vec![false],
            do_not_touch: vec![false],
            flippable: vec![false],

            propagation_q: Vec::default(),
            propagation_head: 0,
            subsumption_q: Vec::default(),

            bve_heap: IndexHeap::default(),
            bce_heap: IndexHeap::default(),
            marks: MarkArray::with_capacity(2),

            eq_do_analyze: Vec::default(),
            eq_initialised: false,

            solution: Solution::Unknown,

            var_count: 0,
            original_var_count: 0,

            label_weight: Default::default(),
            removed_weight: 0,
            top_weight: 0,

            interrupt: Arc::new(AtomicBool::new(false)),
            deadline: None,

            config,
            rng,
        }
    }
}
