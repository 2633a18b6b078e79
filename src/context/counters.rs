use std::time::Duration;

use crate::config::Config;

/// A budget of elementary checks.
///
/// Once exhausted a budget stays exhausted, and the technique owning the budget does nothing further.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Budget {
    remaining: u64,
}

impl Budget {
    pub fn new(limit: u64) -> Self {
        Budget { remaining: limit }
    }

    pub fn unlimited() -> Self {
        Budget {
            remaining: u64::MAX,
        }
    }

    pub fn spend(&mut self, checks: u64) {
        self.remaining = self.remaining.saturating_sub(checks);
    }

    pub fn exhausted(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

/// A budget for each technique with a limit.
#[derive(Clone, Debug)]
pub struct Budgets {
    pub subsumption: Budget,
    pub bve: Budget,
    pub ee: Budget,
    pub hte: Budget,
    pub bce: Budget,
    pub hbce: Budget,
    pub probe: Budget,
    pub probe_double: Budget,
    pub probe_binary: Budget,
    pub vivi: Budget,

    /// Rounds of unhiding, rather than checks.
    pub unhide: Budget,
}

impl Budgets {
    pub fn from_config(config: &Config) -> Self {
        let budget = |limit: u64| match config.unlimited.value {
            true => Budget::unlimited(),
            false => Budget::new(limit),
        };
        Budgets {
            subsumption: budget(config.subsumption_limit.value),
            bve: budget(config.bve_limit.value),
            ee: budget(config.ee_limit.value),
            hte: budget(config.hte_limit.value),
            bce: budget(config.bce_limit.value),
            hbce: budget(config.hbce_limit.value),
            probe: budget(config.probe_limit.value),
            probe_double: budget(config.probe_double_limit.value),
            probe_binary: budget(config.probe_binary_limit.value),
            vivi: budget(config.vivi_limit.value),
            unhide: budget(config.unhide_limit.value),
        }
    }
}

/// Counts for various things which count, roughly.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    /// Clauses removed, by any technique.
    pub removed_clauses: usize,

    /// Literals removed from clauses which were kept.
    pub removed_literals: usize,

    /// Literals fixed by some technique.
    pub units: usize,

    pub pure_literals: usize,
    pub subsumed: usize,
    pub strengthened: usize,

    pub eliminated_variables: usize,
    pub resolvents: usize,

    /// Variables replaced by some representative.
    pub equivalences: usize,

    pub hidden_tautologies: usize,
    pub hidden_literals: usize,
    pub blocked_clauses: usize,

    pub failed_literals: usize,
    pub hyper_binaries: usize,
    pub double_lookahead_binaries: usize,

    pub vivified_literals: usize,

    pub transitive_edges: usize,

    /// Variables removed by compression.
    pub compressed_variables: usize,

    /// Rounds of the driver.
    pub rounds: usize,

    /// The time taken during simplification.
    pub time: Duration,
}
