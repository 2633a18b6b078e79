/*!
Configuration of a simplifier.

All configuration of a [simplifier](crate::context::GenericSimplifier) is contained in a [Config], and each value is a [ConfigOption] which records the permitted range of the value.

Techniques are switched on or off individually, and each technique which may be expensive has a *limit*, a budget of elementary checks after which the technique does nothing further for the rest of the run.
If the [unlimited](Config::unlimited) switch is set limits are ignored.

Techniques are run either by a fixed fixpoint loop, or by a [schedule](schedule::Schedule) given as a string.

```rust
# use otter_simp::config::Config;
let mut config = Config::default();
config.techniques = Some("u[psv]+".to_string());
assert!(config.vivi_length_percent.set(50).is_ok());
assert!(config.unhide_hle.set(4).is_err());
```
*/

use std::str::FromStr;

use crate::types::err::ConfigError;

mod config_option;
pub use config_option::ConfigOption;

pub mod schedule;

mod technique;
pub use technique::Technique;

/// Default limits.
pub mod defaults {
    pub const SUBSUMPTION_LIMIT: u64 = 6_000_000;
    pub const BVE_LIMIT: u64 = 500_000;
    pub const EE_LIMIT: u64 = 5_000_000;
    pub const HTE_LIMIT: u64 = 1_000_000;
    pub const BCE_LIMIT: u64 = 300_000;
    pub const HBCE_LIMIT: u64 = 100_000;
    pub const PROBE_LIMIT: u64 = 100_000;
    pub const PROBE_DOUBLE_LIMIT: u64 = 30_000;
    pub const PROBE_BINARY_LIMIT: u64 = 10_000;
    pub const VIVI_LIMIT: u64 = 5_000_000;
    pub const UNHIDE_LIMIT: u64 = 2;

    /// Formulas with more variables are passed through untouched.
    pub const VARIABLE_LIMIT: u32 = 2_000_000;

    /// Formulas with more clauses are passed through untouched.
    pub const CLAUSE_LIMIT: usize = 20_000_000;
}

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// A schedule of techniques, if any, otherwise a fixed fixpoint loop is used.
    pub techniques: Option<String>,

    /// Unit propagation.
    pub up: ConfigOption<bool>,

    /// Pure literal elimination.
    pub pure: ConfigOption<bool>,

    /// Subsumption and self-subsuming resolution.
    pub subsumption: ConfigOption<bool>,
    pub subsumption_limit: ConfigOption<u64>,

    /// Bounded variable elimination.
    pub bve: ConfigOption<bool>,

    /// Detect definitional (binary) gates during elimination.
    pub bve_gates: ConfigOption<bool>,

    /// Detect if-then-else gates during elimination.
    pub bve_ite_gates: ConfigOption<bool>,

    /// Detect XOR gates during elimination.
    pub bve_xor_gates: ConfigOption<bool>,

    /// Strengthen clauses with resolvents which subsume one of their antecedents.
    pub bve_otfss: ConfigOption<bool>,

    /// When an elimination is rejected.
    /// - 0: if the count of clauses grows.
    /// - 1: if the count of literals grows.
    /// - 2: if either grows.
    pub bve_shrink: ConfigOption<u8>,
    pub bve_limit: ConfigOption<u64>,

    /// Equivalence elimination.
    pub ee: ConfigOption<bool>,

    /// Run equivalence elimination after variable elimination, rather than before, in the fixpoint loop.
    pub ee_behind_bve: ConfigOption<bool>,
    pub ee_limit: ConfigOption<u64>,

    /// Hidden tautology elimination.
    pub hte: ConfigOption<bool>,
    pub hte_limit: ConfigOption<u64>,

    /// Blocked clause elimination.
    pub bce: ConfigOption<bool>,
    pub bce_limit: ConfigOption<u64>,

    /// Use hidden literal addition during blocked clause elimination.
    pub hbce: ConfigOption<bool>,
    pub hbce_limit: ConfigOption<u64>,

    /// Failed literal probing.
    pub probe: ConfigOption<bool>,

    /// The maximum number of second level look-ahead candidates for each probe, with 0 disabling double look-ahead.
    pub probe_double: ConfigOption<u32>,

    /// Lazy hyper-binary resolution while probing.
    pub probe_lhbr: ConfigOption<bool>,

    /// Also probe a random literal implied by each probed literal.
    pub probe_binary: ConfigOption<bool>,
    pub probe_limit: ConfigOption<u64>,
    pub probe_double_limit: ConfigOption<u64>,
    pub probe_binary_limit: ConfigOption<u64>,

    /// Vivification.
    pub vivi: ConfigOption<bool>,

    /// Only clauses with length at least this percentage of the longest clause are vivified.
    pub vivi_length_percent: ConfigOption<u32>,
    pub vivi_limit: ConfigOption<u64>,

    /// Unhiding.
    pub unhide: ConfigOption<bool>,

    /// Rounds of stamping for each call.
    pub unhide_iterations: ConfigOption<u32>,

    /// Remove transitive edges while stamping.
    pub unhide_transitive: ConfigOption<bool>,

    /// Advanced stamping, which finds equivalences.
    pub unhide_advanced: ConfigOption<bool>,

    /// Hidden literal elimination after stamping.
    /// - 0: off.
    /// - 1: check positive order.
    /// - 2: check negative order.
    /// - 3: check both.
    pub unhide_hle: ConfigOption<u8>,

    /// Hidden tautology elimination after stamping.
    pub unhide_hte: ConfigOption<bool>,

    /// Keep the order of roots and adjacency lists, rather than shuffling.
    pub unhide_no_shuffle: ConfigOption<bool>,

    /// Apply equivalences found by stamping.
    pub unhide_ee: ConfigOption<bool>,

    /// Rounds of unhiding before the limit is reached.
    pub unhide_limit: ConfigOption<u64>,

    /// Renumber variables contiguously at the end of simplification.
    pub compress: ConfigOption<bool>,

    /// Randomised choices, seeded by [seed](Config::seed).
    pub randomized: ConfigOption<bool>,
    pub seed: ConfigOption<u64>,

    /// Ignore all limits.
    pub unlimited: ConfigOption<bool>,

    /// Formulas with more variables are passed through untouched.
    pub variable_limit: ConfigOption<u32>,

    /// Formulas with more clauses are passed through untouched.
    pub clause_limit: ConfigOption<usize>,

    /// The time limit for simplification.
    pub time_limit: Option<std::time::Duration>,

    /// The number of models reconstruction may give when elimination leaves a choice, with -1 for all.
    pub solutions: ConfigOption<i64>,

    /// Report a formula with no clauses as satisfiable, with free variables set false.
    pub fast_sat: ConfigOption<bool>,
}

impl Default for Config {
    fn default() -> Self {
        use defaults::*;
        Config {
            techniques: None,

            up: ConfigOption::switch("up", true),
            pure: ConfigOption::switch("pure", true),

            subsumption: ConfigOption::switch("subsumption", true),
            subsumption_limit: ConfigOption::limit("subsumption_limit", SUBSUMPTION_LIMIT),

            bve: ConfigOption::switch("bve", true),
            bve_gates: ConfigOption::switch("bve_gates", true),
            bve_ite_gates: ConfigOption::switch("bve_ite_gates", false),
            bve_xor_gates: ConfigOption::switch("bve_xor_gates", false),
            bve_otfss: ConfigOption::switch("bve_otfss", false),
            bve_shrink: ConfigOption {
                name: "bve_shrink",
                min: 0,
                max: 2,
                value: 0,
            },
            bve_limit: ConfigOption::limit("bve_limit", BVE_LIMIT),

            ee: ConfigOption::switch("ee", true),
            ee_behind_bve: ConfigOption::switch("ee_behind_bve", false),
            ee_limit: ConfigOption::limit("ee_limit", EE_LIMIT),

            hte: ConfigOption::switch("hte", true),
            hte_limit: ConfigOption::limit("hte_limit", HTE_LIMIT),

            bce: ConfigOption::switch("bce", true),
            bce_limit: ConfigOption::limit("bce_limit", BCE_LIMIT),
            hbce: ConfigOption::switch("hbce", false),
            hbce_limit: ConfigOption::limit("hbce_limit", HBCE_LIMIT),

            probe: ConfigOption::switch("probe", true),
            probe_double: ConfigOption {
                name: "probe_double",
                min: 0,
                max: 64,
                value: 4,
            },
            probe_lhbr: ConfigOption::switch("probe_lhbr", true),
            probe_binary: ConfigOption::switch("probe_binary", true),
            probe_limit: ConfigOption::limit("probe_limit", PROBE_LIMIT),
            probe_double_limit: ConfigOption::limit("probe_double_limit", PROBE_DOUBLE_LIMIT),
            probe_binary_limit: ConfigOption::limit("probe_binary_limit", PROBE_BINARY_LIMIT),

            vivi: ConfigOption::switch("vivi", true),
            vivi_length_percent: ConfigOption {
                name: "vivi_length_percent",
                min: 0,
                max: 100,
                value: 70,
            },
            vivi_limit: ConfigOption::limit("vivi_limit", VIVI_LIMIT),

            unhide: ConfigOption::switch("unhide", true),
            unhide_iterations: ConfigOption {
                name: "unhide_iterations",
                min: 1,
                max: u32::MAX,
                value: 2,
            },
            unhide_transitive: ConfigOption::switch("unhide_transitive", false),
            unhide_advanced: ConfigOption::switch("unhide_advanced", true),
            unhide_hle: ConfigOption {
                name: "unhide_hle",
                min: 0,
                max: 3,
                value: 3,
            },
            unhide_hte: ConfigOption::switch("unhide_hte", true),
            unhide_no_shuffle: ConfigOption::switch("unhide_no_shuffle", false),
            unhide_ee: ConfigOption::switch("unhide_ee", true),
            unhide_limit: ConfigOption::limit("unhide_limit", UNHIDE_LIMIT),

            compress: ConfigOption::switch("compress", false),

            randomized: ConfigOption::switch("randomized", false),
            seed: ConfigOption::limit("seed", 0),

            unlimited: ConfigOption::switch("unlimited", false),

            variable_limit: ConfigOption {
                name: "variable_limit",
                min: 0,
                max: u32::MAX,
                value: VARIABLE_LIMIT,
            },
            clause_limit: ConfigOption {
                name: "clause_limit",
                min: 0,
                max: usize::MAX,
                value: CLAUSE_LIMIT,
            },

            time_limit: None,

            solutions: ConfigOption {
                name: "solutions",
                min: -1,
                max: i64::MAX,
                value: 1,
            },

            fast_sat: ConfigOption::switch("fast_sat", true),
        }
    }
}

impl Config {
    /// The schedule of techniques, if any.
    pub fn schedule(&self) -> Result<Option<schedule::Schedule>, crate::types::err::ScheduleError> {
        match &self.techniques {
            Some(techniques) => Ok(Some(techniques.parse()?)),
            None => Ok(None),
        }
    }

    /// Sets the option called `name` from the text `value`.
    ///
    /// ```rust
    /// # use otter_simp::config::Config;
    /// let mut config = Config::default();
    /// assert!(config.set_option("bve_shrink", "2").is_ok());
    /// assert!(config.set_option("hbce", "true").is_ok());
    /// assert!(config.set_option("unhide_hle", "7").is_err());
    /// assert!(config.set_option("glue", "2").is_err());
    /// ```
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        fn parsed<T: FromStr>(option: &ConfigOption<T>, value: &str) -> Result<T, ConfigError> {
            value.parse().map_err(|_| ConfigError::OutOfRange(option.name))
        }

        fn switch(option: &mut ConfigOption<bool>, value: &str) -> Result<(), ConfigError> {
            match value {
                "1" | "true" | "on" => option.set(true),
                "0" | "false" | "off" => option.set(false),
                _ => Err(ConfigError::OutOfRange(option.name)),
            }
        }

        macro_rules! number {
            ( $option:expr ) => {{
                let value = parsed(&$option, value)?;
                $option.set(value)
            }};
        }

        match name {
            "techniques" => {
                self.techniques = Some(value.to_string());
                Ok(())
            }

            "up" => switch(&mut self.up, value),
            "pure" => switch(&mut self.pure, value),
            "subsumption" => switch(&mut self.subsumption, value),
            "bve" => switch(&mut self.bve, value),
            "bve_gates" => switch(&mut self.bve_gates, value),
            "bve_ite_gates" => switch(&mut self.bve_ite_gates, value),
            "bve_xor_gates" => switch(&mut self.bve_xor_gates, value),
            "bve_otfss" => switch(&mut self.bve_otfss, value),
            "ee" => switch(&mut self.ee, value),
            "ee_behind_bve" => switch(&mut self.ee_behind_bve, value),
            "hte" => switch(&mut self.hte, value),
            "bce" => switch(&mut self.bce, value),
            "hbce" => switch(&mut self.hbce, value),
            "probe" => switch(&mut self.probe, value),
            "probe_lhbr" => switch(&mut self.probe_lhbr, value),
            "probe_binary" => switch(&mut self.probe_binary, value),
            "vivi" => switch(&mut self.vivi, value),
            "unhide" => switch(&mut self.unhide, value),
            "unhide_transitive" => switch(&mut self.unhide_transitive, value),
            "unhide_advanced" => switch(&mut self.unhide_advanced, value),
            "unhide_hte" => switch(&mut self.unhide_hte, value),
            "unhide_no_shuffle" => switch(&mut self.unhide_no_shuffle, value),
            "unhide_ee" => switch(&mut self.unhide_ee, value),
            "compress" => switch(&mut self.compress, value),
            "randomized" => switch(&mut self.randomized, value),
            "unlimited" => switch(&mut self.unlimited, value),
            "fast_sat" => switch(&mut self.fast_sat, value),

            "subsumption_limit" => number!(self.subsumption_limit),
            "bve_shrink" => number!(self.bve_shrink),
            "bve_limit" => number!(self.bve_limit),
            "ee_limit" => number!(self.ee_limit),
            "hte_limit" => number!(self.hte_limit),
            "bce_limit" => number!(self.bce_limit),
            "hbce_limit" => number!(self.hbce_limit),
            "probe_double" => number!(self.probe_double),
            "probe_limit" => number!(self.probe_limit),
            "probe_double_limit" => number!(self.probe_double_limit),
            "probe_binary_limit" => number!(self.probe_binary_limit),
            "vivi_length_percent" => number!(self.vivi_length_percent),
            "vivi_limit" => number!(self.vivi_limit),
            "unhide_iterations" => number!(self.unhide_iterations),
            "unhide_hle" => number!(self.unhide_hle),
            "unhide_limit" => number!(self.unhide_limit),
            "seed" => number!(self.seed),
            "variable_limit" => number!(self.variable_limit),
            "clause_limit" => number!(self.clause_limit),
            "solutions" => number!(self.solutions),

            "time_limit" => {
                let micros: u64 = value.parse().map_err(|_| ConfigError::OutOfRange("time_limit"))?;
                self.time_limit = Some(std::time::Duration::from_micros(micros));
                Ok(())
            }

            _ => {
                log::error!("Unknown option {name}");
                Err(ConfigError::UnknownOption(name.to_string()))
            }
        }
    }

    /// True if `technique` is switched on.
    pub fn enabled(&self, technique: Technique) -> bool {
        match technique {
            Technique::Propagation => self.up.value,
            Technique::Pure => self.pure.value,
            Technique::Subsumption => self.subsumption.value,
            Technique::Bve => self.bve.value,
            Technique::Equivalence => self.ee.value,
            Technique::Hte => self.hte.value,
            Technique::Bce => self.bce.value,
            Technique::Probing => self.probe.value,
            Technique::Vivification => self.vivi.value,
            Technique::Unhiding => self.unhide.value,
        }
    }
}
