/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library, with a target for each technique.
So, for example, `RUST_LOG=bve=trace` with a logger such as `env_logger` shows each variable elimination and nothing else.

Note, no log implementation is provided by the library.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [unit propagation](crate::preprocessing::propagation)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [pure literals](crate::preprocessing::pure)
    pub const PURE: &str = "pure";

    /// Logs related to [subsumption](crate::preprocessing::subsumption)
    pub const SUBSUMPTION: &str = "subsumption";

    /// Logs related to [variable elimination](crate::preprocessing::bve)
    pub const BVE: &str = "bve";

    /// Logs related to [equivalence elimination](crate::preprocessing::equivalence)
    pub const EQUIVALENCE: &str = "equivalence";

    /// Logs related to [hidden tautology elimination](crate::preprocessing::hte)
    pub const HTE: &str = "hte";

    /// Logs related to [blocked clause elimination](crate::preprocessing::bce)
    pub const BCE: &str = "bce";

    /// Logs related to [probing](crate::preprocessing::probing)
    pub const PROBING: &str = "probing";

    /// Logs related to [vivification](crate::preprocessing::vivification)
    pub const VIVIFICATION: &str = "vivification";

    /// Logs related to [unhiding](crate::preprocessing::unhiding)
    pub const UNHIDING: &str = "unhiding";

    /// Logs related to [compression](crate::preprocessing::compression)
    pub const COMPRESSION: &str = "compression";

    /// Logs related to the [clause database](crate::db::clause)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to the driver loop
    pub const PREPROCESSING: &str = "preprocessing";

    /// Logs related to [model reconstruction](crate::reconstruction)
    pub const RECONSTRUCTION: &str = "reconstruction";

    /// Logs related to [map files](crate::reconstruction::map_file)
    pub const MAP_FILE: &str = "map_file";

    /// Logs related to [parsing](crate::builder)
    pub const PARSER: &str = "parser";
}
