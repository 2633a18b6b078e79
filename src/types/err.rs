//! Error types used in the library.
//!
//! - Unsatisfiability is not an error.
//!   A simplifier which derives the empty clause records [Unsatisfiable](crate::context::Solution::Unsatisfiable) as its solution and stops.
//! - An exhausted budget is not an error either, the technique simply does nothing further.
//! - Errors are reserved for malformed input (formulas, map files, technique schedules, configuration values) and misuse of the clause database.
//!
//! Names of the error enums --- for the most part --- overlap with the module they are raised from.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

/// The general error type, wrapping the error of a specific part of the library.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error in the clause database.
    ClauseDB(ClauseDBError),

    /// An error in a configuration value.
    Config(ConfigError),

    /// An error reading a map file.
    MapFile(MapFileError),

    /// An error reading a formula.
    Parse(ParseError),

    /// An error in a technique schedule.
    Schedule(ScheduleError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClauseDB(e) => write!(f, "clause database: {e:?}"),
            Self::Config(e) => write!(f, "config: {e:?}"),
            Self::MapFile(e) => write!(f, "map file: {e:?}"),
            Self::Parse(e) => write!(f, "parse: {e:?}"),
            Self::Schedule(e) => write!(f, "schedule: {e:?}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// A reference to a clause which is not (or is no longer) stored.
    Missing,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors when setting a configuration value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The value is outside the permitted range of the named option.
    OutOfRange(&'static str),

    /// The named option does not exist.
    UnknownOption(String),
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

/// Errors when loading a map file.
///
/// Each variant holds the (one-indexed) line of the map file on which the issue was found.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MapFileError {
    /// An expected section header was not found.
    MissingSection(usize),

    /// A number could not be read.
    BadNumber(usize),

    /// The file ended in the middle of a section or block.
    Truncated(usize),

    /// A compression table is malformed.
    BadTable(usize),

    /// The file could not be read.
    Io(usize),
}

impl From<MapFileError> for ErrorKind {
    fn from(e: MapFileError) -> Self {
        ErrorKind::MapFile(e)
    }
}

/// Errors when reading a formula.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The problem line is malformed.
    ProblemSpecification,

    /// The line could not be read, or contains something which is not a literal.
    Line(usize),

    /// A weight is missing or malformed.
    Weight(usize),

    /// A hard clause is empty.
    EmptyClause(usize),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors in a technique schedule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// A group was opened inside a group.
    NestedGroup(usize),

    /// A group was closed without being opened.
    UnopenedGroup(usize),

    /// A group was opened and never closed.
    UnclosedGroup,
}

impl From<ScheduleError> for ErrorKind {
    fn from(e: ScheduleError) -> Self {
        ErrorKind::Schedule(e)
    }
}
