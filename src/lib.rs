//! A library for simplifying (weighted) boolean formulas written in conjunctive normal form, with reconstruction of models.
//!
//! otter_simp applies a variety of techniques from the literature on preprocessing for satisfiability and maximum satisfiability solvers to a formula, and keeps a record of each transformation so any model of the simplified formula may be extended to a model of the original formula.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [simplifier](crate::context).
//!
//! Simplifiers are built with a [configuration](crate::config).
//! Clauses may be added through the [DIMACS](crate::context::GenericSimplifier::read_dimacs) representation of a formula or [programatically](crate::context::GenericSimplifier::add_clause), and soft clauses are represented by [labels](crate::context::GenericSimplifier::set_label) on variables.
//!
//! A call to [preprocess](crate::context::GenericSimplifier::preprocess) runs the techniques of the [preprocessing] module, either as a fixed loop or as given by a schedule, until nothing changes or every budget is spent.
//! The simplified formula may then be [written](crate::context::GenericSimplifier::write_wcnf), and the [reconstruction] stack written to a map file.
//!
//! Useful starting points, then, may be:
//! - The [preprocessing] module, for the driver and each technique.
//! - The [database module](crate::db) to inspect the clause arena, occurrence lists, and binary implication graph.
//! - The [reconstruction] module, for the postprocess stack and map files.
//! - The [configuration](crate::config) to see what features are supported.
//!
//! # Examples
//!
//! + Simplify a formula with a soft clause, and reconstruct a model of the original formula.
//!
//! ```rust
//! # use otter_simp::config::Config;
//! # use otter_simp::context::{Simplifier, Solution};
//! # use otter_simp::structures::assignment::Assignment;
//! let mut the_simplifier = Simplifier::from_config(Config::default());
//!
//! let wcnf = b"p wcnf 4 5 10
//! 10 1 2 0
//! 10 -1 2 0
//! 10 -2 3 4 0
//! 10 -3 -4 0
//! 1 -4 0
//! ";
//! assert!(the_simplifier.read_dimacs(wcnf.as_slice()).is_ok());
//! assert!(the_simplifier.preprocess().is_ok());
//!
//! // 2 is forced, and the label on 4 is kept.
//! assert!(the_simplifier.assignment.is_true(otter_simp::structures::literal::Lit::from_dimacs(2)));
//! assert!(the_simplifier.labels().any(|(var, _)| var == 4));
//!
//! let mut model = Assignment::with_vars(the_simplifier.var_count());
//! model.set_value(4, false);
//! let models = the_simplifier.complete_models(&model);
//! assert_eq!(models[0].value_of(3), Some(true));
//! ```
//!
//! # Logs
//!
//! Logs are made to a handful of targets, one for each technique, which are listed in [misc::log].
//! No logger is installed by the library.

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod builder;
pub mod config;
pub mod context;
pub mod db;
pub mod generic;
pub mod misc;
pub mod preprocessing;
pub mod reconstruction;
pub mod structures;
pub mod types;
