use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

use otter_simp::config::defaults;

/// Switches of techniques, by long name and the config option switched off.
pub const TECHNIQUE_SWITCHES: [(&str, &str, &str); 10] = [
    ("no_up", "no-up", "up"),
    ("no_pure", "no-pure", "pure"),
    ("no_subsumption", "no-subsumption", "subsumption"),
    ("no_bve", "no-bve", "bve"),
    ("no_ee", "no-ee", "ee"),
    ("no_hte", "no-hte", "hte"),
    ("no_bce", "no-bce", "bce"),
    ("no_probe", "no-probe", "probe"),
    ("no_vivi", "no-vivi", "vivi"),
    ("no_unhide", "no-unhide", "unhide"),
];

pub fn cli() -> Command {
    let mut command = Command::new("otter_simp")
        .about("Simplifies a (weighted) CNF formula, and completes models of the simplified formula")
        .version("pup (it's still growing)")

        .arg(Arg::new("path")
            .required_unless_present_any(["complete_model", "markdown_help"])
            .value_parser(value_parser!(PathBuf))
            .help("The DIMACS form CNF or WCNF file to simplify."))

        .arg(Arg::new("map_file")
            .long("map-file")
            .short('m')
            .value_name("PATH")
            .value_parser(value_parser!(PathBuf))
            .required(false)
            .num_args(1)
            .help("The map file to write after simplification, or to read when completing a model."))

        .arg(Arg::new("complete_model")
            .long("complete-model")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .requires("map_file")
            .help("Complete a model of the simplified formula.")
            .long_help("Complete a model of the simplified formula.

The answer of a solver to the simplified formula is read from stdin, and a model of the original formula is written to stdout.
Requires the map file written when the formula was simplified."))

        .arg(Arg::new("techniques")
            .long("techniques")
            .value_name("SCHEDULE")
            .required(false)
            .num_args(1)
            .help("A schedule of techniques, in place of the default loop.")
            .long_help("A schedule of techniques, in place of the default loop.

Each technique is a character:
  u: unit propagation     p: pure literals       s: subsumption
  v: variable elimination e: equivalences        h: hidden tautologies
  b: blocked clauses      r: probing             a: vivification
  g: unhiding

Characters outside brackets are run once, in order.
A group in brackets followed by '+' is repeated while some technique of the group changes the formula.
For example, 'u[psv]+g'."))

        .arg(Arg::new("compress")
            .long("compress")
            .short('c')
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Renumber the variables of the simplified formula contiguously."))

        .arg(Arg::new("unlimited")
            .long("unlimited")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Ignore the limits of every technique, and the size limits on formulas."))

        .arg(Arg::new("randomized")
            .long("randomized")
            .short('r')
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Make randomised choices, from the seed."))

        .arg(Arg::new("seed")
            .long("seed")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .help("The seed of randomised choices.
Default: 0"))

        .arg(Arg::new("solutions")
            .long("solutions")
            .value_parser(value_parser!(i64))
            .allow_negative_numbers(true)
            .required(false)
            .num_args(1)
            .help("The number of models to complete, with -1 for every model.
Default: 1"))

        .arg(Arg::new("time_limit")
            .long("time-limit")
            .short('t')
            .value_name("SECONDS")
            .value_parser(value_parser!(f64))
            .required(false)
            .num_args(1)
            .help("Time limit for simplification in seconds.
Default: No limit"))

        .arg(Arg::new("variable_limit")
            .long("variable-limit")
            .value_parser(value_parser!(u32))
            .required(false)
            .num_args(1)
            .help(format!("Formulas with more variables are passed through untouched.
Default: {}", defaults::VARIABLE_LIMIT)))

        .arg(Arg::new("clause_limit")
            .long("clause-limit")
            .value_parser(value_parser!(usize))
            .required(false)
            .num_args(1)
            .help(format!("Formulas with more clauses are passed through untouched.
Default: {}", defaults::CLAUSE_LIMIT)))

        .arg(Arg::new("option")
            .long("set")
            .short('s')
            .value_name("NAME=VALUE")
            .action(ArgAction::Append)
            .required(false)
            .num_args(1)
            .help("Set any configuration option, e.g. 'bve_shrink=2' or 'probe_limit=50000'."))

        // CLI specific arguments

        .arg(Arg::new("stats")
            .long("stats")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Display counts of the changes made by each technique, as comments."))

        .arg(Arg::new("markdown_help")
            .long("markdown-help")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .hide(true)
            .help("Print help as markdown."));

    for (id, long, option) in TECHNIQUE_SWITCHES {
        command = command.arg(
            Arg::new(id)
                .long(long)
                .value_parser(value_parser!(bool))
                .required(false)
                .num_args(0)
                .help(format!("Switch off the '{option}' technique.")),
        );
    }

    command
}
