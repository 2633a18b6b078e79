#![allow(clippy::collapsible_if)]

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = Jemalloc;

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
    sync::atomic::Ordering,
};

use otter_simp::{
    config::Config,
    context::{Simplifier, Solution},
    types::err::{self},
};

mod parse;

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let matches = parse::cli::cli().get_matches();

    if let Ok(Some(true)) = matches.try_get_one::<bool>("markdown_help") {
        println!("{}", clap_markdown::help_markdown_command(&parse::cli::cli()));
        std::process::exit(0);
    }

    let config = match parse::config::config_from_args(&matches) {
        Ok(config) => config,
        Err(e) => {
            println!("c Config error: {e:?}");
            std::process::exit(1);
        }
    };

    let map_path = matches.get_one::<PathBuf>("map_file").cloned();

    if let Ok(Some(true)) = matches.try_get_one::<bool>("complete_model") {
        if let Some(path) = map_path {
            complete_model(config, path);
        }
        std::process::exit(0);
    }

    let show_stats = matches!(matches.try_get_one::<bool>("stats"), Ok(Some(true)));
    let Some(path) = matches.get_one::<PathBuf>("path").cloned() else {
        println!("c No formula given");
        std::process::exit(1);
    };

    let mut the_simplifier = Simplifier::from_config(config);

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            println!("c Could not open {}: {e}", path.display());
            std::process::exit(1);
        }
    };

    match the_simplifier.read_dimacs(BufReader::new(&file)) {
        Ok(summary) => {
            if show_stats {
                eprintln!(
                    "c Read {} hard and {} soft clauses over {} variables",
                    summary.hard,
                    summary.soft,
                    the_simplifier.var_count()
                );
            }
        }
        Err(err::ErrorKind::Parse(err::ParseError::EmptyClause(_))) => {
            println!("p wcnf 0 1\n0");
            std::process::exit(20);
        }
        Err(e) => {
            println!("c Error loading DIMACS: {e}");
            std::process::exit(1);
        }
    };

    let interrupt = the_simplifier.interrupt_handle();
    if let Err(e) = ctrlc::set_handler(move || interrupt.store(true, Ordering::Relaxed)) {
        eprintln!("c Could not install interrupt handler: {e}");
    }

    let solution = match the_simplifier.preprocess() {
        Ok(solution) => solution,
        Err(e) => {
            println!("c Simplification error: {e}");
            std::process::exit(1);
        }
    };

    if show_stats {
        eprintln!("c {:?}", the_simplifier.counters);
        eprintln!("c Removed weight: {}", the_simplifier.total_removed_weight());
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if the_simplifier.write_wcnf(&mut out).is_err() || out.flush().is_err() {
        std::process::exit(1);
    }

    if let Some(map_path) = map_path {
        let written = File::create(&map_path).and_then(|file| {
            let mut map_out = BufWriter::new(file);
            the_simplifier.write_map_file(&mut map_out)?;
            map_out.flush()
        });
        if let Err(e) = written {
            eprintln!("c Could not write map file {}: {e}", map_path.display());
            std::process::exit(1);
        }
    }

    match solution {
        Solution::Satisfiable => std::process::exit(10),
        Solution::Unsatisfiable => std::process::exit(20),
        Solution::Unknown => std::process::exit(0),
    }
}

/// Reads the answer of a solver from stdin and prints the completed models.
fn complete_model(config: Config, map_path: PathBuf) {
    let mut the_simplifier = Simplifier::from_config(config);

    let loaded = match File::open(&map_path) {
        Ok(file) => the_simplifier.load_map_file(BufReader::new(file)),
        Err(e) => {
            println!("c Could not open map file {}: {e}", map_path.display());
            std::process::exit(1);
        }
    };
    if let Err(e) = loaded {
        println!("c Malformed map file: {e:?}");
        std::process::exit(1);
    }

    match the_simplifier.complete_model(std::io::stdin().lock()) {
        Ok(completed) => print!("{completed}"),
        Err(e) => {
            println!("c Error reading answer: {e:?}");
            std::process::exit(1);
        }
    }
}
