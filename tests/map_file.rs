use otter_simp::{
    config::Config,
    context::Simplifier,
    structures::{clause::Clause, literal::Lit},
};

mod common;
use common::{mixed_formula, random_formula, satisfies, simplified_model};

/// A WCNF formula with the clauses of `hard` and a soft unit clause on each of the first `labels` variables.
fn wcnf(hard: &[Vec<Lit>], vars: u32, labels: u32) -> String {
    let mut text = format!("p wcnf {vars} {} 100\n", hard.len() as u32 + labels);
    for clause in hard {
        text.push_str(&format!("100 {}\n", clause.as_dimacs(true)));
    }
    for var in 1..=labels {
        text.push_str(&format!("{} -{var} 0\n", var + 1));
    }
    text
}

/// Simplifies, writes a map file, and completes a model in a fresh simplifier.
fn round_trip(config: Config, seed: u64, hard: Vec<Vec<Lit>>) {
    let vars = 10;
    let text = wcnf(&hard, vars, 3);

    let mut the_simplifier = Simplifier::from_config(config.clone());
    assert!(the_simplifier.read_dimacs(text.as_bytes()).is_ok());
    assert!(the_simplifier.preprocess().is_ok());
    if the_simplifier.is_unsatisfiable() {
        return;
    }
    let Some(model) = simplified_model(&the_simplifier) else {
        return;
    };

    let mut map = Vec::default();
    assert!(the_simplifier.write_map_file(&mut map).is_ok());

    let mut fresh = Simplifier::from_config(config);
    assert_eq!(fresh.load_map_file(map.as_slice()), Ok(vars));

    let answer = format!("o 5\ns OPTIMUM FOUND\nv {} 0\n", model.as_dimacs());
    let completed = fresh.complete_model(answer.as_bytes()).unwrap();

    assert_eq!(completed.status.as_deref(), Some("OPTIMUM FOUND"));
    assert_eq!(completed.cost, Some(5 + the_simplifier.total_removed_weight()));
    assert!(!completed.models.is_empty());
    for completed_model in &completed.models {
        for clause in &hard {
            assert!(satisfies(completed_model, clause), "seed {seed}: {clause:?} falsified");
        }
        for var in 1..=vars {
            assert!(completed_model.value_of(var).is_some());
        }
    }

    let direct = the_simplifier.complete_models(&model);
    assert_eq!(direct, completed.models);
}

mod map_file {
    use super::*;

    #[test]
    fn without_compression() {
        for seed in 0..30 {
            round_trip(Config::default(), seed, random_formula(seed, 10, 24, 3));
        }
    }

    #[test]
    fn with_equivalences() {
        for seed in 60..100 {
            round_trip(Config::default(), seed, mixed_formula(seed, 10, 18));
        }
    }

    #[test]
    fn with_equivalences_and_compression() {
        let mut config = Config::default();
        config.compress.value = true;
        for seed in 100..140 {
            round_trip(config.clone(), seed, mixed_formula(seed, 10, 18));
        }
    }

    #[test]
    fn with_compression() {
        let mut config = Config::default();
        config.compress.value = true;
        for seed in 30..60 {
            round_trip(config.clone(), seed, random_formula(seed, 10, 24, 3));
        }
    }

    #[test]
    fn unsatisfiable_answer() {
        let mut the_simplifier = Simplifier::from_config(Config::default());
        assert!(the_simplifier.read_dimacs(b"p cnf 2 1\n1 2 0\n".as_slice()).is_ok());

        let mut map = Vec::default();
        assert!(the_simplifier.write_map_file(&mut map).is_ok());

        let mut fresh = Simplifier::from_config(Config::default());
        assert!(fresh.load_map_file(map.as_slice()).is_ok());
        let completed = fresh.complete_model(b"s UNSATISFIABLE\n".as_slice()).unwrap();
        assert!(completed.models.is_empty());
        assert_eq!(completed.to_string(), "s UNSATISFIABLE\n");
    }
}
