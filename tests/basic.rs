use otter_simp::{
    config::{Config, Technique},
    context::{Simplifier, Solution},
    structures::{clause::Clause, literal::Lit},
};

mod common;
use common::{brute_force, lits, satisfies, simplifier_with};

fn sorted_clauses(simplifier: &Simplifier) -> Vec<String> {
    let mut clauses: Vec<String> = simplifier
        .clauses()
        .map(|clause| {
            let mut clause = clause.to_vec();
            clause.sort();
            clause.as_dimacs(false)
        })
        .collect();
    clauses.sort();
    clauses
}

mod scenarios {
    use super::*;

    #[test]
    fn propagation_conflict() {
        let formula = vec![lits(&[1, 2]), lits(&[-1, 2]), lits(&[-2])];
        let mut the_simplifier = simplifier_with(Config::default(), &formula);
        assert_eq!(the_simplifier.preprocess(), Ok(Solution::Unsatisfiable));
    }

    #[test]
    fn subsumed_ternary() {
        let formula = vec![lits(&[1, 2, 3]), lits(&[1, 2])];
        let mut the_simplifier = simplifier_with(Config::default(), &formula);
        assert!(the_simplifier.run_technique(Technique::Subsumption));
        assert_eq!(sorted_clauses(&the_simplifier), vec!["1 2"]);
    }

    #[test]
    fn gate_elimination() {
        let formula = vec![lits(&[1, 2]), lits(&[1, 3]), lits(&[-1, -2, -3])];
        let mut the_simplifier = simplifier_with(Config::default(), &formula);
        the_simplifier.freeze(2);
        the_simplifier.freeze(3);

        assert!(the_simplifier.eliminate_variable(1, false));
        assert!(the_simplifier.is_eliminated(1));
        assert!(the_simplifier
            .clauses()
            .all(|clause| clause.iter().all(|literal| literal.var() != 1)));
    }

    #[test]
    fn equivalence_with_complement() {
        let formula = vec![lits(&[1, 2]), lits(&[-1, 2]), lits(&[1, -2]), lits(&[-1, -2])];
        let mut the_simplifier = simplifier_with(Config::default(), &formula);
        assert!(the_simplifier.equivalence_elimination());
        assert!(the_simplifier.is_unsatisfiable());
    }
}

mod driver {
    use super::*;

    #[test]
    fn schedule_runs_once() {
        let mut config = Config::default();
        config.techniques = Some("us".to_string());
        let formula = vec![lits(&[1, 2, 3]), lits(&[1, 2]), lits(&[-4]), lits(&[4, 5, 6])];
        let mut the_simplifier = simplifier_with(config, &formula);

        assert_eq!(the_simplifier.preprocess(), Ok(Solution::Unknown));
        assert_eq!(sorted_clauses(&the_simplifier), vec!["1 2", "5 6"]);
        assert!(the_simplifier.assignment.is_true(Lit::from_dimacs(-4)));
        assert_eq!(the_simplifier.counters.eliminated_variables, 0);
    }

    #[test]
    fn techniques_switched_off() {
        let mut config = Config::default();
        for option in ["pure", "subsumption", "bve", "ee", "hte", "bce", "probe", "vivi", "unhide"] {
            assert!(config.set_option(option, "false").is_ok());
        }
        let formula = vec![lits(&[1, 2, 3]), lits(&[1, 2]), lits(&[-1, 3])];
        let mut the_simplifier = simplifier_with(config, &formula);

        assert_eq!(the_simplifier.preprocess(), Ok(Solution::Unknown));
        assert_eq!(the_simplifier.clauses().count(), 3);
        assert!(the_simplifier.stack.is_empty());
    }

    #[test]
    fn interrupted() {
        let formula = vec![lits(&[1, 2]), lits(&[-1, 2]), lits(&[-2, 3])];
        let mut the_simplifier = simplifier_with(Config::default(), &formula);
        the_simplifier
            .interrupt_handle()
            .store(true, std::sync::atomic::Ordering::Relaxed);

        assert!(the_simplifier.preprocess().is_ok());
        assert_eq!(the_simplifier.counters.eliminated_variables, 0);
    }

    #[test]
    fn interrupt_from_handler() {
        let formula = vec![lits(&[1, 2]), lits(&[-1, 2]), lits(&[-2, 3]), lits(&[3, 4, -1])];
        let mut the_simplifier = simplifier_with(Config::default(), &formula);
        let interrupt = the_simplifier.interrupt_handle();
        let handler = move || interrupt.store(true, std::sync::atomic::Ordering::Relaxed);
        assert!(std::thread::spawn(handler).join().is_ok());

        assert!(the_simplifier.preprocess().is_ok());

        let mut wcnf = Vec::default();
        assert!(the_simplifier.write_wcnf(&mut wcnf).is_ok());
        let mut map = Vec::default();
        assert!(the_simplifier.write_map_file(&mut map).is_ok());

        let mut reread = Simplifier::from_config(Config::default());
        assert!(reread.read_dimacs(wcnf.as_slice()).is_ok());
        let clauses: Vec<Vec<Lit>> = reread.clauses().map(|clause| clause.to_vec()).collect();
        let Some(model) = brute_force(reread.var_count(), &clauses, &reread.assignment) else {
            panic!("Interrupted simplification lost every model");
        };

        let mut fresh = Simplifier::from_config(Config::default());
        assert_eq!(fresh.load_map_file(map.as_slice()), Ok(4));
        let answer = format!("s SATISFIABLE\nv {} 0\n", model.as_dimacs());
        let completed = fresh.complete_model(answer.as_bytes()).unwrap();
        assert_eq!(completed.models.len(), 1);
        for clause in &formula {
            assert!(satisfies(&completed.models[0], clause));
        }
    }

    #[test]
    fn pure_literal() {
        let formula = vec![lits(&[1, 2]), lits(&[1, -2, 3]), lits(&[-2, -3])];
        let mut the_simplifier = simplifier_with(Config::default(), &formula);
        assert!(the_simplifier.pure_literals());
        assert!(the_simplifier.assignment.is_true(Lit::from_dimacs(1)));
    }
}
