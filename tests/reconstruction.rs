use otter_simp::{config::Config, context::Solution, structures::assignment::Assignment};

mod common;
use common::{brute_force, random_formula, satisfies, simplified_model, simplifier_with};

/// Simplifies random formulas with `config`, and checks each reconstructed model is a model of the original formula.
fn check_reconstruction(config: Config, seeds: std::ops::Range<u64>, clause_count: usize) {
    let vars = 10;
    for seed in seeds {
        let formula = random_formula(seed, vars, clause_count, 3);
        let original = brute_force(vars, &formula, &Assignment::default());

        let mut the_simplifier = simplifier_with(config.clone(), &formula);
        let solution = the_simplifier.preprocess();
        assert!(solution.is_ok());

        if solution == Ok(Solution::Unsatisfiable) {
            assert!(original.is_none(), "seed {seed}: satisfiable formula simplified to unsatisfiable");
            continue;
        }

        let Some(model) = simplified_model(&the_simplifier) else {
            assert!(original.is_none(), "seed {seed}: satisfiable formula simplified to unsatisfiable");
            continue;
        };
        assert!(original.is_some(), "seed {seed}: unsatisfiable formula simplified to satisfiable");

        let models = the_simplifier.complete_models(&model);
        assert!(!models.is_empty());
        for model in models {
            for clause in &formula {
                assert!(satisfies(&model, clause), "seed {seed}: reconstruction falsifies {clause:?}");
            }
        }
    }
}

mod random {
    use super::*;

    #[test]
    fn default_loop() {
        check_reconstruction(Config::default(), 0..60, 38);
    }

    #[test]
    fn sparse() {
        check_reconstruction(Config::default(), 100..140, 20);
    }

    #[test]
    fn compressed() {
        let mut config = Config::default();
        config.compress.value = true;
        check_reconstruction(config, 200..240, 30);
    }

    #[test]
    fn every_solution() {
        let mut config = Config::default();
        assert!(config.solutions.set(-1).is_ok());
        check_reconstruction(config, 300..330, 25);
    }

    #[test]
    fn gates_and_otfss() {
        let mut config = Config::default();
        for option in ["bve_ite_gates", "bve_xor_gates", "bve_otfss", "hbce", "unhide_transitive"] {
            assert!(config.set_option(option, "true").is_ok());
        }
        assert!(config.set_option("bve_shrink", "2").is_ok());
        check_reconstruction(config, 400..440, 34);
    }

    #[test]
    fn randomized() {
        let mut config = Config::default();
        config.randomized.value = true;
        config.seed.value = 7;
        check_reconstruction(config, 500..530, 36);
    }

    #[test]
    fn schedules() {
        for schedule in ["u[psv]+", "ug[ehb]+r", "uar[vs]+", "[upsvehbrag]+"] {
            let mut config = Config::default();
            config.techniques = Some(schedule.to_string());
            check_reconstruction(config, 600..620, 32);
        }
    }
}
