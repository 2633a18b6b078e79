use otter_simp::{config::Config, reconstruction::stack::StackEntry};

mod common;
use common::{lits, random_formula, simplifier_with};

mod compression {
    use super::*;

    #[test]
    fn second_compression_does_nothing() {
        for seed in 0..20 {
            let formula = random_formula(seed, 12, 30, 3);
            let mut the_simplifier = simplifier_with(Config::default(), &formula);
            assert!(the_simplifier.preprocess().is_ok());
            if the_simplifier.is_unsatisfiable() {
                continue;
            }

            the_simplifier.compress();
            let entries = the_simplifier.stack.len();
            let clauses: Vec<Vec<_>> = the_simplifier.clauses().map(|c| c.to_vec()).collect();

            assert!(!the_simplifier.compress());
            assert_eq!(the_simplifier.stack.len(), entries);
            let again: Vec<Vec<_>> = the_simplifier.clauses().map(|c| c.to_vec()).collect();
            assert_eq!(clauses.len(), again.len());
        }
    }

    #[test]
    fn contiguous_variables() {
        let formula = vec![lits(&[2, 5, 9]), lits(&[-5, 7, 9]), lits(&[2, -7, -9]), lits(&[4])];
        let mut the_simplifier = simplifier_with(Config::default(), &formula);
        for var in [2, 5, 7, 9] {
            the_simplifier.freeze(var);
        }

        assert!(the_simplifier.compress());
        assert_eq!(the_simplifier.var_count(), 4);
        assert_eq!(the_simplifier.original_var_count(), 9);
        assert!(the_simplifier
            .clauses()
            .all(|clause| clause.iter().all(|literal| (1..=4).contains(&literal.var()))));

        let Some(StackEntry::Compression(table)) = the_simplifier.stack.entries().last() else {
            panic!("no compression entry");
        };
        assert_eq!(table.variables, 9);
        assert_eq!(table.inverse, vec![0, 2, 5, 7, 9]);
        assert_eq!(table.units, lits(&[4]));

        for (new, old) in [(1, 2), (2, 5), (3, 7), (4, 9)] {
            assert_eq!(the_simplifier.original_var(new), Some(old));
            assert!(the_simplifier.is_frozen(new));
        }
    }
}
