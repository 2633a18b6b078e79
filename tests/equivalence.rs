use std::collections::BTreeSet;

use otter_simp::{config::Config, structures::literal::Lit};

use petgraph::{algo::tarjan_scc, graph::DiGraph};

mod common;
use common::{lits, random_formula, simplifier_with};

/// The strongly connected components of more than one literal, as found by petgraph.
fn petgraph_components(simplifier: &otter_simp::context::Simplifier) -> BTreeSet<BTreeSet<Lit>> {
    let count = simplifier.big.literal_count();
    let mut graph = DiGraph::<Lit, ()>::with_capacity(count, 0);
    let nodes: Vec<_> = (0..count).map(|index| graph.add_node(Lit::from_index(index))).collect();
    for index in 2..count {
        let from = Lit::from_index(index);
        for to in simplifier.big.implied(from) {
            graph.add_edge(nodes[index], nodes[to.index()], ());
        }
    }

    tarjan_scc(&graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| component.into_iter().map(|node| graph[node]).collect())
        .collect()
}

mod equivalence {
    use super::*;

    #[test]
    fn components_agree_with_petgraph() {
        for seed in 0..40 {
            let formula = random_formula(seed, 10, 18, 2);
            let the_simplifier = simplifier_with(Config::default(), &formula);
            if the_simplifier.is_unsatisfiable() {
                continue;
            }

            let found: BTreeSet<BTreeSet<Lit>> = the_simplifier
                .implication_components()
                .into_iter()
                .map(|component| component.into_iter().collect())
                .collect();
            assert_eq!(found, petgraph_components(&the_simplifier), "seed {seed}");
        }
    }

    #[test]
    fn chain_collapses() {
        let formula = vec![
            lits(&[-1, 2]),
            lits(&[-2, 3]),
            lits(&[-3, 1]),
            lits(&[1, 4, 5]),
            lits(&[-2, -4, 5]),
        ];
        let mut the_simplifier = simplifier_with(Config::default(), &formula);

        assert!(the_simplifier.equivalence_elimination());
        assert!(the_simplifier.is_replaced(2));
        assert!(the_simplifier.is_replaced(3));
        assert!(!the_simplifier.is_replaced(1));
        assert_eq!(the_simplifier.representative(Lit::from_dimacs(-3)), Lit::from_dimacs(-1));
        assert!(the_simplifier
            .clauses()
            .all(|clause| clause.iter().all(|literal| literal.var() != 2 && literal.var() != 3)));
    }
}
