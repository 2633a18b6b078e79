#![allow(dead_code)]

use otter_simp::{
    context::Simplifier,
    generic::minimal_pcg::MinimalPCG32,
    structures::{assignment::Assignment, literal::Lit, variable::Var},
};

use rand::{Rng, SeedableRng};

pub fn lits(ints: &[i64]) -> Vec<Lit> {
    ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
}

fn random_clause(rng: &mut MinimalPCG32, vars: Var, width: usize) -> Vec<Lit> {
    let mut clause: Vec<Lit> = Vec::with_capacity(width);
    while clause.len() < width {
        let var = rng.gen_range(1..=vars);
        if clause.iter().all(|l| l.var() != var) {
            clause.push(Lit::new(var, rng.gen_bool(0.5)));
        }
    }
    clause
}

/// A random formula of clauses with `width` distinct variables each.
pub fn random_formula(seed: u64, vars: Var, clauses: usize, width: usize) -> Vec<Vec<Lit>> {
    let mut rng = MinimalPCG32::seed_from_u64(seed);
    (0..clauses).map(|_| random_clause(&mut rng, vars, width)).collect()
}

/// A random formula where about half of the clauses are binary, and the rest have three or four variables.
pub fn mixed_formula(seed: u64, vars: Var, clauses: usize) -> Vec<Vec<Lit>> {
    let mut rng = MinimalPCG32::seed_from_u64(seed);
    (0..clauses)
        .map(|_| {
            let width = match rng.gen_bool(0.5) {
                true => 2,
                false => rng.gen_range(3..=4),
            };
            random_clause(&mut rng, vars, width)
        })
        .collect()
}

pub fn satisfies(model: &Assignment, clause: &[Lit]) -> bool {
    clause.iter().any(|literal| model.is_true(*literal))
}

/// Some model of `clauses` over `vars` variables which agrees with `fixed`, by brute force.
pub fn brute_force(vars: Var, clauses: &[Vec<Lit>], fixed: &Assignment) -> Option<Assignment> {
    let free: Vec<Var> = (1..=vars).filter(|var| fixed.value_of(*var).is_none()).collect();
    for bits in 0..(1_u64 << free.len()) {
        let mut model = Assignment::with_vars(vars);
        for literal in fixed.true_literals().filter(|l| l.var() <= vars) {
            model.set(literal);
        }
        for (index, var) in free.iter().enumerate() {
            model.set_value(*var, (bits >> index) & 1 == 1);
        }
        if clauses.iter().all(|clause| satisfies(&model, clause)) {
            return Some(model);
        }
    }
    None
}

/// The weight of the labels `model` gives the polarity against the preferred polarity of the label.
pub fn label_cost(model: &Assignment, labels: &[(Var, i64)]) -> i64 {
    labels
        .iter()
        .filter(|(var, weight)| model.value_of(*var) == Some(*weight <= 0))
        .map(|(_, weight)| weight.abs())
        .sum()
}

/// A model of `clauses` which agrees with `fixed` and has the least label cost, with the cost, by brute force.
pub fn optimum(vars: Var, clauses: &[Vec<Lit>], labels: &[(Var, i64)], fixed: &Assignment) -> Option<(Assignment, i64)> {
    let free: Vec<Var> = (1..=vars).filter(|var| fixed.value_of(*var).is_none()).collect();
    let mut best: Option<(Assignment, i64)> = None;
    for bits in 0..(1_u64 << free.len()) {
        let mut model = Assignment::with_vars(vars);
        for literal in fixed.true_literals().filter(|l| l.var() <= vars) {
            model.set(literal);
        }
        for (index, var) in free.iter().enumerate() {
            model.set_value(*var, (bits >> index) & 1 == 1);
        }
        if clauses.iter().all(|clause| satisfies(&model, clause)) {
            let cost = label_cost(&model, labels);
            if best.as_ref().map_or(true, |(_, best)| cost < *best) {
                best = Some((model, cost));
            }
        }
    }
    best
}

/// A model of the current formula of `simplifier`, if any.
pub fn simplified_model(simplifier: &Simplifier) -> Option<Assignment> {
    let clauses: Vec<Vec<Lit>> = simplifier.clauses().map(|c| c.to_vec()).collect();
    brute_force(simplifier.var_count(), &clauses, &simplifier.assignment)
}

pub fn simplifier_with(config: otter_simp::config::Config, formula: &[Vec<Lit>]) -> Simplifier {
    let mut simplifier = Simplifier::from_config(config);
    for clause in formula {
        assert!(simplifier.add_clause(clause.clone()).is_ok());
    }
    simplifier
}
