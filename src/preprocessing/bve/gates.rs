//! Gate detection.
//!
//! A gate is a set of clauses which define a variable as a function of other variables.
//! When the clauses of a variable include a gate only resolvents with at least one gate clause are needed, as resolvents of two clauses outside the gate are implied by the others.
//!
//! Three kinds of gate are detected:
//! - Definitions by binary clauses, e.g. `x ↔ (a ∧ b)` from `[¬x, a]`, `[¬x, b]`, `[x, ¬a, ¬b]`.
//! - If-then-else, `x ↔ ITE(s, t, f)` from `[¬x, ¬s, t]`, `[¬x, s, f]`, `[x, ¬s, ¬t]`, `[x, s, ¬f]`.
//! - XOR, all clauses over the same variables with the same parity of negated literals.

use std::collections::BTreeMap;

use crate::{
    context::GenericSimplifier,
    db::ClauseRef,
    misc::log::targets::{self},
    structures::{clause::Clause, literal::Lit, variable::Var},
};

/// The largest XOR detected.
const XOR_MAX_SIZE: usize = 10;

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// The clauses of a gate defining `var`, if some gate is found.
    ///
    /// `positive` and `negative` are the clauses containing the positive and negative literals of `var`.
    pub(super) fn find_gate(
        &mut self,
        var: Var,
        positive: &[ClauseRef],
        negative: &[ClauseRef],
    ) -> Option<Vec<ClauseRef>> {
        let pos = Lit::new(var, true);

        if self.config.bve_gates.value {
            if let Some(gate) = self.binary_gate(pos, positive, negative) {
                log::trace!(target: targets::BVE, "Definition of {var} by binary clauses");
                return Some(gate);
            }
            if let Some(gate) = self.binary_gate(pos.negate(), negative, positive) {
                log::trace!(target: targets::BVE, "Definition of {var} by binary clauses");
                return Some(gate);
            }
        }

        if self.config.bve_ite_gates.value {
            if let Some(gate) = self.ite_gate(pos, positive, negative) {
                log::trace!(target: targets::BVE, "ITE definition of {var}");
                return Some(gate);
            }
            if let Some(gate) = self.ite_gate(pos.negate(), negative, positive) {
                log::trace!(target: targets::BVE, "ITE definition of {var}");
                return Some(gate);
            }
        }

        if self.config.bve_xor_gates.value {
            if let Some(gate) = self.xor_gate(positive, negative) {
                log::trace!(target: targets::BVE, "XOR definition of {var}");
                return Some(gate);
            }
        }

        None
    }

    /// A gate of binary clauses `[l, x_1]` ... `[l, x_n]` together with a clause `[¬l, ¬x_1, ..., ¬x_n]`.
    fn binary_gate(
        &mut self,
        literal: Lit,
        with_literal: &[ClauseRef],
        with_complement: &[ClauseRef],
    ) -> Option<Vec<ClauseRef>> {
        self.marks.next_step();
        let mut binaries = Vec::default();
        for key in with_literal {
            if let [a, b] = self.clause_db[*key].literals()[..] {
                let other = if a == literal { b } else { a };
                self.marks.set(other.negate().index());
                binaries.push((other.negate(), *key));
            }
        }
        if binaries.is_empty() {
            return None;
        }

        for key in with_complement {
            let clause = &self.clause_db[*key];
            self.budgets.bve.spend(clause.size() as u64);
            let defined = clause
                .literals()
                .iter()
                .filter(|l| **l != literal.negate())
                .all(|l| self.marks.is_marked(l.index()));
            if defined {
                let mut gate: Vec<ClauseRef> = binaries
                    .iter()
                    .filter(|(negated, _)| clause.holds(*negated))
                    .map(|(_, key)| *key)
                    .collect();
                gate.push(*key);
                return Some(gate);
            }
        }
        None
    }

    /// An if-then-else gate, `¬literal ↔ ITE(s, t, f)`.
    fn ite_gate(
        &mut self,
        literal: Lit,
        with_literal: &[ClauseRef],
        with_complement: &[ClauseRef],
    ) -> Option<Vec<ClauseRef>> {
        let others = |simplifier: &Self, key: &ClauseRef| -> Option<[Lit; 2]> {
            let clause = &simplifier.clause_db[*key];
            match clause.literals()[..] {
                [a, b, c] => {
                    let mut others = [a, b, c].into_iter().filter(|l| *l != literal);
                    Some([others.next()?, others.next()?])
                }
                _ => None,
            }
        };

        let ternary: Vec<(ClauseRef, [Lit; 2])> = with_literal
            .iter()
            .filter_map(|key| others(self, key).map(|o| (*key, o)))
            .collect();

        for (i, (first, [a1, b1])) in ternary.iter().enumerate() {
            for (second, [a2, b2]) in ternary.iter().skip(i + 1) {
                self.budgets.bve.spend(1);
                for (x1, y1) in [(*a1, *b1), (*b1, *a1)] {
                    for (x2, y2) in [(*a2, *b2), (*b2, *a2)] {
                        if x1 != x2.negate() || y1.var() == x1.var() || y2.var() == x1.var() {
                            continue;
                        }
                        // [l, x1, y1], [l, ¬x1, y2] are matched by [¬l, x1, ¬y1], [¬l, ¬x1, ¬y2].
                        let third = [literal.negate(), x1, y1.negate()];
                        let fourth = [literal.negate(), x2, y2.negate()];
                        let third = self.find_clause(with_complement, third);
                        let fourth = self.find_clause(with_complement, fourth);
                        if let (Some(third), Some(fourth)) = (third, fourth) {
                            if third != fourth {
                                return Some(vec![*first, *second, third, fourth]);
                            }
                        }
                    }
                }
            }
        }
        None
    }

    /// A clause of `keys` with exactly the given literals.
    fn find_clause(&self, keys: &[ClauseRef], mut literals: [Lit; 3]) -> Option<ClauseRef> {
        literals.sort_unstable();
        keys.iter()
            .find(|key| self.clause_db[**key].literals() == literals)
            .copied()
    }

    /// An XOR over the variables of some clause, given by all clauses over those variables with the same parity.
    fn xor_gate(&mut self, positive: &[ClauseRef], negative: &[ClauseRef]) -> Option<Vec<ClauseRef>> {
        let mut groups: BTreeMap<(Vec<Var>, bool), Vec<ClauseRef>> = BTreeMap::default();
        for key in positive.iter().chain(negative) {
            let clause = &self.clause_db[*key];
            if !(3..=XOR_MAX_SIZE).contains(&clause.size()) {
                continue;
            }
            self.budgets.bve.spend(clause.size() as u64);
            let vars: Vec<Var> = clause.literals().iter().map(|l| l.var()).collect();
            let parity = clause.literals().iter().filter(|l| !l.polarity()).count() % 2 == 1;
            groups.entry((vars, parity)).or_default().push(*key);
        }

        for ((vars, _), mut keys) in groups {
            keys.sort_by(|a, b| self.clause_db[*a].literals().cmp(self.clause_db[*b].literals()));
            keys.dedup_by(|a, b| self.clause_db[*a].literals() == self.clause_db[*b].literals());
            if keys.len() == 1 << (vars.len() - 1) {
                for key in &keys {
                    self.clause_db[*key].flags_mut().is_xor = true;
                }
                return Some(keys);
            }
        }
        None
    }
}
