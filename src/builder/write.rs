use std::io::Write;

use crate::{
    context::GenericSimplifier,
    structures::{clause::Clause, literal::Lit},
};

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Writes the simplified formula in WCNF.
    ///
    /// Fixed literals are written first as hard unit clauses, then the remaining (hard) clauses, and then a soft unit clause for each label which is not fixed.
    /// An unsatisfiable formula is written as a single empty clause.
    ///
    /// ```rust
    /// # use otter_simp::context::Simplifier;
    /// # use otter_simp::config::Config;
    /// # use otter_simp::structures::literal::Lit;
    /// let mut simplifier = Simplifier::from_config(Config::default());
    /// simplifier.add_clause(vec![Lit::from_dimacs(1), Lit::from_dimacs(2)]).unwrap();
    /// simplifier.add_clause(vec![Lit::from_dimacs(-3)]).unwrap();
    /// simplifier.set_label(2, -5);
    /// simplifier.top_weight = 10;
    ///
    /// let mut wcnf = Vec::default();
    /// simplifier.write_wcnf(&mut wcnf).unwrap();
    /// assert_eq!(
    ///     String::from_utf8(wcnf).unwrap(),
    ///     "p wcnf 3 3 10\n10 -3 0\n10 1 2 0\n5 -2 0\n"
    /// );
    /// ```
    pub fn write_wcnf(&self, out: &mut impl Write) -> std::io::Result<()> {
        if self.is_unsatisfiable() {
            return writeln!(out, "p wcnf 0 1\n0");
        }

        let softs: Vec<(Lit, u64)> = self
            .label_weight
            .iter()
            .filter(|(var, _)| self.assignment.is_undef(**var))
            .map(|(var, weight)| (Lit::new(*var, *weight > 0), weight.unsigned_abs()))
            .collect();

        let top = match self.top_weight {
            0 => softs.iter().map(|(_, weight)| weight).sum::<u64>() + 1,
            top => top,
        };

        let units: Vec<Lit> = self
            .assignment
            .true_literals()
            .filter(|literal| literal.var() <= self.var_count)
            .collect();
        let count = units.len() + self.clause_db.live_count() + softs.len();

        writeln!(out, "p wcnf {} {count} {top}", self.var_count)?;
        for unit in units {
            writeln!(out, "{top} {unit} 0")?;
        }
        for clause in self.clauses() {
            writeln!(out, "{top} {}", clause.as_dimacs(true))?;
        }
        for (literal, weight) in softs {
            writeln!(out, "{weight} {literal} 0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod write_tests {
    use crate::{config::Config, context::Simplifier, structures::literal::Lit};

    #[test]
    fn unsatisfiable() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(vec![Lit::from_dimacs(1)]).unwrap();
        simplifier.add_clause(vec![Lit::from_dimacs(-1)]).unwrap();

        let mut wcnf = Vec::default();
        simplifier.write_wcnf(&mut wcnf).unwrap();
        assert_eq!(String::from_utf8(wcnf).unwrap(), "p wcnf 0 1\n0\n");
    }

    #[test]
    fn fixed_labels_not_soft() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(vec![Lit::from_dimacs(1)]).unwrap();
        simplifier.set_label(1, -3);
        simplifier.set_label(2, 4);

        let mut wcnf = Vec::default();
        simplifier.write_wcnf(&mut wcnf).unwrap();
        assert_eq!(String::from_utf8(wcnf).unwrap(), "p wcnf 2 2 5\n5 1 0\n4 2 0\n");
        assert_eq!(simplifier.total_removed_weight(), 3);
    }
}
