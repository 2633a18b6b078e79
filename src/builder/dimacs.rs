use std::io::BufRead;

use crate::{
    context::GenericSimplifier,
    misc::log::targets::{self},
    structures::{clause::CClause, literal::Lit, variable::Var},
    types::err::{self},
};

/// Counts from reading a formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// The variable count of the problem line, if any.
    pub expected_variables: Var,

    pub hard: usize,
    pub soft: usize,
}

/// The kind of formula, from the problem line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Every clause is hard.
    Cnf,

    /// Each clause is preceded by a weight, and clauses with the top weight (if any) are hard.
    Wcnf(Option<u64>),

    /// Hard clauses are preceded by `h`, and soft clauses by a weight.
    Unheaded,
}

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Reads a DIMACS CNF or WCNF formula into the simplifier.
    ///
    /// ```rust,ignore
    /// simplifier.read_dimacs(BufReader::new(&file))?;
    /// ```
    ///
    /// Without a problem line clauses are read in the `h` prefixed form, where hard clauses begin with `h` and every other clause begins with a weight.
    ///
    /// ```rust
    /// # use otter_simp::context::Simplifier;
    /// # use otter_simp::config::Config;
    /// let mut simplifier = Simplifier::from_config(Config::default());
    ///
    /// let wcnf = b"c unheaded
    /// h 1 2 0
    /// 3 -1 0
    /// 2 1 0
    /// ";
    ///
    /// assert!(simplifier.read_dimacs(wcnf.as_slice()).is_ok());
    /// assert_eq!(simplifier.labels().collect::<Vec<_>>(), vec![(1, -1)]);
    /// assert_eq!(simplifier.removed_weight, 2);
    /// ```
    pub fn read_dimacs(&mut self, mut reader: impl BufRead) -> Result<ParseSummary, err::ErrorKind> {
        let mut summary = ParseSummary::default();
        let mut buffer = String::with_capacity(1024);
        let mut line_counter = 0;
        let mut format = Format::Unheaded;

        // First phase, read until the formula begins.
        'preamble_loop: loop {
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => line_counter += 1,
                Err(_) => return Err(err::ErrorKind::from(err::ParseError::Line(line_counter))),
            }

            match buffer.trim_start().chars().next() {
                Some('c') | None => {
                    buffer.clear();
                    continue 'preamble_loop;
                }

                Some('p') => {
                    let mut problem_details = buffer.split_whitespace().skip(1);
                    let kind = problem_details.next();
                    let numbers: Vec<u64> = match problem_details.map(|n| n.parse()).collect() {
                        Ok(numbers) => numbers,
                        Err(_) => return Err(err::ErrorKind::from(err::ParseError::ProblemSpecification)),
                    };
                    let (Some(variables), Some(clauses)) = (numbers.first(), numbers.get(1)) else {
                        return Err(err::ErrorKind::from(err::ParseError::ProblemSpecification));
                    };

                    format = match kind {
                        Some("cnf") => Format::Cnf,
                        Some("wcnf") => Format::Wcnf(numbers.get(2).copied()),
                        _ => return Err(err::ErrorKind::from(err::ParseError::ProblemSpecification)),
                    };
                    log::info!(target: targets::PARSER, "Expecting {variables} variables and {clauses} clauses");

                    summary.expected_variables = *variables as Var;
                    self.ensure_vars(*variables as Var);
                    if let Format::Wcnf(Some(top)) = format {
                        self.top_weight = top;
                    }
                    buffer.clear();
                    break 'preamble_loop;
                }

                _ => break 'preamble_loop,
            }
        }

        let mut clause_buffer: CClause = Vec::default();
        let mut weight: Option<u64> = None;
        let mut hard = false;
        let mut started = false;
        let mut blocked_softs: Vec<(CClause, u64)> = Vec::default();

        // Second phase, read until the formula ends.
        'formula_loop: loop {
            if !buffer.is_empty() {
                match buffer.trim_start().chars().next() {
                    Some('%') => break 'formula_loop,
                    Some('c') => {}
                    _ => {
                        for item in buffer.split_whitespace() {
                            if !started {
                                started = true;
                                match format {
                                    Format::Cnf => hard = true,
                                    Format::Unheaded if item == "h" => {
                                        hard = true;
                                        continue;
                                    }
                                    Format::Wcnf(_) | Format::Unheaded => {
                                        let Ok(value) = item.parse::<u64>() else {
                                            log::error!(target: targets::PARSER, "Bad weight '{item}' on line {line_counter}");
                                            return Err(err::ErrorKind::from(err::ParseError::Weight(line_counter)));
                                        };
                                        hard = matches!(format, Format::Wcnf(Some(top)) if value >= top);
                                        weight = Some(value);
                                        continue;
                                    }
                                }
                            }

                            match item {
                                "0" => {
                                    let the_clause = std::mem::take(&mut clause_buffer);
                                    started = false;
                                    match hard {
                                        true => {
                                            if the_clause.is_empty() {
                                                log::error!(target: targets::PARSER, "Empty hard clause on line {line_counter}");
                                                return Err(err::ErrorKind::from(err::ParseError::EmptyClause(line_counter)));
                                            }
                                            self.add_clause(the_clause)?;
                                            summary.hard += 1;
                                        }
                                        false => {
                                            let weight = weight.take().unwrap_or(0);
                                            summary.soft += 1;
                                            match the_clause.len() {
                                                _ if weight == 0 => {}
                                                0 => self.removed_weight += weight as i64,
                                                1 => self.add_soft_unit(the_clause[0], weight),
                                                _ => blocked_softs.push((the_clause, weight)),
                                            }
                                        }
                                    }
                                }

                                _ => {
                                    let Ok(parsed_int) = item.parse::<i64>() else {
                                        log::error!(target: targets::PARSER, "Bad literal '{item}' on line {line_counter}");
                                        return Err(err::ErrorKind::from(err::ParseError::Line(line_counter)));
                                    };
                                    let the_literal = Lit::from_dimacs(parsed_int);
                                    if !clause_buffer.contains(&the_literal) {
                                        clause_buffer.push(the_literal);
                                    }
                                }
                            }
                        }
                    }
                }
            }

            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => line_counter += 1,
                Err(_) => return Err(err::ErrorKind::from(err::ParseError::Line(line_counter))),
            }
        }

        // Blocking variables are fresh with respect to every clause of the formula.
        for (mut clause, weight) in blocked_softs {
            let blocking = self.fresh_var();
            clause.push(Lit::new(blocking, true));
            self.add_clause(clause)?;
            self.set_label(blocking, -(weight as i64));
        }

        if self.top_weight == 0 {
            self.top_weight = self.label_weight.values().map(|w| w.unsigned_abs()).sum::<u64>() + 1;
        }

        log::info!(target: targets::PARSER,
            "Read {} hard and {} soft clauses over {} variables",
            summary.hard,
            summary.soft,
            self.var_count
        );
        Ok(summary)
    }

    /// Labels the variable of `literal` as a soft unit clause with `weight`.
    ///
    /// Soft units of opposite polarity on the same variable cancel, and the cancelled weight is removed.
    fn add_soft_unit(&mut self, literal: Lit, weight: u64) {
        let signed = match literal.polarity() {
            true => weight as i64,
            false => -(weight as i64),
        };
        let var = literal.var();
        match self.label_weight.get(&var).copied() {
            None => self.set_label(var, signed),
            Some(existing) => {
                if existing.signum() != signed.signum() {
                    self.removed_weight += existing.abs().min(signed.abs());
                }
                match existing + signed {
                    0 => {
                        self.label_weight.remove(&var);
                    }
                    combined => self.set_label(var, combined),
                }
            }
        }
    }
}

#[cfg(test)]
mod dimacs_tests {
    use crate::{
        config::Config,
        context::Simplifier,
        structures::clause::Clause,
        types::err::{self},
    };

    fn clauses(simplifier: &Simplifier) -> Vec<String> {
        let mut clauses: Vec<String> = simplifier.clauses().map(|c| c.as_dimacs(false)).collect();
        clauses.sort();
        clauses
    }

    #[test]
    fn cnf() {
        let mut simplifier = Simplifier::from_config(Config::default());
        let cnf = b"c a comment
p cnf 4 3
 1  2 0
-1  3
    4 0
-4 0
";
        let summary = simplifier.read_dimacs(cnf.as_slice()).unwrap();
        assert_eq!(summary.hard, 3);
        assert_eq!(simplifier.var_count(), 4);
        assert_eq!(clauses(&simplifier), vec!["-1 3 4", "1 2"]);
        assert!(simplifier.assignment.is_true(crate::structures::literal::Lit::from_dimacs(-4)));
    }

    #[test]
    fn opposite_softs_cancel() {
        let mut simplifier = Simplifier::from_config(Config::default());
        let wcnf = b"p wcnf 2 4 100
100 1 2 0
3 1 0
5 -1 0
7 0
";
        simplifier.read_dimacs(wcnf.as_slice()).unwrap();
        assert_eq!(simplifier.labels().collect::<Vec<_>>(), vec![(1, -2)]);
        assert_eq!(simplifier.removed_weight, 3 + 7);
        assert_eq!(simplifier.top_weight, 100);
    }

    #[test]
    fn malformed() {
        let mut simplifier = Simplifier::from_config(Config::default());
        assert_eq!(
            simplifier.read_dimacs(b"p cnf x 2\n".as_slice()),
            Err(err::ErrorKind::Parse(err::ParseError::ProblemSpecification))
        );
        assert_eq!(
            simplifier.read_dimacs(b"p cnf 2 1\n1 two 0\n".as_slice()),
            Err(err::ErrorKind::Parse(err::ParseError::Line(2)))
        );
        assert_eq!(
            simplifier.read_dimacs(b"p wcnf 2 1 9\nheavy 1 0\n".as_slice()),
            Err(err::ErrorKind::Parse(err::ParseError::Weight(2)))
        );
        assert_eq!(
            simplifier.read_dimacs(b"p wcnf 2 1 9\n9 0\n".as_slice()),
            Err(err::ErrorKind::Parse(err::ParseError::EmptyClause(2)))
        );
    }
}
