/*!
Map files, from which models of the original formula are reconstructed in some other process.

A map file is a sequence of sections, each opened by a header line:

```text
polarities
<count> <var> <weight> ... (labels over the original variables)
removed weight
<weight>
original variables
<original count> - <current count>
compress tables                 (only if some compression happened)
table <index> <variables before compression>
<old variable of each new variable> 0
units <index>
<literals fixed before compression> 0
end table
ee table
<representative> <literals of the class> 0
postprocess stack
bce <literal>
<clause> 0
ve <variable> <count>
<count clause lines>
ee
```

The `ee table` lists the equivalence forest over the original variables, one class per line, with each literal of a class equivalent to the positive literal of the representative.
The `postprocess stack` lists the [stack](crate::reconstruction::stack) in order, oldest first, over the original variables.
An `ee` entry marks a round of equivalence elimination, and is replayed by giving each member of each class of the `ee table` the value of the representative.
Compressions have no entry, and the compression tables are replayed before the stack.

Reading a map file gives a simplifier with the stack, labels, and weights of the simplifier which wrote the map file, and nothing else.
So, [complete_model](crate::context::GenericSimplifier::complete_model) works as it would have in the simplifier which wrote the map file.

```rust
# use otter_simp::context::Simplifier;
# use otter_simp::config::Config;
# use otter_simp::structures::literal::Lit;
let mut simplifier = Simplifier::from_config(Config::default());
for clause in [[1, 2], [-1, 3]] {
    let clause: Vec<Lit> = clause.iter().map(|i| Lit::from_dimacs(*i)).collect();
    simplifier.add_clause(clause).unwrap();
}
simplifier.freeze(2);
simplifier.freeze(3);
simplifier.eliminate_variable(1, false);

let mut map = Vec::default();
simplifier.write_map_file(&mut map).unwrap();

let mut fresh = Simplifier::from_config(Config::default());
assert_eq!(fresh.load_map_file(map.as_slice()), Ok(3));

let completed = fresh.complete_model("s SATISFIABLE\nv -2 3 0\n".as_bytes()).unwrap();
assert_eq!(completed.to_string(), "s SATISFIABLE\nv 1 -2 3 0\n");
```
*/

use std::{
    collections::{BTreeMap, HashMap},
    io::{BufRead, Write},
};

use crate::{
    context::GenericSimplifier,
    misc::log::targets::{self},
    reconstruction::stack::{CompressionTable, StackEntry},
    structures::{
        assignment::Assignment,
        clause::{CClause, Clause},
        literal::Lit,
        variable::Var,
    },
    types::err::{self},
};

/// Models of the original formula, completed from the answer of some solver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletedModel {
    /// The status line of the answer, without the leading `s `.
    pub status: Option<String>,

    /// The cost of the answer, including the weight removed by simplification.
    pub cost: Option<i64>,

    pub models: Vec<Assignment>,
}

impl std::fmt::Display for CompletedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(cost) = self.cost {
            writeln!(f, "o {cost}")?;
        }
        if let Some(status) = &self.status {
            writeln!(f, "s {status}")?;
        }
        for model in &self.models {
            match model.as_dimacs().is_empty() {
                true => writeln!(f, "v 0")?,
                false => writeln!(f, "v {} 0", model.as_dimacs())?,
            }
        }
        Ok(())
    }
}

/// The lines of a map file, with the (one-indexed) number of the line last taken.
struct MapLines {
    lines: Vec<String>,
    taken: usize,
}

impl MapLines {
    fn read(reader: impl BufRead) -> Result<Self, err::MapFileError> {
        let mut lines = Vec::default();
        for (index, line) in reader.lines().enumerate() {
            match line {
                Ok(line) => lines.push(line.trim().to_string()),
                Err(e) => {
                    log::error!(target: targets::MAP_FILE, "Failed to read line {}: {e}", index + 1);
                    return Err(err::MapFileError::Io(index + 1));
                }
            }
        }
        Ok(MapLines { lines, taken: 0 })
    }

    fn peek(&self) -> Option<&str> {
        self.lines.get(self.taken).map(|line| line.as_str())
    }

    fn next(&mut self) -> Option<&str> {
        let line = self.lines.get(self.taken)?;
        self.taken += 1;
        Some(line.as_str())
    }

    /// The next line, which must exist.
    fn expect_line(&mut self) -> Result<&str, err::MapFileError> {
        let taken = self.taken;
        match self.lines.get(taken) {
            Some(line) => {
                self.taken += 1;
                Ok(line.as_str())
            }
            None => {
                log::error!(target: targets::MAP_FILE, "Unexpected end after line {taken}");
                Err(err::MapFileError::Truncated(taken))
            }
        }
    }

    /// Takes the header line `header`.
    fn expect_header(&mut self, header: &str) -> Result<(), err::MapFileError> {
        let line = self.taken + 1;
        match self.next() {
            Some(found) if found == header => Ok(()),
            found => {
                log::error!(target: targets::MAP_FILE, "Expected '{header}' on line {line}, found {found:?}");
                Err(err::MapFileError::MissingSection(line))
            }
        }
    }

    /// The integers of the next line.
    fn expect_numbers(&mut self) -> Result<Vec<i64>, err::MapFileError> {
        let line = self.expect_line()?.to_string();
        numbers(&line, self.taken)
    }

    /// The literals of the next line, up to a terminating zero.
    fn expect_literals(&mut self) -> Result<CClause, err::MapFileError> {
        let numbers = self.expect_numbers()?;
        Ok(numbers
            .into_iter()
            .take_while(|n| *n != 0)
            .map(Lit::from_dimacs)
            .collect())
    }
}

/// The integers of `line`.
fn numbers(line: &str, number: usize) -> Result<Vec<i64>, err::MapFileError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<i64>().map_err(|_| {
                log::error!(target: targets::MAP_FILE, "Malformed number '{token}' on line {number}");
                err::MapFileError::BadNumber(number)
            })
        })
        .collect()
}

/// The integers following `keyword` on `line`.
fn keyword_numbers(line: &str, keyword: &str, number: usize) -> Result<Vec<i64>, err::MapFileError> {
    numbers(line.trim_start_matches(keyword), number)
}

/// The root of `var` in an equivalence forest, as the literal equivalent to the positive literal of `var`.
fn root(forest: &[Lit], var: Var) -> Lit {
    let mut literal = Lit::new(var, true);
    for _ in 0..forest.len() {
        match forest.get(literal.var() as usize) {
            Some(parent) if parent.var() != literal.var() => literal = literal.apply_polarity(*parent),
            _ => break,
        }
    }
    literal
}

/// `literal` over the variables of the original formula, from the tables of the compressions which renumbered `literal`, oldest first.
fn to_original(tables: &[&CompressionTable], literal: Lit) -> Lit {
    let var = tables
        .iter()
        .rev()
        .try_fold(literal.var(), |var, table| table.old_var(var));
    literal.with_var(var.unwrap_or(literal.var()))
}

/// Writes an equivalence forest, one class per line, with each class under the root of the class.
fn write_classes(out: &mut impl Write, forest: &[Lit]) -> std::io::Result<()> {
    let mut classes: BTreeMap<Var, Vec<Lit>> = BTreeMap::default();
    for var in 1..forest.len() as Var {
        let representative = root(forest, var);
        if representative.var() != var {
            classes
                .entry(representative.var())
                .or_default()
                .push(Lit::new(var, representative.polarity()));
        }
    }
    for (representative, members) in classes {
        writeln!(out, "{representative} {} 0", members.as_dimacs(false))?;
    }
    Ok(())
}

/// Reads class lines, as pairs of a merged variable and the root literal the positive literal of the variable is equivalent to.
fn read_classes(lines: &mut MapLines) -> Result<Vec<(Var, Lit)>, err::MapFileError> {
    let mut forest = vec![Lit::new(0, true)];
    let mut merged = Vec::default();
    while lines.peek().is_some_and(starts_with_number) {
        let class = lines.expect_literals()?;
        let Some((representative, members)) = class.split_first() else {
            continue;
        };
        for member in members {
            let var = member.var() as usize;
            if forest.len() <= var {
                forest.extend((forest.len()..=var).map(|v| Lit::new(v as Var, true)));
            }
            forest[var] = member.apply_polarity(*representative);
            merged.push(member.var());
        }
    }
    Ok(merged.into_iter().map(|var| (var, root(&forest, var))).collect())
}

fn starts_with_number(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit() || c == '-')
}

/// Reads compression tables, up to the `ee table` header.
fn read_tables(lines: &mut MapLines) -> Result<Vec<CompressionTable>, err::MapFileError> {
    let mut tables = Vec::default();
    while let Some(line) = lines.peek() {
        if line == "no table" {
            lines.next();
            continue;
        }
        if !line.starts_with("table") {
            break;
        }
        let header = lines.expect_line()?.to_string();
        let number = lines.taken;
        let Some(variables) = keyword_numbers(&header, "table", number)?.get(1).map(|v| *v as Var) else {
            log::error!(target: targets::MAP_FILE, "Malformed table header on line {number}");
            return Err(err::MapFileError::BadTable(number));
        };

        let mut inverse = vec![0];
        for old in lines.expect_numbers()?.into_iter().take_while(|n| *n != 0) {
            if old < 0 || old as Var > variables {
                log::error!(target: targets::MAP_FILE, "Variable {old} outside of table on line {}", lines.taken);
                return Err(err::MapFileError::BadTable(lines.taken));
            }
            inverse.push(old as Var);
        }

        if !lines.expect_line()?.starts_with("units") {
            log::error!(target: targets::MAP_FILE, "Missing units of table on line {}", lines.taken);
            return Err(err::MapFileError::BadTable(lines.taken));
        }
        let units = lines.expect_literals()?;

        if lines.expect_line()? != "end table" {
            log::error!(target: targets::MAP_FILE, "Unterminated table on line {}", lines.taken);
            return Err(err::MapFileError::BadTable(lines.taken));
        }

        tables.push(CompressionTable {
            variables,
            inverse,
            units,
            equivalences: (0..=variables).map(|var| Lit::new(var, true)).collect(),
        });
    }
    Ok(tables)
}

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Writes the information required to reconstruct models of the original formula.
    pub fn write_map_file(&self, out: &mut impl Write) -> std::io::Result<()> {
        let labels = self.original_labels();
        write!(out, "polarities\n{}", labels.len())?;
        for (var, weight) in &labels {
            write!(out, " {var} {weight}")?;
        }
        writeln!(out)?;

        writeln!(out, "removed weight\n{}", self.total_removed_weight())?;
        writeln!(out, "original variables\n{} - {}", self.original_var_count, self.var_count)?;

        let tables: Vec<&CompressionTable> = self
            .stack
            .entries()
            .iter()
            .filter_map(|entry| match entry {
                StackEntry::Compression(table) => Some(table),
                _ => None,
            })
            .collect();

        if !tables.is_empty() {
            writeln!(out, "compress tables")?;
            for (index, table) in tables.iter().enumerate() {
                writeln!(out, "table {index} {}", table.variables)?;
                for old in table.inverse.iter().skip(1) {
                    write!(out, "{old} ")?;
                }
                writeln!(out, "0")?;
                writeln!(out, "units {index}")?;
                writeln!(out, "{}", table.units.as_dimacs(true))?;
                writeln!(out, "end table")?;
            }
        }

        writeln!(out, "ee table")?;
        write_classes(out, &self.original_forest())?;

        writeln!(out, "postprocess stack")?;
        let mut renumbered: Vec<&CompressionTable> = Vec::default();
        for entry in self.stack.entries() {
            match entry {
                StackEntry::BlockedClause { literal, clause } => {
                    let clause: CClause = clause.iter().map(|l| to_original(&renumbered, *l)).collect();
                    writeln!(out, "bce {}", to_original(&renumbered, *literal))?;
                    writeln!(out, "{}", clause.as_dimacs(true))?;
                }

                StackEntry::Eliminated { var, clauses } => {
                    let var = to_original(&renumbered, Lit::new(*var, true)).var();
                    writeln!(out, "ve {var} {}", clauses.len())?;
                    for clause in clauses {
                        let clause: CClause = clause.iter().map(|l| to_original(&renumbered, *l)).collect();
                        writeln!(out, "{}", clause.as_dimacs(true))?;
                    }
                }

                StackEntry::EquivalenceRound { .. } => writeln!(out, "ee")?,

                StackEntry::Compression(table) => renumbered.push(table),
            }
        }
        Ok(())
    }

    /// The equivalence forest of every round of equivalence elimination, over the original variables.
    fn original_forest(&self) -> Vec<Lit> {
        let mut forest: Vec<Lit> = (0..=self.original_var_count).map(|var| Lit::new(var, true)).collect();
        let mut renumbered: Vec<&CompressionTable> = Vec::default();
        for entry in self.stack.entries() {
            match entry {
                StackEntry::EquivalenceRound { merged } => {
                    for (var, literal) in merged {
                        let var = to_original(&renumbered, Lit::new(*var, true)).var() as usize;
                        if forest.len() <= var {
                            forest.extend((forest.len()..=var).map(|v| Lit::new(v as Var, true)));
                        }
                        forest[var] = to_original(&renumbered, *literal);
                    }
                }

                StackEntry::Compression(table) => renumbered.push(table),

                _ => {}
            }
        }
        forest
    }

    /// Replaces the stack, labels, and weights of the simplifier with those of a map file.
    ///
    /// Returns the number of variables of the original formula.
    pub fn load_map_file(&mut self, reader: impl BufRead) -> Result<Var, err::MapFileError> {
        let mut lines = MapLines::read(reader)?;

        lines.expect_header("polarities")?;
        let polarities = lines.expect_numbers()?;
        let label_count = polarities.first().copied().unwrap_or(0).max(0) as usize;
        if polarities.len() < 1 + 2 * label_count {
            log::error!(target: targets::MAP_FILE, "Expected {label_count} labels on line {}", lines.taken);
            return Err(err::MapFileError::Truncated(lines.taken));
        }
        let labels: Vec<(Var, i64)> = polarities[1..1 + 2 * label_count]
            .chunks(2)
            .map(|pair| (pair[0].unsigned_abs() as Var, pair[1]))
            .collect();

        lines.expect_header("removed weight")?;
        let removed_weight = match lines.expect_numbers()?.first() {
            Some(weight) => *weight,
            None => return Err(err::MapFileError::BadNumber(lines.taken)),
        };

        lines.expect_header("original variables")?;
        let counts = lines.expect_line()?.replace('-', " ");
        let counts = numbers(&counts, lines.taken)?;
        let Some(original) = counts.first().map(|count| *count as Var) else {
            return Err(err::MapFileError::BadNumber(lines.taken));
        };
        let current = counts.get(1).map_or(original, |count| *count as Var);

        let mut tables = Vec::default();
        if lines.peek() == Some("compress tables") {
            lines.next();
            tables = read_tables(&mut lines)?;
        }

        lines.expect_header("ee table")?;
        let forest = read_classes(&mut lines)?;
        // The ee table holds the forest of the first table, if any.
        if let Some(first) = tables.first_mut() {
            for (var, literal) in &forest {
                if let Some(parent) = first.equivalences.get_mut(*var as usize) {
                    *parent = *literal;
                }
            }
        }

        lines.expect_header("postprocess stack")?;
        let mut entries = Vec::default();
        let mut last_literal = None;

        while let Some(line) = lines.next() {
            let line = line.to_string();
            let number = lines.taken;

            if line.is_empty() {
                continue;
            } else if line.starts_with("bce") {
                let literal = match keyword_numbers(&line, "bce", number)?.first() {
                    Some(literal) => Lit::from_dimacs(*literal),
                    None => match last_literal {
                        Some(literal) => literal,
                        None => return Err(err::MapFileError::BadNumber(number)),
                    },
                };
                last_literal = Some(literal);
                let clause = lines.expect_literals()?;
                entries.push(StackEntry::BlockedClause { literal, clause });
            } else if line.starts_with("ve") {
                let numbers = keyword_numbers(&line, "ve", number)?;
                let [var, count] = numbers[..] else {
                    log::error!(target: targets::MAP_FILE, "Malformed elimination on line {number}");
                    return Err(err::MapFileError::BadNumber(number));
                };
                let mut clauses = Vec::default();
                for _ in 0..count {
                    clauses.push(lines.expect_literals()?);
                }
                entries.push(StackEntry::Eliminated {
                    var: var.unsigned_abs() as Var,
                    clauses,
                });
            } else if line.starts_with("ee") {
                entries.push(StackEntry::EquivalenceRound { merged: forest.clone() });
            } else if line.starts_with("convert") {
                log::debug!(target: targets::MAP_FILE, "Skipping conversion on line {number}");
            } else {
                log::warn!(target: targets::MAP_FILE, "Unknown operation '{line}' on line {number}");
            }
        }

        // The stack is over the original variables, so the tables are replayed first.
        for table in &tables {
            entries.push(StackEntry::Compression(table.clone()));
        }

        self.stack.clear();
        self.label_weight.clear();
        self.ensure_vars(current);
        self.original_var_count = original;
        self.removed_weight = removed_weight;

        if tables.is_empty() {
            for (var, literal) in forest {
                self.ensure_vars(var.max(literal.var()));
                self.equivalent_to[var as usize] = literal;
            }
        }

        for entry in entries {
            self.stack.push(entry);
        }

        for (var, weight) in labels {
            if let Some(var) = self.current_var(var) {
                self.set_label(var, weight);
            }
        }

        log::info!(target: targets::MAP_FILE,
            "Loaded {} transformations over {original} variables",
            self.stack.len()
        );
        Ok(original)
    }

    /// The current variable of the original variable `var`, if any.
    fn current_var(&self, var: Var) -> Option<Var> {
        let mut var = var;
        for entry in self.stack.entries() {
            if let StackEntry::Compression(table) = entry {
                let forward: HashMap<Var, Var> = table
                    .inverse
                    .iter()
                    .enumerate()
                    .skip(1)
                    .map(|(new, old)| (*old, new as Var))
                    .collect();
                var = *forward.get(&var)?;
            }
        }
        Some(var)
    }

    /// Completes models of the original formula from the answer of a solver to the simplified formula.
    ///
    /// The answer is read as `s`, `o`, and `v` lines, and other lines are skipped.
    pub fn complete_model(&self, answer: impl BufRead) -> Result<CompletedModel, err::MapFileError> {
        let mut completed = CompletedModel::default();
        let mut literals = Vec::default();
        let mut has_model = false;

        for (index, line) in answer.lines().enumerate() {
            let Ok(line) = line else {
                log::error!(target: targets::MAP_FILE, "Failed to read line {} of the answer", index + 1);
                return Err(err::MapFileError::Io(index + 1));
            };
            let line = line.trim();
            if let Some(status) = line.strip_prefix("s ") {
                completed.status = Some(status.trim().to_string());
            } else if let Some(cost) = line.strip_prefix("o ") {
                let cost = numbers(cost, index + 1)?;
                completed.cost = cost.first().map(|cost| cost + self.total_removed_weight());
            } else if let Some(model) = line.strip_prefix("v") {
                has_model = true;
                literals.extend(
                    numbers(model, index + 1)?
                        .into_iter()
                        .filter(|n| *n != 0)
                        .map(Lit::from_dimacs),
                );
            }
        }

        let refuted = completed
            .status
            .as_ref()
            .is_some_and(|status| status.contains("UNSAT") || status.contains("UNKNOWN"));
        if has_model && !refuted {
            let mut model = Assignment::with_vars(self.var_count);
            for literal in literals {
                model.set(literal);
            }
            completed.models = self.complete_models(&model);
        }
        Ok(completed)
    }
}

#[cfg(test)]
mod map_file_tests {
    use crate::{
        config::Config,
        context::Simplifier,
        reconstruction::stack::StackEntry,
        structures::literal::Lit,
        types::err,
    };

    fn lits(ints: &[i64]) -> Vec<Lit> {
        ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
    }

    fn written(simplifier: &Simplifier) -> String {
        let mut map = Vec::default();
        simplifier.write_map_file(&mut map).unwrap();
        String::from_utf8(map).unwrap()
    }

    #[test]
    fn stack_survives() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.stack.push(StackEntry::BlockedClause {
            literal: Lit::from_dimacs(-1),
            clause: lits(&[-1, 2]),
        });
        simplifier.stack.push(StackEntry::EquivalenceRound {
            merged: vec![(2, Lit::from_dimacs(-3)), (4, Lit::from_dimacs(3))],
        });
        simplifier.stack.push(StackEntry::Eliminated {
            var: 3,
            clauses: vec![lits(&[3, 5]), lits(&[-3, -5])],
        });
        simplifier.ensure_vars(5);
        simplifier.set_label(5, -2);

        let map = written(&simplifier);
        assert!(map.contains("ee table\n3 -2 4 0\npostprocess stack\nbce -1\n-1 2 0\nee\nve 3 2\n"));

        let mut fresh = Simplifier::from_config(Config::default());
        assert_eq!(fresh.load_map_file(map.as_bytes()), Ok(5));
        assert_eq!(fresh.stack.entries(), simplifier.stack.entries());
        assert_eq!(fresh.labels().collect::<Vec<_>>(), vec![(5, -2)]);
    }

    #[test]
    fn compressed_labels() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[-1])).unwrap();
        simplifier.add_clause(lits(&[2, 3])).unwrap();
        simplifier.set_label(3, 7);
        assert!(simplifier.compress());

        let map = written(&simplifier);
        assert!(map.starts_with("polarities\n1 3 7\n"));
        assert!(map.contains("table 0 3\n2 3 0\nunits 0\n-1 0\nend table\n"));

        let mut fresh = Simplifier::from_config(Config::default());
        assert_eq!(fresh.load_map_file(map.as_bytes()), Ok(3));
        assert_eq!(fresh.labels().collect::<Vec<_>>(), vec![(2, 7)]);

        let completed = fresh.complete_model("o 0\ns OPTIMUM FOUND\nv 1 0\n".as_bytes()).unwrap();
        assert_eq!(completed.cost, Some(0));
        assert_eq!(completed.models.len(), 1);
        assert_eq!(completed.models[0].as_dimacs(), "-1 2 3");
    }

    #[test]
    fn bare_equivalence_entry() {
        let map = "polarities\n0\nremoved weight\n0\noriginal variables\n2 - 2\nee table\n1 2 0\npostprocess stack\nee\n";
        let mut simplifier = Simplifier::from_config(Config::default());
        assert_eq!(simplifier.load_map_file(map.as_bytes()), Ok(2));

        let completed = simplifier.complete_model("s SATISFIABLE\nv 1 0\n".as_bytes()).unwrap();
        assert_eq!(completed.to_string(), "s SATISFIABLE\nv 1 2 0\n");

        let completed = simplifier.complete_model("s SATISFIABLE\nv -1 0\n".as_bytes()).unwrap();
        assert_eq!(completed.to_string(), "s SATISFIABLE\nv -1 -2 0\n");
    }

    #[test]
    fn equivalence_chains_flatten() {
        let map = "polarities\n0\nremoved weight\n0\noriginal variables\n3 - 3\nee table\n1 -2 0\n2 3 0\npostprocess stack\nee\n";
        let mut simplifier = Simplifier::from_config(Config::default());
        assert_eq!(simplifier.load_map_file(map.as_bytes()), Ok(3));

        let completed = simplifier.complete_model("v 1 0\n".as_bytes()).unwrap();
        assert_eq!(completed.models[0].as_dimacs(), "1 -2 -3");
    }

    #[test]
    fn conversion_skipped() {
        let map = "polarities\n0\nremoved weight\n0\noriginal variables\n2 - 2\nee table\npostprocess stack\nconvert\nbce 1\n1 2 0\n";
        let mut simplifier = Simplifier::from_config(Config::default());
        assert_eq!(simplifier.load_map_file(map.as_bytes()), Ok(2));
        assert_eq!(
            simplifier.stack.entries(),
            &[StackEntry::BlockedClause {
                literal: Lit::from_dimacs(1),
                clause: lits(&[1, 2]),
            }]
        );
    }

    #[test]
    fn entries_after_compression() {
        let mut simplifier = Simplifier::from_config(Config::default());
        simplifier.add_clause(lits(&[-1])).unwrap();
        simplifier.add_clause(lits(&[3])).unwrap();
        simplifier.add_clause(lits(&[2, 4])).unwrap();
        simplifier.add_clause(lits(&[-2, -4])).unwrap();
        assert!(simplifier.compress());
        assert!(simplifier.eliminate_variable(1, false));

        let map = written(&simplifier);
        assert!(map.contains("ve 2 2\n"));
        assert!(!map.contains("compress 0"));

        let mut fresh = Simplifier::from_config(Config::default());
        assert_eq!(fresh.load_map_file(map.as_bytes()), Ok(4));

        let completed = fresh.complete_model("v -2 0\n".as_bytes()).unwrap();
        assert_eq!(completed.models[0].as_dimacs(), "-1 2 3 -4");

        let direct = simplifier.complete_models(&crate::reconstruction::assignment_from(&lits(&[-2])));
        assert_eq!(direct, completed.models);
    }

    #[test]
    fn unsatisfiable_answer() {
        let simplifier = Simplifier::from_config(Config::default());
        let completed = simplifier.complete_model("s UNSATISFIABLE\n".as_bytes()).unwrap();
        assert!(completed.models.is_empty());
        assert_eq!(completed.to_string(), "s UNSATISFIABLE\n");
    }

    #[test]
    fn malformed() {
        let mut simplifier = Simplifier::from_config(Config::default());
        assert_eq!(
            simplifier.load_map_file("weights\n".as_bytes()),
            Err(err::MapFileError::MissingSection(1))
        );

        let truncated = "polarities\n0\nremoved weight\n0\noriginal variables\n2 - 2\nee table\npostprocess stack\nve 1 2\n1 2 0\n";
        assert_eq!(
            simplifier.load_map_file(truncated.as_bytes()),
            Err(err::MapFileError::Truncated(10))
        );

        let bad_number = "polarities\n0\nremoved weight\nlots\n";
        assert_eq!(
            simplifier.load_map_file(bad_number.as_bytes()),
            Err(err::MapFileError::BadNumber(4))
        );
    }
}
