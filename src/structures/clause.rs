/*!
Clauses, and helpers for things which may be viewed as clauses.

A clause is a disjunction of literals.
The canonical (free standing) representation of a clause is a vector of literals, [CClause].
Stored clauses live in the [clause database](crate::db::clause) and are accessed through a [ClauseRef](crate::db::ClauseRef).

The [Clause] trait is implemented for stored clauses, vectors, and slices alike.

```rust
# use otter_simp::structures::clause::{normalize, Clause, Normalized};
# use otter_simp::structures::literal::Lit;
let clause = vec![Lit::from_dimacs(3), Lit::from_dimacs(-1), Lit::from_dimacs(3)];

match normalize(clause) {
    Normalized::Clause(clause) => assert_eq!(clause.as_dimacs(true), "-1 3 0"),
    Normalized::Tautology => panic!("Not a tautology"),
}

let tautology = vec![Lit::from_dimacs(2), Lit::from_dimacs(-2)];
assert_eq!(normalize(tautology), Normalized::Tautology);
```
*/

use crate::structures::{assignment::Assignment, literal::Lit};

/// The canonical representation of a clause.
pub type CClause = Vec<Lit>;

/// Methods shared by any slice-like view of a clause.
pub trait Clause {
    /// The literals of the clause, as a slice.
    fn literals(&self) -> &[Lit];

    /// The clause as a string of DIMACS integers, terminated with a `0` if `zero` is set.
    fn as_dimacs(&self, zero: bool) -> String {
        let mut the_string = String::default();
        for literal in self.literals() {
            the_string.push_str(&format!("{literal} "));
        }
        match zero {
            true => the_string.push('0'),
            false => {
                the_string.pop();
            }
        }
        the_string
    }

    /// True if some literal of the clause is true on `assignment`.
    fn satisfied_on(&self, assignment: &Assignment) -> bool {
        self.literals().iter().any(|l| assignment.is_true(*l))
    }

    /// True if the clause contains `literal`.
    fn holds(&self, literal: Lit) -> bool {
        self.literals().contains(&literal)
    }
}

impl Clause for CClause {
    fn literals(&self) -> &[Lit] {
        self
    }
}

impl Clause for [Lit] {
    fn literals(&self) -> &[Lit] {
        self
    }
}

/// The result of [normalizing](normalize) a clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Normalized {
    /// The clause contains some literal and its negation.
    Tautology,

    /// The literals of the clause, sorted and without duplicates.
    Clause(CClause),
}

/// Sorts the literals of `clause`, removes duplicates, and checks for tautology.
pub fn normalize(mut clause: CClause) -> Normalized {
    clause.sort_unstable();
    clause.dedup();
    // Complementary literals are adjacent after sorting.
    if clause.windows(2).any(|pair| pair[0].var() == pair[1].var()) {
        return Normalized::Tautology;
    }
    Normalized::Clause(clause)
}

/// True if every literal of `sub` is a literal of `sup`, where both are sorted.
pub fn sorted_subset(sub: &[Lit], sup: &[Lit]) -> bool {
    let mut sup_iter = sup.iter();
    'sub_loop: for literal in sub {
        for other in sup_iter.by_ref() {
            match other.cmp(literal) {
                std::cmp::Ordering::Less => continue,
                std::cmp::Ordering::Equal => continue 'sub_loop,
                std::cmp::Ordering::Greater => return false,
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod clause_tests {
    use super::*;

    fn lits(ints: &[i64]) -> CClause {
        ints.iter().map(|i| Lit::from_dimacs(*i)).collect()
    }

    #[test]
    fn subset_check() {
        let mut small = lits(&[1, -3]);
        let mut large = lits(&[-3, 1, 4]);
        small.sort();
        large.sort();

        assert!(sorted_subset(&small, &large));
        assert!(!sorted_subset(&large, &small));
        assert!(sorted_subset(&[], &small));
    }

    #[test]
    fn dimacs_string() {
        let clause = lits(&[1, -2]);
        assert_eq!(clause.as_dimacs(false), "1 -2");
        assert_eq!(clause.as_dimacs(true), "1 -2 0");
    }
}
