/*!
Unhiding, through stamps of a depth-first traversal of the [binary implication graph](crate::db::big).

Each literal is given a *discovery* and a *finish* stamp by a depth-first traversal of the implication graph, started from the roots of the graph (literals with no edge to them) and then from any literal left unstamped.
If the interval of stamps of one literal contains the interval of another, the first literal implies the second.
So, checks which would require a search through the graph are made by comparing stamps.

With *advanced* stamping, the traversal also:
- Removes transitive edges, if the edge leads to a literal observed (by some other path) since the discovery of the source of the edge. Only with the `unhide_transitive` option.
- Fixes failed literals, as a literal which implies both some literal and the complement of the literal fails.
- Finds equivalent literals, as literals in a strongly connected component are given the same stamps and collected as a class when the component is finished.

After stamping, each clause of at least three literals is checked:
- *Hidden tautology elimination*: if the negation of one literal of the clause implies another literal of the clause, the clause is a tautology given the binary clauses, and is removed.
- *Hidden literal elimination*: if one literal of the clause implies another, the first literal is removed.
  Literals are checked in order of discovery, or in the order of discovery of their complements, or both.

The adjacency lists of the graph are shuffled before each traversal, unless `unhide_no_shuffle` is set, so repeated rounds of stamping find different things.

For details, see: Heule, Järvisalo, and Biere, *Efficient CNF simplification based on binary implication graphs*, SAT 2011.
*/

use rand::seq::SliceRandom;

use crate::{
    context::GenericSimplifier,
    misc::log::targets::{self},
    structures::{
        clause::Clause,
        literal::{literal_capacity, Lit},
    },
};

/// The stamps of a literal.
#[derive(Clone, Copy, Debug)]
struct StampInfo {
    discovered: u32,
    finished: u32,
    observed: u32,
    parent: Lit,
    root: Lit,
}

/// A literal of the traversal, with the position of the next edge to follow.
struct Frame {
    literal: Lit,
    index: usize,

    /// Cleared if the literal is part of a component with some literal discovered earlier.
    flag: bool,
}

/// The state of one round of stamping.
struct Stamping {
    info: Vec<StampInfo>,
    stamp: u32,
    frames: Vec<Frame>,

    /// Literals of unfinished components, in order of discovery.
    pending: Vec<Lit>,
    classes: Vec<Vec<Lit>>,
}

impl Stamping {
    fn new(capacity: usize) -> Self {
        Stamping {
            info: (0..capacity)
                .map(|index| StampInfo {
                    discovered: 0,
                    finished: 0,
                    observed: 0,
                    parent: Lit::from_index(index),
                    root: Lit::from_index(index),
                })
                .collect(),
            stamp: 0,
            frames: Vec::default(),
            pending: Vec::default(),
            classes: Vec::default(),
        }
    }

    fn of(&self, literal: Lit) -> &StampInfo {
        &self.info[literal.index()]
    }

    fn of_mut(&mut self, literal: Lit) -> &mut StampInfo {
        &mut self.info[literal.index()]
    }

    fn open(&mut self, literal: Lit) {
        self.stamp += 1;
        let stamp = self.stamp;
        let info = self.of_mut(literal);
        info.discovered = stamp;
        info.observed = stamp;
        self.pending.push(literal);
        self.frames.push(Frame {
            literal,
            index: 0,
            flag: true,
        });
    }

    /// True if the stamps of `ancestor` contain the stamps of `descendant`, and so `ancestor` implies `descendant`.
    fn implies(&self, ancestor: Lit, descendant: Lit) -> bool {
        let a = self.of(ancestor);
        let d = self.of(descendant);
        a.discovered <= d.discovered && d.finished <= a.finished
    }
}

impl<R: rand::Rng + std::default::Default> GenericSimplifier<R> {
    /// Unhiding, with some number of rounds of stamping.
    ///
    /// Returns true if some clause or literal was removed, some literal was fixed, or some equivalence was found.
    pub fn unhiding(&mut self) -> bool {
        if self.budgets.unhide.exhausted() {
            return false;
        }
        self.budgets.unhide.spend(1);

        let mut changed = false;
        for _ in 0..self.config.unhide_iterations.value {
            if self.is_unsatisfiable() || self.out_of_time() {
                break;
            }
            changed |= self.unhide_round();
        }
        changed
    }

    fn unhide_round(&mut self) -> bool {
        let before = self.counters.transitive_edges
            + self.counters.failed_literals
            + self.counters.hidden_tautologies
            + self.counters.hidden_literals
            + self.counters.equivalences;

        let advanced = self.config.unhide_advanced.value;
        let shuffle = !self.config.unhide_no_shuffle.value;

        let mut stamping = Stamping::new(literal_capacity(self.var_count));
        let literals: Vec<Lit> = (1..=self.var_count)
            .filter(|v| self.assignment.is_undef(*v) && !self.is_eliminated(*v) && !self.is_replaced(*v))
            .flat_map(|v| [Lit::new(v, true), Lit::new(v, false)])
            .collect();

        // A literal is a root if no edge leads to the literal, that is if the complement implies nothing.
        let mut roots: Vec<Lit> = literals
            .iter()
            .filter(|l| self.big.implied(l.negate()).is_empty())
            .copied()
            .collect();
        if shuffle {
            roots.shuffle(&mut self.rng);
        }
        for root in roots {
            self.stamp_from(&mut stamping, root, advanced, shuffle);
            if self.is_unsatisfiable() {
                return true;
            }
        }

        let mut rest: Vec<Lit> = literals
            .iter()
            .filter(|l| stamping.of(**l).discovered == 0)
            .copied()
            .collect();
        if shuffle {
            rest.shuffle(&mut self.rng);
        }
        for literal in rest {
            self.stamp_from(&mut stamping, literal, advanced, shuffle);
            if self.is_unsatisfiable() {
                return true;
            }
        }

        self.propagate();
        if self.is_unsatisfiable() {
            return true;
        }

        self.unhide_simplify(&stamping);
        self.propagate();
        if self.is_unsatisfiable() {
            return true;
        }

        if advanced && self.config.unhide_ee.value && !stamping.classes.is_empty() {
            let mut merged = Vec::default();
            for class in std::mem::take(&mut stamping.classes) {
                self.add_equivalences(&class, &mut merged);
                if self.is_unsatisfiable() {
                    return true;
                }
            }
            self.apply_equivalences(merged);
        }

        let changes = self.counters.transitive_edges
            + self.counters.failed_literals
            + self.counters.hidden_tautologies
            + self.counters.hidden_literals
            + self.counters.equivalences
            - before;
        if changes > 0 {
            log::info!(target: targets::UNHIDING, "Round of unhiding made {changes} changes");
        }
        changes > 0
    }

    /// A depth-first traversal from `start`, if `start` has not been stamped.
    fn stamp_from(&mut self, stamping: &mut Stamping, start: Lit, advanced: bool, shuffle: bool) {
        if stamping.of(start).discovered != 0 {
            return;
        }
        stamping.pending.clear();
        if shuffle {
            self.big.implied_mut(start).shuffle(&mut self.rng);
        }
        stamping.open(start);

        while let Some(frame) = stamping.frames.last_mut() {
            let current = frame.literal;
            let next = self.big.implied(current).get(frame.index).copied();

            let Some(implied) = next else {
                let flag = frame.flag;
                stamping.frames.pop();
                self.finish_literal(stamping, current, flag, advanced);

                if let Some(parent_literal) = stamping.frames.last().map(|f| f.literal) {
                    let info = *stamping.of(current);
                    if advanced
                        && info.finished == 0
                        && info.discovered < stamping.of(parent_literal).discovered
                    {
                        stamping.of_mut(parent_literal).discovered = info.discovered;
                        if let Some(parent) = stamping.frames.last_mut() {
                            parent.flag = false;
                        }
                    }
                    stamping.of_mut(current).observed = stamping.stamp;
                }
                continue;
            };
            frame.index += 1;

            if !advanced {
                if stamping.of(implied).discovered == 0 {
                    self.descend(stamping, current, implied, shuffle);
                }
                continue;
            }

            if self.config.unhide_transitive.value
                && stamping.of(current).discovered < stamping.of(implied).observed
                && self.remove_transitive(current, implied)
            {
                if let Some(frame) = stamping.frames.last_mut() {
                    frame.index -= 1;
                }
                continue;
            }

            let root = stamping.of(current).root;
            let complement_observed = stamping.of(implied.negate()).observed;
            if stamping.of(root).discovered <= complement_observed {
                let mut failed = current;
                while stamping.of(failed).discovered > complement_observed {
                    failed = stamping.of(failed).parent;
                }
                log::trace!(target: targets::UNHIDING, "Failed literal {failed}");
                if self.assignment.is_undef(failed.var()) {
                    self.counters.failed_literals += 1;
                }
                self.enqueue(failed.negate());
                if self.is_unsatisfiable() {
                    return;
                }
                let complement = stamping.of(implied.negate());
                if complement.discovered != 0 && complement.finished == 0 {
                    continue;
                }
            }

            if stamping.of(implied).discovered == 0 {
                self.descend(stamping, current, implied, shuffle);
                continue;
            }

            let info = *stamping.of(implied);
            if info.finished == 0 && info.discovered < stamping.of(current).discovered {
                stamping.of_mut(current).discovered = info.discovered;
                if let Some(frame) = stamping.frames.last_mut() {
                    frame.flag = false;
                }
            }
            stamping.of_mut(implied).observed = stamping.stamp;
        }
    }

    /// Continues the traversal at `implied`, reached through `current`.
    fn descend(&mut self, stamping: &mut Stamping, current: Lit, implied: Lit, shuffle: bool) {
        let root = stamping.of(current).root;
        let info = stamping.of_mut(implied);
        info.parent = current;
        info.root = root;
        if shuffle {
            self.big.implied_mut(implied).shuffle(&mut self.rng);
        }
        stamping.open(implied);
    }

    /// Gives `literal` a finish stamp, and collects a component if `literal` is the first literal of the component.
    fn finish_literal(&mut self, stamping: &mut Stamping, literal: Lit, flag: bool, advanced: bool) {
        if !advanced {
            stamping.stamp += 1;
            stamping.of_mut(literal).finished = stamping.stamp;
            return;
        }
        if !flag {
            return;
        }

        stamping.stamp += 1;
        let stamp = stamping.stamp;
        let discovered = stamping.of(literal).discovered;
        let mut class = Vec::default();
        while let Some(member) = stamping.pending.pop() {
            let info = stamping.of_mut(member);
            info.discovered = discovered;
            info.finished = stamp;
            class.push(member);
            if member == literal {
                break;
            }
        }
        if class.len() > 1 {
            stamping.classes.push(class);
        }
    }

    /// Removes the binary clause of the edge `from → to`, returning true if some clause was removed.
    fn remove_transitive(&mut self, from: Lit, to: Lit) -> bool {
        let key = self.occurrences.list(from.negate()).iter().copied().find(|key| {
            let clause = &self.clause_db[*key];
            clause.size() == 2 && clause.literals().contains(&to)
        });
        match key {
            Some(key) => {
                log::trace!(target: targets::UNHIDING, "Transitive edge {from} → {to}");
                self.remove_clause(key);
                self.counters.transitive_edges += 1;
                true
            }
            None => false,
        }
    }

    /// Hidden tautology and hidden literal elimination by stamps.
    fn unhide_simplify(&mut self, stamping: &Stamping) {
        let hle = self.config.unhide_hle.value;
        let hte = self.config.unhide_hte.value;

        for key in self.clause_db.live_keys() {
            if self.is_unsatisfiable() {
                return;
            }
            if !self.clause_db.is_live(key) || self.clause_db[key].size() < 3 {
                continue;
            }
            let literals = self.clause_db[key].literals().to_vec();

            if hte && hidden_tautology(stamping, &literals) {
                log::trace!(target: targets::UNHIDING, "Hidden tautology {}", literals.as_dimacs(false));
                self.remove_clause(key);
                self.counters.hidden_tautologies += 1;
                continue;
            }

            let mut remaining = literals;
            let mut hidden = Vec::default();
            if hle == 1 || hle == 3 {
                remaining.sort_by_key(|l| stamping.of(*l).discovered);
                let mut finished = remaining.last().map(|l| stamping.of(*l).finished).unwrap_or(0);
                for literal in remaining.iter().rev().skip(1) {
                    let info = stamping.of(*literal);
                    match info.finished > finished {
                        true => hidden.push(*literal),
                        false => finished = info.finished,
                    }
                }
                remaining.retain(|l| !hidden.contains(l));
            }
            if hle == 2 || hle == 3 {
                let mut complements: Vec<Lit> = remaining.iter().map(|l| l.negate()).collect();
                complements.sort_by_key(|l| stamping.of(*l).discovered);
                let mut finished = complements.first().map(|l| stamping.of(*l).finished).unwrap_or(0);
                for complement in complements.iter().skip(1) {
                    let info = stamping.of(*complement);
                    match info.finished < finished {
                        true => hidden.push(complement.negate()),
                        false => finished = info.finished,
                    }
                }
            }

            for literal in hidden {
                log::trace!(target: targets::UNHIDING, "Hidden literal {literal}");
                self.strengthen(key, literal);
                self.counters.hidden_literals += 1;
                if self.is_unsatisfiable() {
                    return;
                }
            }
        }
    }
}

/// True if the negation of some literal of `clause` implies some other literal of `clause`, by stamps.
fn hidden_tautology(stamping: &Stamping, clause: &[Lit]) -> bool {
    let mut positive = clause.to_vec();
    positive.sort_by_key(|l| stamping.of(*l).discovered);
    let mut negative: Vec<Lit> = clause.iter().map(|l| l.negate()).collect();
    negative.sort_by_key(|l| stamping.of(*l).discovered);

    let (mut p, mut n) = (0, 0);
    loop {
        let (l_pos, l_neg) = (positive[p], negative[n]);
        if stamping.of(l_neg).discovered > stamping.of(l_pos).discovered {
            p += 1;
            if p == positive.len() {
                return false;
            }
        } else if stamping.of(l_neg).finished < stamping.of(l_pos).finished {
            n += 1;
            if n == negative.len() {
                return false;
            }
        } else {
            debug_assert!(stamping.implies(l_neg, l_pos));
            return true;
        }
    }
}
