use crate::formula::{Clause, Formula, Literal, Variable};
use log::trace;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum BcpResult {
    Conflict,
    NoConflict,
}

/// Occurrence counters for each polarity of each variable. Only variables that currently
/// occur are stored, so the size follows the clause set rather than the largest id.
#[derive(Clone, Default, Debug)]
pub struct PolarityCounts {
    counts: BTreeMap<Variable, (usize, usize)>,
}

impl PolarityCounts {
    fn add(&mut self, clause: &Clause) {
        for literal in clause.literals() {
            let entry = self.counts.entry(*literal.variable()).or_default();
            if literal.is_positive() {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
    }

    fn remove(&mut self, clause: &Clause) {
        for literal in clause.literals() {
            if let Some(entry) = self.counts.get_mut(literal.variable()) {
                let count = if literal.is_positive() { &mut entry.0 } else { &mut entry.1 };
                debug_assert!(*count > 0);
                *count -= 1;
                if *entry == (0, 0) {
                    self.counts.remove(literal.variable());
                }
            }
        }
    }

    pub fn count(&self, literal: &Literal) -> usize {
        match self.counts.get(literal.variable()) {
            Some((positive, _)) if literal.is_positive() => *positive,
            Some((_, negative)) => *negative,
            None => 0,
        }
    }

    /// Literals that occur while their complement does not, in increasing variable order.
    pub fn pure_literals(&self) -> Vec<Literal> {
        self.counts
            .iter()
            .filter_map(|(var, counts)| match *counts {
                (_, 0) => Some(Literal::Positive(*var)),
                (0, _) => Some(Literal::Negative(*var)),
                _ => None,
            })
            .collect()
    }
}

/// The working clause database of a single engine run.
///
/// Clauses iterate in lexicographic order of their literal sequences. The polarity counters
/// always describe exactly the clauses currently in the set, and are cloned along with it.
#[derive(Clone, Default, Debug)]
pub struct ClauseSet {
    clauses: BTreeSet<Clause>,
    counts: PolarityCounts,
}

impl ClauseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the initial working set, dropping tautologies.
    pub fn from_formula(formula: &Formula) -> Self {
        let mut set = Self::new();
        for clause in formula.clauses() {
            if clause.is_tautology() {
                trace!("dropping tautology {}", clause);
                continue;
            }
            set.insert(clause.clone());
        }
        set
    }

    /// Returns false if an identical clause was already present.
    pub fn insert(&mut self, clause: Clause) -> bool {
        if self.clauses.contains(&clause) {
            return false;
        }
        self.counts.add(&clause);
        self.clauses.insert(clause)
    }

    pub fn remove(&mut self, clause: &Clause) -> bool {
        let removed = self.clauses.remove(clause);
        if removed {
            self.counts.remove(clause);
        }
        removed
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.contains(clause)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub fn first_unit(&self) -> Option<Literal> {
        self.clauses.iter().find_map(Clause::as_unit)
    }

    /// The first literal of the first clause in canonical order.
    pub fn first_literal(&self) -> Option<Literal> {
        self.clauses.iter().find_map(Clause::first)
    }

    pub fn counts(&self) -> &PolarityCounts {
        &self.counts
    }

    pub fn pure_literals(&self) -> Vec<Literal> {
        self.counts.pure_literals()
    }

    /// Makes `literal` true: clauses containing it are satisfied and dropped, and its
    /// complement is struck from the rest. Reports a conflict if that leaves an empty clause.
    pub fn assert_literal(&mut self, literal: Literal) -> BcpResult {
        let complement = literal.negated();
        if self.counts.count(&literal) == 0 && self.counts.count(&complement) == 0 {
            return BcpResult::NoConflict;
        }

        let touched: Vec<Clause> = self
            .clauses
            .iter()
            .filter(|c| c.contains(literal) || c.contains(complement))
            .cloned()
            .collect();
        for clause in touched {
            self.remove(&clause);
            if clause.contains(literal) {
                continue;
            }
            let shortened = clause.without(complement);
            if shortened.is_empty() {
                trace!("{} falsifies {}", literal, clause);
                return BcpResult::Conflict;
            }
            self.insert(shortened);
        }
        BcpResult::NoConflict
    }

    /// Drops every clause containing `literal`; returns how many were removed.
    pub fn remove_containing(&mut self, literal: Literal) -> usize {
        let satisfied: Vec<Clause> = self.clauses.iter().filter(|c| c.contains(literal)).cloned().collect();
        for clause in &satisfied {
            self.remove(clause);
        }
        satisfied.len()
    }
}

impl Extend<Clause> for ClauseSet {
    fn extend<I: IntoIterator<Item = Clause>>(&mut self, iter: I) {
        for clause in iter {
            self.insert(clause);
        }
    }
}

impl Display for ClauseSet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for clause in &self.clauses {
            for literal in clause.literals() {
                write!(f, "{} ", literal)?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}
