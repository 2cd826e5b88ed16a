//! Decision procedures over a [`ClauseSet`], plus the simplification steps they share.

pub mod dp;
pub mod dpll;
pub mod saturation;

use crate::assignment::Assignment;
use crate::formula::clause_set::BcpResult;
use crate::formula::{ClauseSet, Formula};
use crate::SatResult;
use log::trace;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

pub use dp::DavisPutnam;
pub use dpll::Dpll;
pub use saturation::Saturation;

pub const DEFAULT_CLAUSE_BUDGET: usize = 10000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Total number of resolvents the saturation-based engines may derive before giving up.
    pub clause_budget: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clause_budget: DEFAULT_CLAUSE_BUDGET,
        }
    }
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Stats {
    pub rounds: usize,
    pub derived: usize,
    pub decisions: usize,
    pub conflicts: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "rounds={} derived={} decisions={} conflicts={}",
            self.rounds, self.derived, self.decisions, self.conflicts
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engine {
    Resolution,
    DavisPutnam,
    Dpll,
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resolution" => Ok(Engine::Resolution),
            "dp" => Ok(Engine::DavisPutnam),
            "dpll" => Ok(Engine::Dpll),
            _ => Err(format!("unknown engine '{}'", s)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Outcome {
    pub result: SatResult,
    /// Only DPLL produces a witness.
    pub model: Option<Assignment>,
    pub stats: Stats,
}

/// Runs one engine over a private copy of `formula`.
pub fn solve(formula: &Formula, engine: Engine, config: &Config) -> Outcome {
    match engine {
        Engine::Resolution => {
            let mut solver = Saturation::new(formula, config);
            let result = solver.solve();
            Outcome {
                result,
                model: None,
                stats: *solver.stats(),
            }
        }
        Engine::DavisPutnam => {
            let mut solver = DavisPutnam::new(formula, config);
            let result = solver.solve();
            Outcome {
                result,
                model: None,
                stats: *solver.stats(),
            }
        }
        Engine::Dpll => {
            let mut solver = Dpll::new(formula);
            let result = solver.solve();
            Outcome {
                result,
                model: solver.model().cloned(),
                stats: *solver.stats(),
            }
        }
    }
}

/// Repeatedly takes a unit clause, records its literal and simplifies the set with it,
/// until no unit clause remains or some clause is falsified.
pub fn propagate_units(clauses: &mut ClauseSet, assignment: &mut Assignment) -> BcpResult {
    while let Some(unit) = clauses.first_unit() {
        if assignment.value_of(&unit) == Some(false) {
            return BcpResult::Conflict;
        }
        trace!("unit {}", unit);
        assignment.assign(unit);
        if clauses.assert_literal(unit) == BcpResult::Conflict {
            return BcpResult::Conflict;
        }
    }
    BcpResult::NoConflict
}

/// Fixes every pure literal and drops the clauses it satisfies, until none is left.
/// Returns the number of literals fixed.
pub fn eliminate_pure_literals(clauses: &mut ClauseSet, assignment: &mut Assignment) -> usize {
    let mut fixed = 0;
    loop {
        let pure = clauses.pure_literals();
        if pure.is_empty() {
            return fixed;
        }
        for literal in pure {
            let removed = clauses.remove_containing(literal);
            trace!("pure {} satisfies {} clauses", literal, removed);
            assignment.assign(literal);
            fixed += 1;
        }
    }
}
