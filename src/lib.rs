//! Resolution-based decision procedures for CNF satisfiability: plain resolution
//! saturation, Davis-Putnam, and DPLL.

pub mod assignment;
pub mod formula;
pub mod solver;

#[cfg(test)]
mod brute_force;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SatResult {
    Satisfiable,
    Unsatisfiable,
    /// A saturation-based engine derived its whole clause budget without reaching a fixed
    /// point or a contradiction. This does not prove satisfiability.
    BudgetExhausted,
}

impl SatResult {
    /// Reads an exhausted budget as satisfiable: no contradiction was observed, so saturation
    /// is assumed. Unsound, but it is what a caller wanting a plain yes/no usually expects.
    pub fn assuming_saturation(self) -> SatResult {
        match self {
            SatResult::BudgetExhausted => SatResult::Satisfiable,
            other => other,
        }
    }
}

pub use assignment::Assignment;
pub use formula::{Clause, ClauseSet, Formula, Literal, Resolvent, Variable};
pub use solver::{solve, Config, DavisPutnam, Dpll, Engine, Outcome, Saturation, Stats};
