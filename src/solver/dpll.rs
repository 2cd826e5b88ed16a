use crate::assignment::Assignment;
use crate::formula::clause_set::BcpResult;
use crate::formula::{Clause, ClauseSet, Formula};
use crate::solver::{eliminate_pure_literals, propagate_units, Stats};
use crate::SatResult;
use log::{debug, trace};

/// Recursive DPLL search.
///
/// Each branch owns its clause set (polarity counters included) and assignment, so
/// backtracking is just dropping the failed branch's state. The true branch works on a
/// clone; the false branch reuses the parent's state since nothing else needs it afterwards.
pub struct Dpll {
    clauses: ClauseSet,
    model: Option<Assignment>,
    stats: Stats,
}

impl Dpll {
    pub fn new(formula: &Formula) -> Self {
        Self {
            clauses: ClauseSet::from_formula(formula),
            model: None,
            stats: Stats::default(),
        }
    }

    pub fn solve(&mut self) -> SatResult {
        self.model = None;
        if self.clauses.has_empty_clause() {
            return SatResult::Unsatisfiable;
        }

        let root = self.clauses.clone();
        match self.search(root, Assignment::new(), 0) {
            Some(model) => {
                debug!("model with {} decided variables", model.len());
                self.model = Some(model);
                SatResult::Satisfiable
            }
            None => SatResult::Unsatisfiable,
        }
    }

    /// The satisfying assignment found by the last successful `solve`. Variables it leaves
    /// undecided can take either value.
    pub fn model(&self) -> Option<&Assignment> {
        self.model.as_ref()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn search(&mut self, mut clauses: ClauseSet, mut assignment: Assignment, depth: usize) -> Option<Assignment> {
        if propagate_units(&mut clauses, &mut assignment) == BcpResult::Conflict {
            trace!("conflict at depth {}", depth);
            self.stats.conflicts += 1;
            return None;
        }
        if clauses.is_empty() {
            return Some(assignment);
        }

        eliminate_pure_literals(&mut clauses, &mut assignment);
        if clauses.is_empty() {
            return Some(assignment);
        }

        let literal = clauses.first_literal()?;
        self.stats.decisions += 1;

        trace!("decide {} at depth {}", literal, depth);
        let mut positive = clauses.clone();
        positive.insert(Clause::new(vec![literal]));
        if let Some(model) = self.search(positive, assignment.clone(), depth + 1) {
            return Some(model);
        }

        trace!("backtrack: decide {} at depth {}", literal.negated(), depth);
        clauses.insert(Clause::new(vec![literal.negated()]));
        self.search(clauses, assignment, depth + 1)
    }
}
