use crate::assignment::Assignment;
use crate::formula::clause_set::BcpResult;
use crate::formula::{ClauseSet, Formula};
use crate::solver::saturation::saturate;
use crate::solver::{eliminate_pure_literals, propagate_units, Config, Stats};
use crate::SatResult;
use log::debug;

/// Davis-Putnam: resolution saturation where every round first runs unit propagation and
/// pure-literal elimination over the working set.
///
/// Nothing is ever undone: the procedure never branches, so each simplification is sound
/// with respect to the set it was applied to.
pub struct DavisPutnam {
    clauses: ClauseSet,
    implied: Assignment,
    config: Config,
    stats: Stats,
}

impl DavisPutnam {
    pub fn new(formula: &Formula, config: &Config) -> Self {
        Self {
            clauses: ClauseSet::from_formula(formula),
            implied: Assignment::new(),
            config: config.clone(),
            stats: Stats::default(),
        }
    }

    pub fn solve(&mut self) -> SatResult {
        if self.clauses.has_empty_clause() {
            return SatResult::Unsatisfiable;
        }
        let implied = &mut self.implied;
        saturate(&mut self.clauses, &self.config, &mut self.stats, |clauses| {
            if propagate_units(clauses, implied) == BcpResult::Conflict {
                debug!("unit propagation derived the empty clause");
                return BcpResult::Conflict;
            }
            let pure = eliminate_pure_literals(clauses, implied);
            debug!("{} pure literals, {} clauses left", pure, clauses.len());
            BcpResult::NoConflict
        })
    }

    /// Literals fixed by unit propagation or pure-literal elimination. This is not a model:
    /// resolution may have consumed the clauses that constrain the remaining variables.
    pub fn implied(&self) -> &Assignment {
        &self.implied
    }

    pub fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::solve_brute_force;
    use crate::formula::{formula_3sat_strategy, n, p, Clause, Literal};
    use proptest::prelude::*;

    fn formula(clauses: Vec<Vec<Literal>>) -> Formula {
        Formula::new(clauses.into_iter().map(Clause::new))
    }

    fn solve(f: &Formula) -> SatResult {
        DavisPutnam::new(f, &Config::default()).solve()
    }

    #[test]
    fn empty_formula_sat() {
        assert_eq!(solve(&formula(vec![])), SatResult::Satisfiable);
    }

    #[test]
    fn two_variable_contradiction() {
        let f = formula(vec![
            vec![p(1), p(2)],
            vec![n(1), p(2)],
            vec![p(1), n(2)],
            vec![n(1), n(2)],
        ]);
        assert_eq!(solve(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn unit_conflict() {
        let f = formula(vec![vec![p(5)], vec![n(5), p(3)], vec![n(3)]]);
        let mut solver = DavisPutnam::new(&f, &Config::default());
        assert_eq!(solver.solve(), SatResult::Unsatisfiable);
        assert_eq!(solver.stats().rounds, 0);
    }

    #[test]
    fn units_and_pure_literals_settle_without_resolution() {
        let f = formula(vec![vec![p(1)], vec![n(1), p(2)], vec![p(3), p(4)], vec![p(3), n(4)]]);
        let mut solver = DavisPutnam::new(&f, &Config::default());
        assert_eq!(solver.solve(), SatResult::Satisfiable);
        assert!(solver.clauses().is_empty());
        assert_eq!(solver.stats().derived, 0);
        assert_eq!(
            solver.implied().literals().collect::<Vec<_>>(),
            vec![p(1), p(2), p(3)]
        );
    }

    #[test]
    fn resolution_after_simplification() {
        // no units or pure literals: only resolution can refute this
        let f = formula(vec![
            vec![p(1), p(2), p(3)],
            vec![n(1), p(2), p(3)],
            vec![p(1), n(2), p(3)],
            vec![n(1), n(2), p(3)],
            vec![p(1), p(2), n(3)],
            vec![n(1), p(2), n(3)],
            vec![p(1), n(2), n(3)],
            vec![n(1), n(2), n(3)],
        ]);
        let mut solver = DavisPutnam::new(&f, &Config::default());
        assert_eq!(solver.solve(), SatResult::Unsatisfiable);
        assert!(solver.stats().derived > 0);
    }

    #[test]
    fn saturated_set_derives_nothing() {
        let f = formula(vec![vec![p(1), p(2)], vec![n(1), n(2)], vec![p(2), p(3)], vec![n(2), n(3)]]);
        let mut first = DavisPutnam::new(&f, &Config::default());
        assert_eq!(first.solve(), SatResult::Satisfiable);

        let saturated = Formula::new(first.clauses().iter().cloned());
        let mut again = DavisPutnam::new(&saturated, &Config::default());
        assert_eq!(again.solve(), SatResult::Satisfiable);
        assert_eq!(again.stats().derived, 0);
    }

    #[test]
    fn never_keeps_tautologies() {
        let f = formula(vec![
            vec![p(1), p(2)],
            vec![n(1), n(2)],
            vec![p(2), p(3)],
            vec![n(2), n(3)],
            vec![p(1), n(1), p(3)],
        ]);
        let mut solver = DavisPutnam::new(&f, &Config::default());
        assert_eq!(solver.solve(), SatResult::Satisfiable);
        assert!(!solver.clauses().is_empty());
        assert!(solver.stats().derived > 0);
        assert!(solver.clauses().iter().all(|c| !c.is_tautology()));
    }

    #[test]
    fn budget_exhaustion_is_reported() {
        // every variable occurs in both polarities and there are no units
        let f = formula(vec![vec![p(1), p(2)], vec![n(1), p(3)], vec![n(3), p(4)], vec![n(4), n(2)]]);
        let mut solver = DavisPutnam::new(&f, &Config { clause_budget: 1 });
        let result = solver.solve();
        assert_eq!(result, SatResult::BudgetExhausted);
        assert_eq!(solver.stats().rounds, 1);
        assert_eq!(result.assuming_saturation(), SatResult::Satisfiable);
    }

    proptest! {
        #[test]
        fn proptest_dp(f in formula_3sat_strategy()) {
            let brute_force = solve_brute_force(&f);
            let result = solve(&f);
            log::trace!("result = {:?}", result);
            assert_eq!(result, brute_force);
        }
    }
}
