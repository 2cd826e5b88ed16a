use crate::formula::clause_set::BcpResult;
use crate::formula::{Clause, ClauseSet, Formula, Resolvent};
use crate::solver::{Config, Stats};
use crate::SatResult;
use log::{debug, trace};
use std::collections::BTreeSet;

/// Plain resolution refutation: resolve every pair of clauses, round after round, until the
/// empty clause appears or a round derives nothing new.
pub struct Saturation {
    clauses: ClauseSet,
    config: Config,
    stats: Stats,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Round {
    Contradiction,
    Saturated,
    Derived(usize),
}

impl Saturation {
    pub fn new(formula: &Formula, config: &Config) -> Self {
        Self {
            clauses: ClauseSet::from_formula(formula),
            config: config.clone(),
            stats: Stats::default(),
        }
    }

    /// `BudgetExhausted` means no contradiction was seen within the clause budget, which is
    /// not proof of satisfiability.
    pub fn solve(&mut self) -> SatResult {
        if self.clauses.has_empty_clause() {
            return SatResult::Unsatisfiable;
        }
        saturate(&mut self.clauses, &self.config, &mut self.stats, |_| BcpResult::NoConflict)
    }

    /// The working set: after a satisfiable run, every clause derived along the way.
    pub fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

/// The round loop shared by the saturation-based engines. `simplify` runs at the start of
/// every round and may end the run by reporting a conflict.
pub(crate) fn saturate<F>(clauses: &mut ClauseSet, config: &Config, stats: &mut Stats, mut simplify: F) -> SatResult
where
    F: FnMut(&mut ClauseSet) -> BcpResult,
{
    loop {
        if simplify(clauses) == BcpResult::Conflict {
            return SatResult::Unsatisfiable;
        }

        stats.rounds += 1;
        match resolution_round(clauses) {
            Round::Contradiction => {
                debug!("round {}: derived the empty clause", stats.rounds);
                return SatResult::Unsatisfiable;
            }
            Round::Saturated => {
                debug!("round {}: saturated at {} clauses", stats.rounds, clauses.len());
                return SatResult::Satisfiable;
            }
            Round::Derived(count) => {
                stats.derived += count;
                debug!(
                    "round {}: {} new clauses, {} total, {} derived",
                    stats.rounds,
                    count,
                    clauses.len(),
                    stats.derived
                );
                if stats.derived >= config.clause_budget {
                    debug!("clause budget of {} exhausted", config.clause_budget);
                    return SatResult::BudgetExhausted;
                }
            }
        }
    }
}

/// Resolves every unordered pair of clauses once and adds the resolvents that are neither
/// tautologies nor already present.
pub(crate) fn resolution_round(clauses: &mut ClauseSet) -> Round {
    let snapshot: Vec<&Clause> = clauses.iter().collect();
    let mut staged = BTreeSet::new();

    for (i, c1) in snapshot.iter().enumerate() {
        for c2 in &snapshot[i + 1..] {
            match c1.resolve(c2) {
                Resolvent::None => {}
                Resolvent::Empty => {
                    trace!("{} and {} resolve to the empty clause", c1, c2);
                    return Round::Contradiction;
                }
                Resolvent::Clause(resolvent) => {
                    if resolvent.is_tautology() || clauses.contains(&resolvent) {
                        continue;
                    }
                    trace!("{} and {} resolve to {}", c1, c2, resolvent);
                    staged.insert(resolvent);
                }
            }
        }
    }

    if staged.is_empty() {
        return Round::Saturated;
    }
    let count = staged.len();
    clauses.extend(staged);
    Round::Derived(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::solve_brute_force;
    use crate::formula::{formula_3sat_strategy, n, p, Literal};
    use proptest::prelude::*;

    fn formula(clauses: Vec<Vec<Literal>>) -> Formula {
        Formula::new(clauses.into_iter().map(Clause::new))
    }

    fn solve(f: &Formula) -> SatResult {
        Saturation::new(f, &Config::default()).solve()
    }

    #[test]
    fn empty_formula_sat() {
        assert_eq!(solve(&formula(vec![])), SatResult::Satisfiable);
    }

    #[test]
    fn empty_clause_unsat() {
        assert_eq!(solve(&formula(vec![vec![p(1)], vec![]])), SatResult::Unsatisfiable);
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
    fn simple_sat() {
        let f = formula(vec![vec![p(1), p(2)], vec![n(1), p(3)]]);
        let mut solver = Saturation::new(&f, &Config::default());
        assert_eq!(solver.solve(), SatResult::Satisfiable);
        assert!(solver.clauses().contains(&Clause::new(vec![p(2), p(3)])));
        assert_eq!(solver.stats().derived, 1);
        assert_eq!(solver.stats().rounds, 2);
    }

    #[test]
    fn never_keeps_tautologies() {
        let f = formula(vec![vec![p(1), n(1), p(2)], vec![p(1), p(2)], vec![n(1), n(2), p(3)]]);
        let mut solver = Saturation::new(&f, &Config::default());
        assert_eq!(solver.solve(), SatResult::Satisfiable);
        assert!(solver.clauses().iter().all(|c| !c.is_tautology()));
    }

    #[test]
    fn saturated_set_derives_nothing() {
        let f = formula(vec![vec![p(1), p(2)], vec![n(1), p(3)], vec![n(3), p(4)]]);
        let mut first = Saturation::new(&f, &Config::default());
        assert_eq!(first.solve(), SatResult::Satisfiable);

        let saturated = Formula::new(first.clauses().iter().cloned());
        let mut again = Saturation::new(&saturated, &Config::default());
        assert_eq!(again.solve(), SatResult::Satisfiable);
        assert_eq!(again.stats().derived, 0);
        assert_eq!(again.stats().rounds, 1);
        assert_eq!(again.clauses().len(), first.clauses().len());
    }

    #[test]
    fn budget_exhaustion_is_reported() {
        let f = formula(vec![vec![p(1), p(2)], vec![n(1), p(3)], vec![n(3), p(4)]]);
        let mut solver = Saturation::new(&f, &Config { clause_budget: 1 });
        let result = solver.solve();
        assert_eq!(result, SatResult::BudgetExhausted);
        assert_eq!(result.assuming_saturation(), SatResult::Satisfiable);
    }

    proptest! {
        #[test]
        fn proptest_saturation(f in formula_3sat_strategy()) {
            let brute_force = solve_brute_force(&f);
            let result = solve(&f);
            log::trace!("result = {:?}", result);
            assert_eq!(result, brute_force);
        }
    }
}
