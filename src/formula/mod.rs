pub mod clause;
pub mod clause_set;
pub mod dimacs;

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

pub use clause::{Clause, Resolvent};
pub use clause_set::{ClauseSet, PolarityCounts};

/// A DIMACS variable. Ids start at 1.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    /// Zero is the DIMACS clause terminator, not a literal.
    pub fn from_dimacs(value: i64) -> Option<Self> {
        match value.cmp(&0) {
            Ordering::Greater => Some(Literal::Positive(Variable(value as usize))),
            Ordering::Less => Some(Literal::Negative(Variable(value.unsigned_abs() as usize))),
            Ordering::Equal => None,
        }
    }

    pub fn to_dimacs(&self) -> i64 {
        match self {
            Literal::Positive(Variable(x)) => *x as i64,
            Literal::Negative(Variable(x)) => -(*x as i64),
        }
    }

    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }
}

// Canonical clause order is the numeric order of the signed DIMACS values.
impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_dimacs().cmp(&other.to_dimacs())
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

#[derive(Clone, Debug)]
pub struct Formula {
    clauses: Vec<Clause>,
    num_variables: usize,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self::with_variables(0, conjuncts)
    }

    /// The declared count is an upper bound hint; it is raised if a clause mentions a larger id.
    pub fn with_variables(declared: usize, conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        let clauses: Vec<Clause> = conjuncts.into_iter().collect();
        let largest = clauses
            .iter()
            .flat_map(|clause| clause.literals())
            .map(|literal| literal.idx())
            .max()
            .unwrap_or(0);
        Self {
            clauses,
            num_variables: declared.max(largest),
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.len() > 1 {
                write!(f, "({})", clause)?;
            } else {
                write!(f, "{}", clause)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

/// Small random CNF formulas: few enough variables that saturation stays cheap and
/// the brute-force oracle can enumerate every assignment.
#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    const MAX_VARS: usize = 5;
    const MAX_CLAUSES: usize = 8;

    (1..=MAX_VARS).prop_flat_map(|num_vars| {
        let literal = (1..=num_vars, any::<bool>()).prop_map(|(v, positive)| if positive { p(v) } else { n(v) });
        proptest::collection::vec(proptest::collection::vec(literal, 1..=3), 0..=MAX_CLAUSES).prop_map(
            move |clauses: Vec<Vec<Literal>>| Formula::with_variables(num_vars, clauses.into_iter().map(Clause::new)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimacs_round_trip() {
        assert_eq!(Literal::from_dimacs(3), Some(p(3)));
        assert_eq!(Literal::from_dimacs(-7), Some(n(7)));
        assert_eq!(Literal::from_dimacs(0), None);
        assert_eq!(n(7).to_dimacs(), -7);
    }

    #[test]
    fn literal_order_is_numeric() {
        let mut literals = vec![p(2), n(1), n(3), p(1)];
        literals.sort();
        assert_eq!(literals, vec![n(3), n(1), p(1), p(2)]);
    }

    #[test]
    fn declared_variable_count_is_a_lower_bound() {
        let f = Formula::with_variables(10, vec![Clause::new(vec![p(1), n(4)])]);
        assert_eq!(f.num_variables(), 10);

        let f = Formula::with_variables(2, vec![Clause::new(vec![p(1), n(4)])]);
        assert_eq!(f.num_variables(), 4);

        assert_eq!(Formula::new(vec![]).num_variables(), 0);
    }

    #[test]
    fn display_formula() {
        let f = Formula::new(vec![Clause::new(vec![n(2), p(1)]), Clause::new(vec![p(3)])]);
        assert_eq!(f.to_string(), "(-2 | 1) & 3");
    }
}
