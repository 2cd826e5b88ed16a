use crate::formula::Literal;
use std::fmt::{self, Display, Formatter};

/// A disjunction of literals, kept sorted and duplicate-free so that two clauses with the
/// same literals compare (and hash) equal regardless of how they were written.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

/// Outcome of resolving two clauses.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Resolvent {
    /// The clauses clash on zero variables, or on more than one.
    None,
    /// The clauses were complementary units: a contradiction was derived.
    Empty,
    Clause(Clause),
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals: Vec<Literal> = disjuncts.into_iter().collect();
        literals.sort();
        literals.dedup();
        Self { literals }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn as_unit(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [literal] => Some(*literal),
            _ => None,
        }
    }

    pub fn first(&self) -> Option<Literal> {
        self.literals.first().copied()
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.binary_search(&literal).is_ok()
    }

    pub fn without(&self, literal: Literal) -> Clause {
        Clause {
            literals: self.literals.iter().copied().filter(|l| *l != literal).collect(),
        }
    }

    /// True iff some variable occurs in both polarities.
    pub fn is_tautology(&self) -> bool {
        // Sorted order puts -v before v, so look the complement up instead of pairing neighbours.
        self.literals
            .iter()
            .any(|l| !l.is_positive() && self.contains(l.negated()))
    }

    /// Resolves only when exactly one variable appears with opposite polarity in the two
    /// clauses. Clauses that clash on two or more variables would produce a tautology, so
    /// they are reported as having no resolvent.
    pub fn resolve(&self, other: &Clause) -> Resolvent {
        let mut clashes = self.literals.iter().filter(|l| other.contains(l.negated()));
        let pivot = match (clashes.next(), clashes.next()) {
            (Some(pivot), None) => *pivot,
            _ => return Resolvent::None,
        };

        let resolvent = Clause::new(
            self.literals
                .iter()
                .chain(other.literals.iter())
                .copied()
                .filter(|l| l.variable() != pivot.variable()),
        );
        if resolvent.is_empty() {
            Resolvent::Empty
        } else {
            Resolvent::Clause(resolvent)
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first_literal = true;
        for literal in &self.literals {
            if first_literal {
                first_literal = false;
            } else {
                f.write_str(" | ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}
