use crate::formula::{Formula, Literal, Variable};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// A partial truth assignment. Holds at most one polarity per variable.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Assignment {
    values: BTreeMap<Variable, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value `literal` takes under this assignment, if its variable is decided.
    pub fn value_of(&self, literal: &Literal) -> Option<bool> {
        self.values
            .get(literal.variable())
            .map(|value| *value == literal.is_positive())
    }

    pub fn assign(&mut self, literal: Literal) {
        debug_assert_ne!(self.value_of(&literal), Some(false), "{} is already false", literal);
        self.values.insert(*literal.variable(), literal.is_positive());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True literals in increasing variable order.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.values.iter().map(|(v, value)| {
            if *value {
                Literal::Positive(*v)
            } else {
                Literal::Negative(*v)
            }
        })
    }

    /// One literal for each variable from 1 to `num_variables`, undecided ones false.
    /// Lazy, so a large declared variable count costs nothing until it is consumed.
    pub fn complete(&self, num_variables: usize) -> impl Iterator<Item = Literal> + '_ {
        (1..=num_variables).map(move |v| {
            let var = Variable(v);
            match self.values.get(&var) {
                Some(true) => Literal::Positive(var),
                _ => Literal::Negative(var),
            }
        })
    }

    /// Fills every undecided variable up to `num_variables` with false.
    pub fn extended(&self, num_variables: usize) -> Assignment {
        let mut full = self.clone();
        full.values.extend(self.complete(num_variables).map(|l| (*l.variable(), l.is_positive())));
        full
    }

    /// Every clause has a literal that is true here.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula
            .clauses()
            .all(|clause| clause.literals().any(|l| self.value_of(l) == Some(true)))
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("v")?;
        for literal in self.literals() {
            write!(f, " {}", literal)?;
        }
        f.write_str(" 0")
    }
}
