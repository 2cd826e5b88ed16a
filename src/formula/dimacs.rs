use crate::formula::{Clause, Formula, Literal};
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Largest variable id accepted in a header. DIMACS literals are 32-bit signed integers.
pub const MAX_VARIABLES: usize = i32::MAX as usize;

pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut header = None;

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            // SATLIB benchmarks end with a "%" trailer
            Some(&"%") => break,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .filter(|n| *n <= MAX_VARIABLES)
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                let num_clauses = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?;

                header = Some((num_variables, num_clauses));
            }
            Some(_) => {
                let (num_variables, num_clauses) = match header {
                    Some(header) => header,
                    None => return Err(DimacsParseError::Format("missing 'p' line before clauses".into())),
                };

                let mut clause = vec![];
                for x in line {
                    match parse_literal(x)? {
                        Some(l) if l.idx() > num_variables => {
                            return Err(DimacsParseError::Format(format!(
                                "literal {} exceeds declared variable count {}",
                                l, num_variables
                            )))
                        }
                        Some(l) => clause.push(l),
                        None => break,
                    }
                }
                if !clause.is_empty() {
                    clauses.push(Clause::new(clause));
                }

                if clauses.len() >= num_clauses {
                    break;
                }
            }
        }
    }

    match header {
        Some((num_variables, _)) => Ok(Formula::with_variables(num_variables, clauses)),
        None => Err(DimacsParseError::Format("missing 'p' line before clauses".into())),
    }
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

fn parse_literal(s: &str) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<i64>()
        .map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))?;
    Ok(Literal::from_dimacs(l))
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for DimacsParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DimacsParseError::Io(e) => write!(f, "i/o error: {}", e),
            DimacsParseError::Format(msg) => write!(f, "malformed DIMACS: {}", msg),
        }
    }
}

impl std::error::Error for DimacsParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimacsParseError::Io(e) => Some(e),
            DimacsParseError::Format(_) => None,
        }
    }
}
