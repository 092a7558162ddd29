use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MathError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    #[error("domain error: {0}")]
    Domain(String),
    #[error("empty input")]
    EmptyInput,
    #[error("division error: {0}")]
    Division(Degeneracy),
    #[error("shape error: expected {expected}, found {found}")]
    Shape { expected: String, found: String },
    #[error("{value} has no inverse modulo {modulus}")]
    NoInverse { value: i64, modulus: i64 },
    #[error("graph contains a cycle")]
    Cycle,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl MathError {
    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        MathError::Domain(msg.into())
    }

    pub(crate) fn shape(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        MathError::Shape {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Why a division could not be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// `0 = 0`: every value is a solution.
    InfiniteSolutions,
    /// `b = 0` with `b != 0`.
    NoSolution,
    /// The leading coefficient of a quadratic or cubic vanished.
    ZeroLeadingCoefficient,
    /// A plain division by zero.
    ZeroDivisor,
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Degeneracy::InfiniteSolutions => "infinite solutions",
            Degeneracy::NoSolution => "no solution",
            Degeneracy::ZeroLeadingCoefficient => "leading coefficient is zero",
            Degeneracy::ZeroDivisor => "division by zero",
        };
        f.write_str(text)
    }
}
