use std::fmt;

use skein_core::{Operator, ParseError, expr::Arity};
use thiserror::Error;

use crate::table::TableError;

/// Errors that can occur when evaluating a batch.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("variable `{symbol}` has no values in the batch")]
    MissingVariable { symbol: String },

    #[error("invalid batch table: {0}")]
    Table(#[from] TableError),

    #[error("`{referencing_field}` references `{symbol}`, which is not bound")]
    UnknownSymbol {
        symbol: String,
        referencing_field: String,
    },

    #[error("objective `{symbol}` has no expression and can only be looked up in stored data")]
    DataBasedObjective { symbol: String },

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("invalid expression: {0}")]
    Parse(#[from] ParseError),
}

/// A failure while computing the value of an expression node.
///
/// `node` is the rendered subexpression that failed. `field` is the symbol of
/// the field being evaluated, if any, and `sample` the failing row when the
/// failure depends on the data rather than on the tree's structure.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationError {
    pub field: Option<String>,
    pub node: String,
    pub sample: Option<usize>,
    pub kind: EvaluationErrorKind,
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in `{}`", self.kind, self.node)?;
        if let Some(field) = &self.field {
            write!(f, " of `{field}`")?;
        }
        if let Some(sample) = self.sample {
            write!(f, " at sample {sample}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvaluationError {}

/// The reason an expression node could not be evaluated.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvaluationErrorKind {
    #[error("division by zero")]
    DivisionByZero,

    #[error("argument outside the domain of `{op}`")]
    Domain { op: Operator },

    #[error("non-numeric value")]
    NonNumeric,

    #[error("`{op}` takes {expected} arguments, found {found}")]
    Arity {
        op: Operator,
        expected: Arity,
        found: usize,
    },

    #[error("index {index} is out of range for a vector of length {len}")]
    IndexOutOfRange { index: f64, len: usize },

    #[error("vector `{symbol}` used where a scalar is expected")]
    VectorInScalarContext { symbol: String },

    #[error("`At` expects a vector, found a scalar")]
    NotAVector,
}

impl EvaluationErrorKind {
    /// Returns `true` if the failure depends on sample values, so it can be
    /// confined to a single row.
    #[must_use]
    pub fn is_per_sample(&self) -> bool {
        matches!(self, Self::DivisionByZero | Self::Domain { .. })
    }
}
