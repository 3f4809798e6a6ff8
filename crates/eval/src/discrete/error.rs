use thiserror::Error;

use crate::table::TableError;

/// Errors that can occur during a nearest-match lookup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("problem has no discrete representation")]
    MissingRepresentation,

    #[error("discrete representation holds no samples")]
    EmptyRepresentation,

    #[error("vector variable `{symbol}` cannot be matched against stored samples")]
    UnsupportedVariableKind { symbol: String },

    #[error("no queried variable is stored in the discrete representation")]
    NoSharedVariables,

    #[error("query value of `{symbol}` at row {row} is not a number")]
    InvalidQuery { symbol: String, row: usize },

    #[error("invalid query table: {0}")]
    Table(#[from] TableError),
}
