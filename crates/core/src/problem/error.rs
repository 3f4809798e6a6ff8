use thiserror::Error;

/// Errors raised while constructing or extending a problem.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProblemError {
    #[error("symbol `{symbol}` is defined more than once")]
    DuplicateSymbol { symbol: String },

    #[error("symbol `{symbol}` is not an identifier")]
    InvalidSymbol { symbol: String },

    #[error("field `{referencing_field}` references `{symbol}`, which is not defined before it")]
    UnknownSymbol {
        symbol: String,
        referencing_field: String,
    },

    #[error("variable `{symbol}` has unsupported shape {shape:?}: only scalars and vectors are allowed")]
    UnsupportedShape { symbol: String, shape: Vec<usize> },

    #[error("a problem needs at least one objective")]
    NoObjectives,

    #[error("objective `{symbol}` has no expression and no discrete values")]
    MissingExpression { symbol: String },
}
