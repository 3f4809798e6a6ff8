use thiserror::Error;

use super::{Arity, Operator};

/// Errors raised while building an expression tree by hand or from its
/// array form.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MalformedExpression {
    #[error("unknown operator `{name}`")]
    UnknownOperator { name: String },

    #[error("`{op}` takes {expected} argument(s), got {found}")]
    Arity {
        op: Operator,
        expected: Arity,
        found: usize,
    },

    #[error("invalid array form: {reason}")]
    InvalidArrayForm { reason: String },
}
