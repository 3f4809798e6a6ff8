use thiserror::Error;

use crate::expr::MalformedExpression;

/// An error produced while tokenizing or parsing infix text.
///
/// `position` is the byte offset of the offending token in the input.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{kind} at offset {position}")]
pub struct ParseError {
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }
}

/// What went wrong while parsing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("unmatched parenthesis")]
    UnmatchedParen,

    #[error("unexpected input after a complete expression")]
    TrailingInput,

    #[error("missing operand")]
    MissingOperand,

    #[error("expected {expected}")]
    UnexpectedToken { expected: &'static str },

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error(transparent)]
    Malformed(MalformedExpression),
}
