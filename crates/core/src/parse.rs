//! Infix text to expression trees.
//!
//! # Grammar
//!
//! From loosest to tightest binding:
//!
//! 1. `+` and `-`, left associative
//! 2. `*` and `/`, left associative
//! 3. unary `-`
//! 4. `^`, right associative
//! 5. calls `name(arg, ...)`, parenthesized groups, numbers, identifiers
//!
//! `a - b` becomes `Add(a, Negate(b))`, chains of `+` or `*` become a single
//! n-ary node, and a minus applied directly to a number becomes a negative
//! literal. The identifiers `true` and `false` are boolean literals; a call
//! must name a registered [`Operator`](crate::Operator), matched ignoring
//! case.
//!
//! The whole input is tokenized before parsing starts. Errors carry the byte
//! offset of the offending token. Groups, calls, unary minus and `^` may nest
//! at most [`MAX_DEPTH`] levels deep.

mod error;
mod lexer;
mod pratt;


pub use error::{ParseError, ParseErrorKind};

pub(crate) use lexer::is_identifier;

use crate::Expr;

use lexer::tokenize;
use pratt::Parser;

/// Deepest nesting [`parse`] accepts before failing with
/// [`ParseErrorKind::TooDeep`].
pub const MAX_DEPTH: usize = 256;

/// Parses infix text into an expression tree.
///
/// # Errors
///
/// Returns a [`ParseError`] for an unrecognized character, unmatched
/// parentheses, a missing operand, trailing tokens after a complete
/// expression, a call to an unknown function or with the wrong number of
/// arguments, or input nested deeper than [`MAX_DEPTH`].
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    Parser::new(&tokens, input.len()).parse_complete()
}
