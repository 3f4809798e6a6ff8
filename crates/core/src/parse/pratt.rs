use crate::expr::{Expr, Literal, Operator};

use super::{
    MAX_DEPTH, ParseError, ParseErrorKind,
    lexer::{Token, TokenKind},
};

// Binding powers. Unary minus sits between the multiplicative operators and
// `^`, so `-x ^ 2` is `-(x ^ 2)` while `-x * y` is `(-x) * y`.
const ADDITIVE: u8 = 10;
const MULTIPLICATIVE: u8 = 20;
const UNARY_MINUS: u8 = 25;
const POWER: u8 = 30;

#[derive(Clone, Copy)]
enum Infix {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Infix {
    fn from_token(kind: &TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Subtract,
            TokenKind::Star => Self::Multiply,
            TokenKind::Slash => Self::Divide,
            TokenKind::Caret => Self::Power,
            _ => return None,
        })
    }

    fn binding_power(self) -> u8 {
        match self {
            Self::Add | Self::Subtract => ADDITIVE,
            Self::Multiply | Self::Divide => MULTIPLICATIVE,
            Self::Power => POWER,
        }
    }

    fn is_right_associative(self) -> bool {
        matches!(self, Self::Power)
    }

    /// Combines two operands, extending an existing n-ary sum or product
    /// instead of nesting a new one.
    fn fold(self, lhs: Expr, rhs: Expr) -> Expr {
        match self {
            Self::Add => extend(Operator::Add, lhs, rhs),
            Self::Subtract => extend(Operator::Add, lhs, Expr::negate(rhs)),
            Self::Multiply => extend(Operator::Multiply, lhs, rhs),
            Self::Divide => Expr::divide(lhs, rhs),
            Self::Power => Expr::power(lhs, rhs),
        }
    }
}

fn extend(op: Operator, lhs: Expr, rhs: Expr) -> Expr {
    match lhs {
        Expr::Operation { op: lhs_op, mut args } if lhs_op == op => {
            args.push(rhs);
            Expr::Operation { op, args }
        }
        lhs => Expr::Operation {
            op,
            args: vec![lhs, rhs],
        },
    }
}

/// Parses a token stream with precedence climbing.
pub(super) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    input_len: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(tokens: &'a [Token], input_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            input_len,
            depth: 0,
        }
    }

    /// Parses one complete expression and requires that all input is used.
    pub(super) fn parse_complete(mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expr(0)?;

        match self.current() {
            None => Ok(expr),
            Some(token) if token.kind == TokenKind::RightParen => Err(ParseError::new(
                token.index,
                ParseErrorKind::UnmatchedParen,
            )),
            Some(token) => Err(ParseError::new(token.index, ParseErrorKind::TrailingInput)),
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Offset reported when the input ends unexpectedly.
    fn end_position(&self) -> usize {
        self.input_len
    }

    /// Parses an operand chain one nesting level deeper than the caller.
    fn parse_expr(&mut self, min_power: u8) -> Result<Expr, ParseError> {
        if self.depth == MAX_DEPTH {
            let position = self.current().map_or(self.end_position(), |t| t.index);
            return Err(ParseError::new(
                position,
                ParseErrorKind::TooDeep { limit: MAX_DEPTH },
            ));
        }

        self.depth += 1;
        let expr = self.parse_chain(min_power);
        self.depth -= 1;
        expr
    }

    fn parse_chain(&mut self, min_power: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_prefix()?;

        while let Some(token) = self.current() {
            let Some(infix) = Infix::from_token(&token.kind) else {
                break;
            };

            let power = infix.binding_power();
            if power < min_power {
                break;
            }
            self.advance();

            let next_min = if infix.is_right_associative() {
                power
            } else {
                power + 1
            };
            let rhs = self.parse_expr(next_min)?;
            lhs = infix.fold(lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.current() else {
            return Err(ParseError::new(
                self.end_position(),
                ParseErrorKind::MissingOperand,
            ));
        };

        match &token.kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok(Expr::number(*value))
            }

            TokenKind::Ident(name) => {
                self.advance();
                if matches!(self.current(), Some(t) if t.kind == TokenKind::LeftParen) {
                    return self.parse_call(name, token.index);
                }
                Ok(match name.as_str() {
                    "true" => Expr::bool(true),
                    "false" => Expr::bool(false),
                    _ => Expr::symbol(name.clone()),
                })
            }

            TokenKind::Minus => {
                self.advance();
                let operand = self.parse_expr(UNARY_MINUS)?;
                Ok(match operand {
                    Expr::Literal(Literal::Number(value)) => Expr::number(-value),
                    operand => Expr::negate(operand),
                })
            }

            TokenKind::LeftParen => {
                let open = token.index;
                self.advance();
                let expr = self.parse_expr(0)?;
                self.expect_close(open)?;
                Ok(expr)
            }

            TokenKind::Plus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Caret
            | TokenKind::RightParen
            | TokenKind::Comma => Err(ParseError::new(
                token.index,
                ParseErrorKind::MissingOperand,
            )),
        }
    }

    /// Parses `name(arg, ...)`; the current token is the opening paren.
    fn parse_call(&mut self, name: &str, name_index: usize) -> Result<Expr, ParseError> {
        let open = self.current().map_or(name_index, |t| t.index);
        self.advance();

        let mut args = Vec::new();
        if matches!(self.current(), Some(t) if t.kind == TokenKind::RightParen) {
            self.advance();
        } else {
            loop {
                args.push(self.parse_expr(0)?);
                match self.current() {
                    Some(t) if t.kind == TokenKind::Comma => self.advance(),
                    Some(t) if t.kind == TokenKind::RightParen => {
                        self.advance();
                        break;
                    }
                    Some(t) => {
                        return Err(ParseError::new(
                            t.index,
                            ParseErrorKind::UnexpectedToken {
                                expected: "`,` or `)`",
                            },
                        ));
                    }
                    None => return Err(ParseError::new(open, ParseErrorKind::UnmatchedParen)),
                }
            }
        }

        Expr::call(name, args)
            .map_err(|err| ParseError::new(name_index, ParseErrorKind::Malformed(err)))
    }

    fn expect_close(&mut self, open: usize) -> Result<(), ParseError> {
        match self.current() {
            Some(t) if t.kind == TokenKind::RightParen => {
                self.advance();
                Ok(())
            }
            Some(t) => Err(ParseError::new(
                t.index,
                ParseErrorKind::UnexpectedToken { expected: "`)`" },
            )),
            None => Err(ParseError::new(open, ParseErrorKind::UnmatchedParen)),
        }
    }
}
