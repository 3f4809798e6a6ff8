//! Immutable expression trees.
//!
//! An [`Expr`] is a literal, a reference to a symbol, or an operation from the
//! [`Operator`] registry applied to child expressions. Trees are built once
//! and never mutated; derived trees share nothing with their inputs except
//! through cloning.
//!
//! Three interchangeable surfaces exist for every tree:
//!
//! - the Rust constructors in this module,
//! - infix text (see [`crate::parse`] and the [`Display`](std::fmt::Display)
//!   impl),
//! - the JSON array form, e.g. `["Add", ["Multiply", "x", 2], ["Negate", "y"]]`.

mod display;
mod error;
mod json;
mod operator;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use error::MalformedExpression;
pub use json::ExprSourceError;
pub use operator::{Arity, Operator};

/// A literal value appearing in an expression or bound to a constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    Bool(bool),
}

impl Literal {
    /// Returns the numeric value, or `None` for booleans.
    #[must_use]
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Bool(_) => None,
        }
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A node in an expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub enum Expr {
    Literal(Literal),

    /// Reference to a constant, variable, or derived field by symbol.
    Symbol(String),

    Operation { op: Operator, args: Vec<Expr> },
}

impl Expr {
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Literal(Literal::Number(value))
    }

    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::Literal(Literal::Bool(value))
    }

    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Builds an operation node, checking the operator's arity.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedExpression::Arity`] if `args` does not satisfy the
    /// operator's arity.
    pub fn operation(op: Operator, args: Vec<Expr>) -> Result<Self, MalformedExpression> {
        let expected = op.arity();
        if !expected.accepts(args.len()) {
            return Err(MalformedExpression::Arity {
                op,
                expected,
                found: args.len(),
            });
        }
        Ok(Self::Operation { op, args })
    }

    /// Builds an operation node from an operator name.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedExpression::UnknownOperator`] if `name` is not
    /// registered, or [`MalformedExpression::Arity`] on an arity violation.
    pub fn call(name: &str, args: Vec<Expr>) -> Result<Self, MalformedExpression> {
        let op = Operator::from_name(name).ok_or_else(|| MalformedExpression::UnknownOperator {
            name: name.to_string(),
        })?;
        Self::operation(op, args)
    }

    #[must_use]
    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(Operator::Add, lhs, rhs)
    }

    #[must_use]
    pub fn multiply(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(Operator::Multiply, lhs, rhs)
    }

    #[must_use]
    pub fn divide(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(Operator::Divide, lhs, rhs)
    }

    #[must_use]
    pub fn power(base: Expr, exponent: Expr) -> Self {
        Self::binary(Operator::Power, base, exponent)
    }

    #[must_use]
    pub fn negate(expr: Expr) -> Self {
        Self::Operation {
            op: Operator::Negate,
            args: vec![expr],
        }
    }

    /// Component `index` (one-based) of the vector variable `symbol`.
    #[must_use]
    pub fn at(symbol: impl Into<String>, index: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let index = Self::number(index as f64);
        Self::binary(Operator::At, Self::symbol(symbol), index)
    }

    fn binary(op: Operator, lhs: Expr, rhs: Expr) -> Self {
        Self::Operation {
            op,
            args: vec![lhs, rhs],
        }
    }

    /// Returns the names of all symbols referenced anywhere in the tree.
    #[must_use]
    pub fn symbols(&self) -> BTreeSet<&str> {
        let mut found = BTreeSet::new();
        self.collect_symbols(&mut found);
        found
    }

    fn collect_symbols<'a>(&'a self, found: &mut BTreeSet<&'a str>) {
        match self {
            Self::Literal(_) => {}
            Self::Symbol(name) => {
                found.insert(name);
            }
            Self::Operation { args, .. } => {
                for arg in args {
                    arg.collect_symbols(found);
                }
            }
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Self::symbol(name)
    }
}
