use serde_json::Value;
use thiserror::Error;

use crate::parse::{ParseError, parse};

use super::{Expr, Literal, MalformedExpression};

/// Errors that can occur when reading an expression from a description.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExprSourceError {
    #[error("invalid infix expression: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Malformed(#[from] MalformedExpression),
}

impl Expr {
    /// Converts the tree to its JSON array form.
    ///
    /// Symbols become strings, literals become numbers or booleans, and
    /// operations become `[name, arg...]` arrays. Non-finite numbers have no
    /// JSON representation and become `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Literal(Literal::Number(value)) => Value::from(*value),
            Self::Literal(Literal::Bool(value)) => Value::Bool(*value),
            Self::Symbol(name) => Value::String(name.clone()),
            Self::Operation { op, args } => {
                let mut items = Vec::with_capacity(args.len() + 1);
                items.push(Value::String(op.name().to_string()));
                items.extend(args.iter().map(Expr::to_json));
                Value::Array(items)
            }
        }
    }

    /// Reads a tree from its JSON array form.
    ///
    /// A bare string is always a symbol reference here; infix text is only
    /// accepted at the top level of a description (see the `Deserialize`
    /// impl).
    ///
    /// # Errors
    ///
    /// Returns [`MalformedExpression`] if the value is not a valid array
    /// form, names an unknown operator, or violates an operator's arity.
    pub fn from_json(value: &Value) -> Result<Self, MalformedExpression> {
        match value {
            Value::Number(number) => number.as_f64().map(Expr::number).ok_or_else(|| {
                MalformedExpression::InvalidArrayForm {
                    reason: format!("number `{number}` is not representable as f64"),
                }
            }),
            Value::Bool(value) => Ok(Expr::bool(*value)),
            Value::String(name) => Ok(Expr::symbol(name.clone())),
            Value::Array(items) => {
                let Some((head, rest)) = items.split_first() else {
                    return Err(MalformedExpression::InvalidArrayForm {
                        reason: "empty array".to_string(),
                    });
                };
                let Value::String(name) = head else {
                    return Err(MalformedExpression::InvalidArrayForm {
                        reason: format!("expected an operator name, found `{head}`"),
                    });
                };
                let args = rest
                    .iter()
                    .map(Expr::from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                Expr::call(name, args)
            }
            Value::Null | Value::Object(_) => Err(MalformedExpression::InvalidArrayForm {
                reason: format!("unexpected value `{value}`"),
            }),
        }
    }
}

impl From<Expr> for Value {
    fn from(expr: Expr) -> Self {
        expr.to_json()
    }
}

impl TryFrom<Value> for Expr {
    type Error = ExprSourceError;

    /// Reads a description value: a top-level string is infix text, anything
    /// else is the array form.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(parse(&text)?),
            other => Ok(Expr::from_json(&other)?),
        }
    }
}
