//! Evaluation of one expression tree across every sample of a batch.

use std::{borrow::Cow, collections::BTreeSet};

use skein_core::{Expr, Literal, Operator};
use tracing::warn;

use crate::{
    env::{Binding, Column, SymbolEnvironment},
    table::TableError,
};

use super::{Error, EvaluationError, EvaluationErrorKind, FailurePolicy};

/// The value of a subexpression.
enum Value<'a> {
    Scalar(Cow<'a, Column>),
    Vector {
        symbol: String,
        components: &'a [Column],
    },
}

/// The column computed for an expression, with the samples that failed
/// under [`FailurePolicy::PerRow`].
#[derive(Debug)]
pub(super) struct Output {
    pub(super) column: Column,
    pub(super) failures: Vec<EvaluationError>,
}

pub(super) struct NodeEvaluator<'a> {
    env: &'a SymbolEnvironment,
    policy: FailurePolicy,
    field: Option<String>,
    failures: Vec<EvaluationError>,
    failed_samples: BTreeSet<usize>,
}

impl<'a> NodeEvaluator<'a> {
    pub(super) fn new(env: &'a SymbolEnvironment, policy: FailurePolicy, field: Option<&str>) -> Self {
        Self {
            env,
            policy,
            field: field.map(str::to_string),
            failures: Vec::new(),
            failed_samples: BTreeSet::new(),
        }
    }

    /// Evaluates `expr`, which must produce a scalar column.
    pub(super) fn run(mut self, expr: &Expr) -> Result<Output, Error> {
        let column = match self.eval(expr)? {
            Value::Scalar(column) => column.into_owned(),
            Value::Vector { symbol, .. } => {
                return Err(self.structural(expr, EvaluationErrorKind::VectorInScalarContext { symbol }));
            }
        };

        Ok(Output {
            column,
            failures: self.failures,
        })
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value<'a>, Error> {
        match expr {
            Expr::Literal(Literal::Number(value)) => Ok(Value::Scalar(Cow::Owned(Column::Constant(*value)))),
            Expr::Literal(Literal::Bool(_)) => Err(self.structural(expr, EvaluationErrorKind::NonNumeric)),
            Expr::Symbol(symbol) => self.lookup(expr, symbol),
            Expr::Operation { op, args } => self.operation(expr, *op, args),
        }
    }

    fn lookup(&self, expr: &Expr, symbol: &str) -> Result<Value<'a>, Error> {
        let env = self.env;
        match env.get(symbol) {
            None => Err(Error::UnknownSymbol {
                symbol: symbol.to_string(),
                referencing_field: self.field.clone().unwrap_or_else(|| "<expression>".to_string()),
            }),
            Some(Binding::Flag(_)) => Err(self.structural(expr, EvaluationErrorKind::NonNumeric)),
            Some(Binding::Scalar(column)) => {
                self.check_len(symbol, column)?;
                Ok(Value::Scalar(Cow::Borrowed(column)))
            }
            Some(Binding::Vector(components)) => {
                for column in components {
                    self.check_len(symbol, column)?;
                }
                Ok(Value::Vector {
                    symbol: symbol.to_string(),
                    components,
                })
            }
        }
    }

    fn operation(&mut self, expr: &Expr, op: Operator, args: &[Expr]) -> Result<Value<'a>, Error> {
        if !op.arity().accepts(args.len()) {
            let kind = EvaluationErrorKind::Arity {
                op,
                expected: op.arity(),
                found: args.len(),
            };
            return Err(self.structural(expr, kind));
        }
        if op == Operator::At {
            return self.component(expr, args);
        }

        let mut columns = Vec::with_capacity(args.len());
        for arg in args {
            match self.eval(arg)? {
                Value::Scalar(column) => columns.push(column),
                Value::Vector { components, .. } if op.expands_vectors() => {
                    columns.extend(components.iter().map(Cow::Borrowed));
                }
                Value::Vector { symbol, .. } => {
                    return Err(self.structural(arg, EvaluationErrorKind::VectorInScalarContext { symbol }));
                }
            }
        }

        let column = self.map_rows(expr, op, &columns)?;
        Ok(Value::Scalar(Cow::Owned(column)))
    }

    /// Evaluates `At(vector, index)` with a one-based constant index.
    fn component(&mut self, expr: &Expr, args: &[Expr]) -> Result<Value<'a>, Error> {
        let [vector, index] = args else {
            let kind = EvaluationErrorKind::Arity {
                op: Operator::At,
                expected: Operator::At.arity(),
                found: args.len(),
            };
            return Err(self.structural(expr, kind));
        };

        let components = match self.eval(vector)? {
            Value::Vector { components, .. } => components,
            Value::Scalar(_) => return Err(self.structural(vector, EvaluationErrorKind::NotAVector)),
        };
        let position = match self.eval(index)? {
            Value::Scalar(column) => match *column {
                Column::Constant(position) => position,
                Column::Samples(_) => return Err(self.structural(index, EvaluationErrorKind::NonNumeric)),
            },
            Value::Vector { symbol, .. } => {
                return Err(self.structural(index, EvaluationErrorKind::VectorInScalarContext { symbol }));
            }
        };

        let out_of_range = EvaluationErrorKind::IndexOutOfRange {
            index: position,
            len: components.len(),
        };
        if position.fract() != 0.0 || position < 1.0 {
            return Err(self.structural(expr, out_of_range));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let offset = position as usize - 1;
        match components.get(offset) {
            Some(column) => Ok(Value::Scalar(Cow::Borrowed(column))),
            None => Err(self.structural(expr, out_of_range)),
        }
    }

    /// Applies `op` row by row, folding all-constant inputs into a constant.
    fn map_rows(&mut self, expr: &Expr, op: Operator, columns: &[Cow<'a, Column>]) -> Result<Column, Error> {
        let len = self.env.len();
        let mut row = Vec::with_capacity(columns.len());

        if columns.iter().all(|c| matches!(**c, Column::Constant(_))) {
            row.extend(columns.iter().map(|c| c.get(0)));
            return match apply(op, &row) {
                Ok(value) => Ok(Column::Constant(value)),
                Err(kind) => {
                    for sample in 0..len {
                        self.fail(expr, sample, kind.clone())?;
                    }
                    Ok(Column::Constant(f64::NAN))
                }
            };
        }

        let mut values = Vec::with_capacity(len);
        for sample in 0..len {
            row.clear();
            row.extend(columns.iter().map(|c| c.get(sample)));
            let value = match apply(op, &row) {
                Ok(value) => value,
                Err(kind) => {
                    self.fail(expr, sample, kind)?;
                    f64::NAN
                }
            };
            values.push(value);
        }
        Ok(Column::Samples(values))
    }

    /// Handles a failing sample according to the policy.
    fn fail(&mut self, expr: &Expr, sample: usize, kind: EvaluationErrorKind) -> Result<(), Error> {
        let error = EvaluationError {
            field: self.field.clone(),
            node: expr.to_string(),
            sample: Some(sample),
            kind,
        };

        match self.policy {
            FailurePolicy::FailFast => Err(error.into()),
            FailurePolicy::PerRow => {
                if self.failed_samples.insert(sample) {
                    warn!(%error, "sample set to NaN");
                    self.failures.push(error);
                }
                Ok(())
            }
        }
    }

    /// Builds an error that does not depend on sample values.
    fn structural(&self, expr: &Expr, kind: EvaluationErrorKind) -> Error {
        EvaluationError {
            field: self.field.clone(),
            node: expr.to_string(),
            sample: None,
            kind,
        }
        .into()
    }

    fn check_len(&self, symbol: &str, column: &Column) -> Result<(), Error> {
        match column {
            Column::Samples(values) if values.len() != self.env.len() => Err(TableError::LengthMismatch {
                symbol: symbol.to_string(),
                expected: self.env.len(),
                found: values.len(),
            }
            .into()),
            _ => Ok(()),
        }
    }
}

/// Computes `op` for one row of finite or infinite arguments.
///
/// `NaN` arguments come from samples that already failed and propagate
/// without a new failure.
fn apply(op: Operator, args: &[f64]) -> Result<f64, EvaluationErrorKind> {
    if args.iter().any(|v| v.is_nan()) {
        return Ok(f64::NAN);
    }

    let value = match (op, args) {
        (Operator::Add | Operator::Sum, _) => args.iter().sum(),
        (Operator::Multiply, _) => args.iter().product(),
        (Operator::Max, _) => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        (Operator::Min, _) => args.iter().copied().fold(f64::INFINITY, f64::min),
        (Operator::Negate, [a]) => -a,
        (Operator::Divide, [_, b]) if *b == 0.0 => return Err(EvaluationErrorKind::DivisionByZero),
        (Operator::Divide, [a, b]) => a / b,
        (Operator::Power, [a, b]) if *a == 0.0 && *b < 0.0 => {
            return Err(EvaluationErrorKind::DivisionByZero);
        }
        (Operator::Power, [a, b]) => a.powf(*b),
        (Operator::Abs, [a]) => a.abs(),
        (Operator::Sqrt, [a]) => a.sqrt(),
        (Operator::Square, [a]) => a * a,
        (Operator::Exp, [a]) => a.exp(),
        (Operator::Ln | Operator::Log10, [a]) if *a <= 0.0 => {
            return Err(EvaluationErrorKind::Domain { op });
        }
        (Operator::Ln, [a]) => a.ln(),
        (Operator::Log10, [a]) => a.log10(),
        (Operator::Sin, [a]) => a.sin(),
        (Operator::Cos, [a]) => a.cos(),
        (Operator::Tan, [a]) => a.tan(),
        (Operator::Arctan, [a]) => a.atan(),
        _ => {
            return Err(EvaluationErrorKind::Arity {
                op,
                expected: op.arity(),
                found: args.len(),
            });
        }
    };

    if value.is_nan() {
        Err(EvaluationErrorKind::Domain { op })
    } else {
        Ok(value)
    }
}
