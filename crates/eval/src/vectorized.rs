//! Vectorized evaluation of a problem over a batch of samples.
//!
//! # Stages
//!
//! A batch is a [`Table`] with one column per scalar decision variable and
//! one column per component (`x[1]`, `x[2]`, …) of each vector variable. The
//! evaluator walks the five [`Stage`]s in order, evaluates every field of a
//! stage against the bindings of the earlier ones, and appends the results
//! to both the environment and the output table. Each objective `f` also
//! produces `f_min`, its values negated when `f` is maximized.
//!
//! Stages without fields are skipped, and [`Config::through`] cuts the walk
//! short. With the `parallel` feature the fields of a stage are evaluated on
//! the rayon pool; results are merged in declaration order, so the output
//! does not depend on scheduling.
//!
//! # Failures
//!
//! Failures that depend on sample values (division by zero, arguments
//! outside a function's domain) follow the configured [`FailurePolicy`]:
//!
//! - [`FailurePolicy::FailFast`] returns the first failure as an error
//! - [`FailurePolicy::PerRow`] writes `NaN` for the sample, records the
//!   failure in [`Evaluation::failures`], and keeps going
//!
//! Structural failures (boolean operands, misused vectors, bad indices) are
//! the same for every sample and always abort.
//!
//! # Observer Events
//!
//! [`evaluate_observed`] emits [`Event::RowFailed`] for every recorded
//! failure and [`Event::StageCompleted`] after each evaluated stage.
//! Observers can return [`Action::Abort`] to turn a row failure into an
//! error, or [`Action::StopEarly`] to return the table as of the last
//! completed stage.

mod action;
mod config;
mod error;
mod evaluation;
mod event;
mod node;


pub use action::Action;
pub use config::{Config, FailurePolicy};
pub use error::{Error, EvaluationError, EvaluationErrorKind};
pub use evaluation::{Evaluation, Status};
pub use event::Event;

use skein_core::{Expr, FieldRef, Literal, Observer, Problem, Stage, VariableKind, parse};
use tracing::{debug, instrument, trace};

use crate::{
    env::{Binding, Column, SymbolEnvironment},
    table::{Table, component_label},
};

use node::{NodeEvaluator, Output};

/// Evaluates every stage of `problem` up to [`Config::through`] over `batch`.
///
/// # Errors
///
/// Returns an error if a variable is missing from the batch, a field cannot
/// be evaluated under the configured policy, or an objective has no
/// expression.
pub fn evaluate(problem: &Problem, batch: &Table, config: &Config) -> Result<Evaluation, Error> {
    evaluate_observed(problem, batch, config, ())
}

/// Evaluates `problem` over `batch`, reporting progress to `observer`.
///
/// See the [module docs](self) for the events and actions.
///
/// # Errors
///
/// As [`evaluate`], and additionally returns the reported failure when the
/// observer answers a row failure with [`Action::Abort`].
#[instrument(skip_all, fields(problem = problem.name(), samples = batch.len()))]
pub fn evaluate_observed<Obs>(
    problem: &Problem,
    batch: &Table,
    config: &Config,
    mut observer: Obs,
) -> Result<Evaluation, Error>
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let (mut env, table) = bind_variables(problem, batch)?;
    let len = env.len();
    let mut evaluation = Evaluation::new(table);

    for stage in Stage::ALL.into_iter().filter(|s| *s <= config.through()) {
        let fields = stage.fields(problem);

        if fields.is_empty() {
            trace!(%stage, "stage skipped");
        } else {
            debug!(%stage, fields = fields.len(), "evaluating stage");

            let bindings = if stage == Stage::Constants {
                constant_bindings(problem)
            } else {
                let outputs = evaluate_fields(&env, &fields, config.policy());
                let mut bindings = Vec::with_capacity(fields.len());

                for (field, output) in fields.iter().zip(outputs) {
                    let Output { column, failures } = output?;

                    for failure in failures {
                        let action = observer.observe(&Event::RowFailed {
                            stage,
                            failure: &failure,
                        });
                        if action == Some(Action::Abort) {
                            return Err(failure.into());
                        }
                        evaluation.failures.push(failure);
                        if action == Some(Action::StopEarly) {
                            evaluation.status = Status::StoppedByObserver;
                            return Ok(evaluation);
                        }
                    }

                    if let FieldRef::Objective(objective) = field {
                        let oriented = if objective.maximize {
                            column.map(|v| -v)
                        } else {
                            column.clone()
                        };
                        bindings.push((objective.symbol.clone(), Binding::Scalar(column)));
                        bindings.push((objective.min_symbol(), Binding::Scalar(oriented)));
                    } else {
                        bindings.push((field.symbol().to_string(), Binding::Scalar(column)));
                    }
                }
                bindings
            };

            for (symbol, binding) in &bindings {
                if let Some(values) = table_column(binding, len) {
                    evaluation.table.insert(symbol.clone(), values)?;
                }
            }
            env = env.extended(bindings);
        }

        if stage == Stage::Constraints {
            evaluation.record_constraints(
                problem
                    .constraints()
                    .iter()
                    .map(|c| (c.symbol.clone(), c.kind))
                    .collect(),
            );
        }

        if fields.is_empty() {
            continue;
        }
        let event = Event::StageCompleted {
            stage,
            table: &evaluation.table,
        };
        if observer.observe(&event).is_some() {
            debug!(%stage, "stopped by observer");
            evaluation.status = Status::StoppedByObserver;
            return Ok(evaluation);
        }
    }

    Ok(evaluation)
}

/// Evaluates a single expression against `env`.
///
/// Returns one value per sample, together with the failures recorded under
/// [`FailurePolicy::PerRow`].
///
/// # Errors
///
/// Returns an error if the expression references an unbound symbol or
/// cannot be evaluated under `policy`.
pub fn evaluate_expr(
    expr: &Expr,
    env: &SymbolEnvironment,
    policy: FailurePolicy,
) -> Result<(Vec<f64>, Vec<EvaluationError>), Error> {
    let Output { column, failures } = NodeEvaluator::new(env, policy, None).run(expr)?;
    Ok((column.to_vec(env.len()), failures))
}

/// Parses `infix` and evaluates it over the columns of `batch`.
///
/// # Errors
///
/// Returns [`Error::Parse`] for invalid input, otherwise as [`evaluate_expr`]
/// with [`FailurePolicy::FailFast`].
pub fn evaluate_str(infix: &str, batch: &Table) -> Result<Vec<f64>, Error> {
    let expr = parse(infix)?;
    let env = SymbolEnvironment::from_table(batch);
    let (values, _) = evaluate_expr(&expr, &env, FailurePolicy::FailFast)?;
    Ok(values)
}

/// Binds the decision variables and copies their input columns.
fn bind_variables(problem: &Problem, batch: &Table) -> Result<(SymbolEnvironment, Table), Error> {
    let mut env = SymbolEnvironment::new(batch.len());
    let mut table = Table::new();

    for variable in problem.variables() {
        let symbol = &variable.symbol;
        match variable.kind() {
            VariableKind::Scalar => {
                let values = batch.get(symbol).ok_or_else(|| Error::MissingVariable {
                    symbol: symbol.clone(),
                })?;
                table.insert(symbol.clone(), values.to_vec())?;
                env = env.with(symbol.clone(), Binding::Scalar(Column::Samples(values.to_vec())));
            }
            VariableKind::Vector { len } => {
                env = env
                    .with_vector_from(batch, symbol, len)
                    .map_err(|symbol| Error::MissingVariable { symbol })?;
                for i in 1..=len {
                    let label = component_label(symbol, i);
                    if let Some(values) = batch.get(&label) {
                        table.insert(label, values.to_vec())?;
                    }
                }
            }
        }
    }

    Ok((env, table))
}

fn constant_bindings(problem: &Problem) -> Vec<(String, Binding)> {
    problem
        .constants()
        .iter()
        .map(|constant| {
            let binding = match constant.value {
                Literal::Number(value) => Binding::Scalar(Column::Constant(value)),
                Literal::Bool(flag) => Binding::Flag(flag),
            };
            (constant.symbol.clone(), binding)
        })
        .collect()
}

/// Returns the output column for a stage binding; flags become 1 or 0.
fn table_column(binding: &Binding, len: usize) -> Option<Vec<f64>> {
    match binding {
        Binding::Scalar(column) => Some(column.to_vec(len)),
        Binding::Flag(flag) => Some(vec![if *flag { 1.0 } else { 0.0 }; len]),
        Binding::Vector(_) => None,
    }
}

fn evaluate_field(
    env: &SymbolEnvironment,
    field: FieldRef<'_>,
    policy: FailurePolicy,
) -> Result<Output, Error> {
    trace!(field = field.symbol(), "evaluating field");

    let Some(expr) = field.expr() else {
        return Err(Error::DataBasedObjective {
            symbol: field.symbol().to_string(),
        });
    };
    NodeEvaluator::new(env, policy, Some(field.symbol())).run(expr)
}

#[cfg(feature = "parallel")]
fn evaluate_fields(
    env: &SymbolEnvironment,
    fields: &[FieldRef<'_>],
    policy: FailurePolicy,
) -> Vec<Result<Output, Error>> {
    use rayon::prelude::*;

    fields
        .par_iter()
        .map(|field| evaluate_field(env, *field, policy))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_fields(
    env: &SymbolEnvironment,
    fields: &[FieldRef<'_>],
    policy: FailurePolicy,
) -> Vec<Result<Output, Error>> {
    fields
        .iter()
        .map(|field| evaluate_field(env, *field, policy))
        .collect()
}
