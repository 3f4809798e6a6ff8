//! Adding scalarization functions to a problem.
//!
//! A scalarization combines several objectives into one expression. Builders
//! always reference the objectives' `_min` aliases, so the resulting function
//! is to be minimized whatever each objective's `maximize` flag says.
//!
//! # Builders
//!
//! - [`WeightedSums`]: `Σ wᵢ·fᵢ_min`
//! - [`Achievement`]: reference-point achievement scalarizing function
//!
//! Any closure `Fn(&Problem) -> Result<Expr, ScalarizationError>` is also a
//! builder.

mod achievement;
mod error;
mod weighted_sums;

pub use achievement::Achievement;
pub use error::ScalarizationError;
pub use weighted_sums::WeightedSums;

use tracing::debug;

use crate::{
    Expr, Operator,
    problem::{Problem, ProblemError, ScalarizationFunction},
};

/// Builds a scalarization expression for a problem.
pub trait ScalarizationBuilder {
    /// Returns the expression of the scalarization function.
    ///
    /// # Errors
    ///
    /// Returns [`ScalarizationError`] if the builder's parameters do not fit
    /// the problem.
    fn build(&self, problem: &Problem) -> Result<Expr, ScalarizationError>;
}

impl<F> ScalarizationBuilder for F
where
    F: Fn(&Problem) -> Result<Expr, ScalarizationError>,
{
    fn build(&self, problem: &Problem) -> Result<Expr, ScalarizationError> {
        self(problem)
    }
}

/// Returns a new problem with one more scalarization function.
///
/// The input problem is left untouched and stays usable; the returned problem
/// shares all of its other field lists.
///
/// # Errors
///
/// Returns [`ProblemError::DuplicateSymbol`] (wrapped) if `symbol` is already
/// used anywhere in the problem, any error of the builder, or
/// [`ProblemError::UnknownSymbol`] if the built expression references a
/// symbol unavailable to scalarization functions.
pub fn add_scalarization<B>(
    problem: &Problem,
    name: impl Into<String>,
    symbol: impl Into<String>,
    builder: &B,
) -> Result<Problem, ScalarizationError>
where
    B: ScalarizationBuilder + ?Sized,
{
    let symbol = symbol.into();
    if problem.contains_symbol(&symbol) {
        return Err(ProblemError::DuplicateSymbol { symbol }.into());
    }

    let expr = builder.build(problem)?;
    let function = ScalarizationFunction::new(name, symbol.clone(), expr);
    let scalarized = problem.with_scalarization(function)?;

    debug!(problem = %problem.name(), %symbol, "scalarization added");
    Ok(scalarized)
}

/// Sums `terms`, avoiding an `Add` node for a single term.
fn sum(mut terms: Vec<Expr>) -> Expr {
    if terms.len() == 1 {
        terms.remove(0)
    } else {
        Expr::Operation {
            op: Operator::Add,
            args: terms,
        }
    }
}
