//! Nearest-match evaluation of tabulated problems.
//!
//! A problem with a [`DiscreteRepresentation`](skein_core::DiscreteRepresentation)
//! stores a finite set of decision vectors and their objective values. Instead
//! of evaluating expressions, a query is answered with the stored sample
//! closest to it: for each query row, every stored sample is scanned and the
//! one at the smallest distance wins, the lowest index breaking ties.
//!
//! Distances only use variables present both in the query and in the
//! representation. Only scalar variables can be matched.

mod config;
mod error;

#[cfg(test)]
mod tests;

pub use config::{Config, DistanceMetric};
pub use error::Error;

use skein_core::{Problem, VariableKind};
use tracing::{debug, instrument};

use crate::table::Table;

/// The stored samples nearest to each query row.
#[derive(Debug, Clone, PartialEq)]
pub struct Matches {
    /// The stored objective values of each match, verbatim, followed by a
    /// `_min` alias for every objective of the problem found among them.
    pub table: Table,

    /// Index of the matched stored sample, per query row.
    pub indices: Vec<usize>,

    /// Distance to the matched sample, per query row.
    pub distances: Vec<f64>,
}

/// One dimension of the distance computation.
struct Coordinate<'a> {
    symbol: &'a str,
    query: &'a [f64],
    stored: &'a [f64],
    scale: f64,
}

/// Finds the stored sample nearest to each row of `queries`.
///
/// # Errors
///
/// Returns an error if the problem has no representation, the representation
/// is empty, a query column belongs to a vector variable, no query column
/// is stored, or a query value is not finite.
#[instrument(skip_all, fields(problem = problem.name(), queries = queries.len()))]
pub fn evaluate(problem: &Problem, queries: &Table, config: &Config) -> Result<Matches, Error> {
    let representation = problem
        .discrete_representation()
        .ok_or(Error::MissingRepresentation)?;

    reject_vector_queries(problem, queries)?;
    if representation.is_empty() {
        return Err(Error::EmptyRepresentation);
    }

    let coordinates: Vec<Coordinate<'_>> = queries
        .iter()
        .filter_map(|(symbol, query)| {
            let stored = representation.variable_values().get(symbol)?;
            Some(Coordinate {
                symbol,
                query,
                stored,
                scale: scale(problem, symbol, stored, config.metric()),
            })
        })
        .collect();
    if coordinates.is_empty() {
        return Err(Error::NoSharedVariables);
    }

    for coordinate in &coordinates {
        if let Some(row) = coordinate.query.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidQuery {
                symbol: coordinate.symbol.to_string(),
                row,
            });
        }
    }

    debug!(
        samples = representation.len(),
        variables = coordinates.len(),
        "matching queries"
    );

    let (indices, distances): (Vec<usize>, Vec<f64>) = (0..queries.len())
        .map(|row| nearest(&coordinates, row, representation.len()))
        .unzip();

    let mut table = Table::new();
    for (symbol, stored) in representation.objective_values() {
        table.insert(symbol.clone(), indices.iter().map(|&i| stored[i]).collect())?;
    }
    for objective in problem.objectives() {
        let Some(values) = table.get(&objective.symbol) else {
            continue;
        };
        let oriented = values.iter().map(|v| objective.to_min(*v)).collect();
        table.insert(objective.min_symbol(), oriented)?;
    }

    Ok(Matches {
        table,
        indices,
        distances,
    })
}

/// Rejects query columns of vector variables, given whole or as `x[i]`.
fn reject_vector_queries(problem: &Problem, queries: &Table) -> Result<(), Error> {
    for symbol in queries.symbols() {
        let base = symbol.split_once('[').map_or(symbol, |(base, _)| base);
        let is_vector = problem
            .variable(base)
            .is_some_and(|v| matches!(v.kind(), VariableKind::Vector { .. }));
        if is_vector {
            return Err(Error::UnsupportedVariableKind {
                symbol: base.to_string(),
            });
        }
    }
    Ok(())
}

/// Returns the divisor applied to coordinate differences of `symbol`.
fn scale(problem: &Problem, symbol: &str, stored: &[f64], metric: DistanceMetric) -> f64 {
    if metric == DistanceMetric::Euclidean {
        return 1.0;
    }

    let bound_range = problem.variable(symbol).and_then(|v| v.bound_range());
    if let Some(range) = bound_range.filter(|r| *r > 0.0 && r.is_finite()) {
        return range;
    }

    let (min, max) = stored
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let range = max - min;
    if range > 0.0 && range.is_finite() { range } else { 1.0 }
}

/// Returns the index of and distance to the nearest stored sample.
fn nearest(coordinates: &[Coordinate<'_>], row: usize, samples: usize) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);

    for index in 0..samples {
        // Half the distance: differences of halved finite values stay finite.
        let half = coordinates.iter().fold(0.0_f64, |acc, c| {
            let delta = (0.5 * c.query[row] - 0.5 * c.stored[index]) / c.scale;
            acc.hypot(delta)
        });

        // Strict comparison keeps the lowest index among ties.
        if half < best.1 {
            best = (index, half);
        }
    }

    (best.0, 2.0 * best.1)
}
