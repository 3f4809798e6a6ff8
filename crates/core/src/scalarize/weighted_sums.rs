use std::collections::BTreeMap;

use crate::{Expr, problem::Problem};

use super::{ScalarizationBuilder, ScalarizationError, sum};

/// The weighted sum `Σ wᵢ·fᵢ_min` over every objective.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSums {
    weights: BTreeMap<String, f64>,
}

impl WeightedSums {
    /// Creates the builder from one weight per objective symbol.
    pub fn new<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            weights: weights.into_iter().map(|(s, w)| (s.into(), w)).collect(),
        }
    }
}

impl ScalarizationBuilder for WeightedSums {
    fn build(&self, problem: &Problem) -> Result<Expr, ScalarizationError> {
        let terms = problem
            .objectives()
            .iter()
            .map(|objective| {
                let weight = self.weights.get(&objective.symbol).ok_or_else(|| {
                    ScalarizationError::MissingParameter {
                        objective: objective.symbol.clone(),
                        parameter: "weight",
                    }
                })?;
                Ok(Expr::multiply(
                    Expr::number(*weight),
                    Expr::symbol(objective.min_symbol()),
                ))
            })
            .collect::<Result<Vec<_>, ScalarizationError>>()?;

        Ok(sum(terms))
    }
}
