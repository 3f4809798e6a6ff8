use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when validating a discrete representation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscreteError {
    #[error("`{symbol}` has {found} values, expected {expected}")]
    LengthMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },
}

/// A finite table of sampled decision vectors and their objective values.
///
/// Index `i` of every sequence refers to the same sample, so all sequences
/// share one length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDiscrete", into = "RawDiscrete")]
pub struct DiscreteRepresentation {
    variable_values: BTreeMap<String, Vec<f64>>,
    objective_values: BTreeMap<String, Vec<f64>>,
    non_dominated: bool,
    len: usize,
}

impl DiscreteRepresentation {
    /// Creates a representation, checking that all sequences share a length.
    ///
    /// `objective_values` may also hold constraint or extra-function values;
    /// they are returned verbatim by lookups.
    ///
    /// # Errors
    ///
    /// Returns [`DiscreteError::LengthMismatch`] naming the first sequence
    /// whose length differs from the others.
    pub fn new(
        variable_values: BTreeMap<String, Vec<f64>>,
        objective_values: BTreeMap<String, Vec<f64>>,
        non_dominated: bool,
    ) -> Result<Self, DiscreteError> {
        let mut columns = variable_values.iter().chain(objective_values.iter());
        let len = columns.next().map_or(0, |(_, values)| values.len());

        for (symbol, values) in columns {
            if values.len() != len {
                return Err(DiscreteError::LengthMismatch {
                    symbol: symbol.clone(),
                    expected: len,
                    found: values.len(),
                });
            }
        }

        Ok(Self {
            variable_values,
            objective_values,
            non_dominated,
            len,
        })
    }

    /// Returns the number of stored samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn variable_values(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.variable_values
    }

    #[must_use]
    pub fn objective_values(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.objective_values
    }

    /// Returns `true` if the stored samples are known to be mutually
    /// non-dominated.
    #[must_use]
    pub fn non_dominated(&self) -> bool {
        self.non_dominated
    }
}

#[derive(Serialize, Deserialize)]
struct RawDiscrete {
    variable_values: BTreeMap<String, Vec<f64>>,
    objective_values: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    non_dominated: bool,
}

impl TryFrom<RawDiscrete> for DiscreteRepresentation {
    type Error = DiscreteError;

    fn try_from(raw: RawDiscrete) -> Result<Self, Self::Error> {
        Self::new(raw.variable_values, raw.objective_values, raw.non_dominated)
    }
}

impl From<DiscreteRepresentation> for RawDiscrete {
    fn from(repr: DiscreteRepresentation) -> Self {
        Self {
            variable_values: repr.variable_values,
            objective_values: repr.objective_values,
            non_dominated: repr.non_dominated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(symbol: &str, values: &[f64]) -> (String, Vec<f64>) {
        (symbol.to_string(), values.to_vec())
    }

    #[test]
    fn accepts_equal_lengths() {
        let repr = DiscreteRepresentation::new(
            BTreeMap::from([column("x", &[0.0, 10.0]), column("y", &[1.0, 2.0])]),
            BTreeMap::from([column("f", &[1.0, 100.0])]),
            true,
        )
        .unwrap();

        assert_eq!(repr.len(), 2);
        assert!(repr.non_dominated());
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = DiscreteRepresentation::new(
            BTreeMap::from([column("x", &[0.0, 10.0])]),
            BTreeMap::from([column("f", &[1.0])]),
            false,
        )
        .unwrap_err();

        assert_eq!(
            err,
            DiscreteError::LengthMismatch {
                symbol: "f".to_string(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn empty_tables_are_allowed_until_queried() {
        let repr = DiscreteRepresentation::new(
            BTreeMap::from([column("x", &[])]),
            BTreeMap::from([column("f", &[])]),
            false,
        )
        .unwrap();
        assert!(repr.is_empty());
    }
}
