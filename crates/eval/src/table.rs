use indexmap::IndexMap;
use thiserror::Error;

/// Errors that can occur when adding columns to a [`Table`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("column `{symbol}` is already present")]
    DuplicateColumn { symbol: String },

    #[error("column `{symbol}` has {found} values, expected {expected}")]
    LengthMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },
}

/// Returns the column label of component `index` (one-based) of a vector
/// variable, e.g. `x[2]`.
#[must_use]
pub fn component_label(symbol: &str, index: usize) -> String {
    format!("{symbol}[{index}]")
}

/// Named numeric columns of equal length, kept in insertion order.
///
/// A table is both the input of an evaluation (one column per decision
/// variable, one row per sample) and its output (every computed field
/// appended after the inputs, stage by stage).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    len: Option<usize>,
    columns: IndexMap<String, Vec<f64>>,
}

impl Table {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(symbol, values)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::LengthMismatch`] if the columns differ in length
    /// and [`TableError::DuplicateColumn`] if a symbol repeats.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (symbol, values) in columns {
            table.insert(symbol, values)?;
        }
        Ok(table)
    }

    /// Appends a new column.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if `symbol` is already present,
    /// or [`TableError::LengthMismatch`] if the table already holds columns of
    /// a different length.
    pub fn insert(&mut self, symbol: impl Into<String>, values: Vec<f64>) -> Result<(), TableError> {
        let symbol = symbol.into();
        if self.columns.contains_key(&symbol) {
            return Err(TableError::DuplicateColumn { symbol });
        }
        match self.len {
            Some(expected) if expected != values.len() => {
                return Err(TableError::LengthMismatch {
                    symbol,
                    expected,
                    found: values.len(),
                });
            }
            _ => self.len = Some(values.len()),
        }
        self.columns.insert(symbol, values);
        Ok(())
    }

    /// Inserts the components of a vector variable as `symbol[1]`,
    /// `symbol[2]`, and so on.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::LengthMismatch`] if a component's length differs
    /// from the table's, or [`TableError::DuplicateColumn`] if a component
    /// label is already present.
    pub fn insert_vector(
        &mut self,
        symbol: &str,
        components: Vec<Vec<f64>>,
    ) -> Result<(), TableError> {
        for (i, values) in components.into_iter().enumerate() {
            self.insert(component_label(symbol, i + 1), values)?;
        }
        Ok(())
    }

    /// Returns the number of rows (samples).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&[f64]> {
        self.columns.get(symbol).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.columns.contains_key(symbol)
    }

    /// Iterates over the column symbols in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Iterates over `(symbol, values)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(|(symbol, values)| (symbol.as_str(), values.as_slice()))
    }

    /// Returns the value of every column at row `index`.
    pub fn row(&self, index: usize) -> impl Iterator<Item = (&str, f64)> {
        self.iter()
            .filter_map(move |(symbol, values)| values.get(index).map(|v| (symbol, *v)))
    }
}
