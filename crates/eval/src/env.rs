//! Runtime symbol bindings.
//!
//! A [`SymbolEnvironment`] maps each visible symbol to its values over the
//! samples of a batch. The evaluator starts from the decision variables and
//! appends every stage's results before moving to the next one. Bindings
//! are only ever added between stages; nothing is rebound while a stage is
//! running, so all fields of a stage read the same environment.

use indexmap::IndexMap;

use crate::table::{Table, component_label};

/// The values of a scalar quantity across a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// One value shared by every sample.
    Constant(f64),

    /// One value per sample.
    Samples(Vec<f64>),
}

impl Column {
    /// Returns the value at sample `index`.
    ///
    /// Out-of-range indices of a sampled column yield `NaN`.
    #[must_use]
    pub fn get(&self, index: usize) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Samples(values) => values.get(index).copied().unwrap_or(f64::NAN),
        }
    }

    /// Applies `f` to every value.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Constant(value) => Self::Constant(f(*value)),
            Self::Samples(values) => Self::Samples(values.iter().map(|v| f(*v)).collect()),
        }
    }

    /// Broadcasts the column to `len` samples.
    #[must_use]
    pub fn to_vec(&self, len: usize) -> Vec<f64> {
        match self {
            Self::Constant(value) => vec![*value; len],
            Self::Samples(values) => values.clone(),
        }
    }
}

/// What a symbol is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Scalar(Column),

    /// A vector variable, one column per component.
    Vector(Vec<Column>),

    /// A boolean constant; not usable in arithmetic.
    Flag(bool),
}

/// Symbols visible to the expressions of one stage, with their values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolEnvironment {
    len: usize,
    bindings: IndexMap<String, Binding>,
}

impl SymbolEnvironment {
    /// Creates an empty environment for batches of `len` samples.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            bindings: IndexMap::new(),
        }
    }

    /// Binds every column of `table` as a scalar.
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        table
            .iter()
            .fold(Self::new(table.len()), |env, (symbol, values)| {
                env.with(symbol, Binding::Scalar(Column::Samples(values.to_vec())))
            })
    }

    /// Returns the environment with one more binding.
    #[must_use]
    pub fn with(mut self, symbol: impl Into<String>, binding: Binding) -> Self {
        self.bindings.insert(symbol.into(), binding);
        self
    }

    /// Returns the environment with every binding of `bindings` appended.
    #[must_use]
    pub fn extended<I, S>(self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (S, Binding)>,
        S: Into<String>,
    {
        bindings
            .into_iter()
            .fold(self, |env, (symbol, binding)| env.with(symbol, binding))
    }

    /// Binds a vector variable from its `symbol[i]` component columns in
    /// `table`.
    ///
    /// Returns the label of the first missing component as the error.
    pub(crate) fn with_vector_from(
        self,
        table: &Table,
        symbol: &str,
        len: usize,
    ) -> Result<Self, String> {
        let components = (1..=len)
            .map(|i| {
                let label = component_label(symbol, i);
                table
                    .get(&label)
                    .map(|values| Column::Samples(values.to_vec()))
                    .ok_or(label)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.with(symbol, Binding::Vector(components)))
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Binding> {
        self.bindings.get(symbol)
    }

    /// Iterates over the bound symbols in binding order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}
