use serde::{Deserialize, Serialize};

use crate::expr::{Expr, Literal};

use super::ProblemError;

/// A named literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    pub symbol: String,
    pub value: Literal,
}

impl Constant {
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            value: value.into(),
        }
    }
}

/// The shape of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Scalar,

    /// A one-dimensional vector with a fixed number of components.
    Vector { len: usize },
}

/// A decision variable.
///
/// Variables are described with an optional `shape`: absent or empty for a
/// scalar, one dimension for a vector. Higher ranks are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VariableDescription", into = "VariableDescription")]
pub struct Variable {
    pub name: String,
    pub symbol: String,
    kind: VariableKind,
    pub lowerbound: Option<f64>,
    pub upperbound: Option<f64>,
    pub initial_value: Option<f64>,
}

impl Variable {
    #[must_use]
    pub fn scalar(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            kind: VariableKind::Scalar,
            lowerbound: None,
            upperbound: None,
            initial_value: None,
        }
    }

    #[must_use]
    pub fn vector(name: impl Into<String>, symbol: impl Into<String>, len: usize) -> Self {
        Self {
            kind: VariableKind::Vector { len },
            ..Self::scalar(name, symbol)
        }
    }

    /// Creates a variable from a tensor shape.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::UnsupportedShape`] if `shape` has two or more
    /// dimensions.
    pub fn with_shape(
        name: impl Into<String>,
        symbol: impl Into<String>,
        shape: &[usize],
    ) -> Result<Self, ProblemError> {
        match shape {
            [] => Ok(Self::scalar(name, symbol)),
            [len] => Ok(Self::vector(name, symbol, *len)),
            _ => Err(ProblemError::UnsupportedShape {
                symbol: symbol.into(),
                shape: shape.to_vec(),
            }),
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, lowerbound: f64, upperbound: f64) -> Self {
        self.lowerbound = Some(lowerbound);
        self.upperbound = Some(upperbound);
        self
    }

    #[must_use]
    pub fn with_initial_value(mut self, initial_value: f64) -> Self {
        self.initial_value = Some(initial_value);
        self
    }

    #[must_use]
    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    /// Returns `upperbound - lowerbound` when both bounds are known.
    #[must_use]
    pub fn bound_range(&self) -> Option<f64> {
        Some(self.upperbound? - self.lowerbound?)
    }
}

#[derive(Serialize, Deserialize)]
struct VariableDescription {
    name: String,
    symbol: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    shape: Vec<usize>,
    #[serde(default)]
    lowerbound: Option<f64>,
    #[serde(default)]
    upperbound: Option<f64>,
    #[serde(default)]
    initial_value: Option<f64>,
}

impl TryFrom<VariableDescription> for Variable {
    type Error = ProblemError;

    fn try_from(desc: VariableDescription) -> Result<Self, Self::Error> {
        let mut variable = Variable::with_shape(desc.name, desc.symbol, &desc.shape)?;
        variable.lowerbound = desc.lowerbound;
        variable.upperbound = desc.upperbound;
        variable.initial_value = desc.initial_value;
        Ok(variable)
    }
}

impl From<Variable> for VariableDescription {
    fn from(variable: Variable) -> Self {
        let shape = match variable.kind {
            VariableKind::Scalar => Vec::new(),
            VariableKind::Vector { len } => vec![len],
        };
        Self {
            name: variable.name,
            symbol: variable.symbol,
            shape,
            lowerbound: variable.lowerbound,
            upperbound: variable.upperbound,
            initial_value: variable.initial_value,
        }
    }
}

/// A helper quantity computed from variables and constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraFunction {
    pub name: String,
    pub symbol: String,
    #[serde(rename = "func")]
    pub expr: Expr,
}

impl ExtraFunction {
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, expr: Expr) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            expr,
        }
    }
}

/// An objective to minimize or maximize.
///
/// An objective without an expression is data-based: its values only come
/// from the problem's discrete representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub name: String,
    pub symbol: String,
    #[serde(rename = "func", default, skip_serializing_if = "Option::is_none")]
    pub expr: Option<Expr>,
    #[serde(default)]
    pub maximize: bool,
    #[serde(default)]
    pub ideal: Option<f64>,
    #[serde(default)]
    pub nadir: Option<f64>,
}

impl Objective {
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, expr: Expr) -> Self {
        Self {
            expr: Some(expr),
            ..Self::data_based(name, symbol)
        }
    }

    #[must_use]
    pub fn data_based(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            expr: None,
            maximize: false,
            ideal: None,
            nadir: None,
        }
    }

    #[must_use]
    pub fn maximized(mut self) -> Self {
        self.maximize = true;
        self
    }

    #[must_use]
    pub fn with_ideal(mut self, ideal: f64) -> Self {
        self.ideal = Some(ideal);
        self
    }

    #[must_use]
    pub fn with_nadir(mut self, nadir: f64) -> Self {
        self.nadir = Some(nadir);
        self
    }

    /// The symbol of the minimization-oriented alias, `<symbol>_min`.
    #[must_use]
    pub fn min_symbol(&self) -> String {
        min_alias(&self.symbol)
    }

    /// Orients a raw value of this objective for minimization.
    #[must_use]
    pub fn to_min(&self, value: f64) -> f64 {
        if self.maximize { -value } else { value }
    }
}

/// Returns the minimization-oriented alias of an objective symbol.
#[must_use]
pub fn min_alias(symbol: &str) -> String {
    format!("{symbol}_min")
}

/// Whether a constraint bounds its value from above or pins it to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Feasible when the value is at most zero.
    #[default]
    LessThanOrEqual,

    /// Feasible when the value is zero, within a tolerance.
    Equal,
}

impl ConstraintKind {
    /// Returns `true` if a constraint of this kind with `value` is feasible
    /// within `tolerance`. `NaN` is never feasible.
    #[must_use]
    pub fn is_satisfied(self, value: f64, tolerance: f64) -> bool {
        match self {
            Self::LessThanOrEqual => value <= tolerance,
            Self::Equal => value.abs() <= tolerance,
        }
    }
}

/// A constraint; see [`ConstraintKind`] for the feasibility convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    pub symbol: String,
    #[serde(rename = "func")]
    pub expr: Expr,
    #[serde(default)]
    pub kind: ConstraintKind,
}

impl Constraint {
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, expr: Expr) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            expr,
            kind: ConstraintKind::LessThanOrEqual,
        }
    }

    #[must_use]
    pub fn equality(mut self) -> Self {
        self.kind = ConstraintKind::Equal;
        self
    }

    /// Returns `true` if `value` satisfies this constraint within `tolerance`.
    #[must_use]
    pub fn is_satisfied(&self, value: f64, tolerance: f64) -> bool {
        self.kind.is_satisfied(value, tolerance)
    }
}

/// A derived single-valued function combining objectives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarizationFunction {
    pub name: String,
    pub symbol: String,
    #[serde(rename = "func")]
    pub expr: Expr,
}

impl ScalarizationFunction {
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, expr: Expr) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            expr,
        }
    }
}

/// A borrowed view of any field of a problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRef<'a> {
    Constant(&'a Constant),
    Variable(&'a Variable),
    ExtraFunction(&'a ExtraFunction),
    Objective(&'a Objective),
    Constraint(&'a Constraint),
    Scalarization(&'a ScalarizationFunction),
}

impl<'a> FieldRef<'a> {
    #[must_use]
    pub fn name(self) -> &'a str {
        match self {
            Self::Constant(f) => &f.name,
            Self::Variable(f) => &f.name,
            Self::ExtraFunction(f) => &f.name,
            Self::Objective(f) => &f.name,
            Self::Constraint(f) => &f.name,
            Self::Scalarization(f) => &f.name,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'a str {
        match self {
            Self::Constant(f) => &f.symbol,
            Self::Variable(f) => &f.symbol,
            Self::ExtraFunction(f) => &f.symbol,
            Self::Objective(f) => &f.symbol,
            Self::Constraint(f) => &f.symbol,
            Self::Scalarization(f) => &f.symbol,
        }
    }

    /// Returns the field's expression, if it has one.
    #[must_use]
    pub fn expr(self) -> Option<&'a Expr> {
        match self {
            Self::Constant(_) | Self::Variable(_) => None,
            Self::ExtraFunction(f) => Some(&f.expr),
            Self::Objective(f) => f.expr.as_ref(),
            Self::Constraint(f) => Some(&f.expr),
            Self::Scalarization(f) => Some(&f.expr),
        }
    }
}
