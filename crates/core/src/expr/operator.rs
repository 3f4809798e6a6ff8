use std::fmt;

/// How many arguments an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exactly(usize),

    /// At least this many arguments.
    AtLeast(usize),
}

impl Arity {
    /// Returns `true` if `count` arguments satisfy this arity.
    #[must_use]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// The registry of operations an expression tree may contain.
///
/// Every [`Operation`](super::Expr::Operation) node carries one of these, so
/// an unknown operator name is rejected when the tree is built rather than
/// when it is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Add,
    Multiply,
    Negate,
    Divide,
    Power,
    Max,
    Min,
    Sum,
    Abs,
    Sqrt,
    Square,
    Exp,
    Ln,
    Log10,
    Sin,
    Cos,
    Tan,
    Arctan,
    /// One-based component of a vector variable: `At(x, 2)`.
    At,
}

impl Operator {
    /// All registered operators.
    pub const ALL: [Operator; 19] = [
        Self::Add,
        Self::Multiply,
        Self::Negate,
        Self::Divide,
        Self::Power,
        Self::Max,
        Self::Min,
        Self::Sum,
        Self::Abs,
        Self::Sqrt,
        Self::Square,
        Self::Exp,
        Self::Ln,
        Self::Log10,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Arctan,
        Self::At,
    ];

    /// Returns the canonical name used in the array form and when rendering.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Multiply => "Multiply",
            Self::Negate => "Negate",
            Self::Divide => "Divide",
            Self::Power => "Power",
            Self::Max => "Max",
            Self::Min => "Min",
            Self::Sum => "Sum",
            Self::Abs => "Abs",
            Self::Sqrt => "Sqrt",
            Self::Square => "Square",
            Self::Exp => "Exp",
            Self::Ln => "Ln",
            Self::Log10 => "Log10",
            Self::Sin => "Sin",
            Self::Cos => "Cos",
            Self::Tan => "Tan",
            Self::Arctan => "Arctan",
            Self::At => "At",
        }
    }

    /// Looks up an operator by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn arity(self) -> Arity {
        match self {
            Self::Add | Self::Multiply => Arity::AtLeast(2),
            Self::Max | Self::Min | Self::Sum => Arity::AtLeast(1),
            Self::Divide | Self::Power | Self::At => Arity::Exactly(2),
            Self::Negate
            | Self::Abs
            | Self::Sqrt
            | Self::Square
            | Self::Exp
            | Self::Ln
            | Self::Log10
            | Self::Sin
            | Self::Cos
            | Self::Tan
            | Self::Arctan => Arity::Exactly(1),
        }
    }

    /// Returns `true` if a whole vector argument is expanded into its
    /// components before the operator is applied.
    #[must_use]
    pub fn expands_vectors(self) -> bool {
        matches!(self, Self::Max | Self::Min | Self::Sum)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
