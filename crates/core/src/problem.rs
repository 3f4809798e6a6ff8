//! Multiobjective problem definitions.
//!
//! A [`Problem`] groups constants, decision variables, extra functions,
//! objectives, constraints, and scalarization functions. Every field carries a
//! symbol that is unique across the whole problem, and each objective `f`
//! also reserves the alias `f_min` (see [`Objective::min_symbol`]). Symbols
//! must be identifiers as the infix parser reads them, so they never collide
//! with the `v[i]` column labels of vector components.
//!
//! Problems are immutable once built. Each field list is shared behind an
//! [`Arc`], so problems derived from another one (for example by
//! [`add_scalarization`](crate::add_scalarization)) reuse every list they do
//! not change.

mod builder;
mod discrete;
mod error;
mod field;

use std::{collections::HashSet, sync::Arc};

use serde::{Deserialize, Serialize};

pub use builder::ProblemBuilder;
pub use discrete::{DiscreteError, DiscreteRepresentation};
pub use error::ProblemError;
pub use field::{
    Constant, Constraint, ConstraintKind, ExtraFunction, FieldRef, Objective,
    ScalarizationFunction, Variable, VariableKind, min_alias,
};

use crate::{parse, resolve};

/// A validated, immutable multiobjective problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProblemBuilder", into = "ProblemBuilder")]
pub struct Problem {
    name: String,
    description: String,
    constants: Arc<[Constant]>,
    variables: Arc<[Variable]>,
    extra_funcs: Arc<[ExtraFunction]>,
    objectives: Arc<[Objective]>,
    constraints: Arc<[Constraint]>,
    scalarization_funcs: Arc<[ScalarizationFunction]>,
    discrete_representation: Option<Arc<DiscreteRepresentation>>,
}

impl Problem {
    /// Starts building a problem with the given name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ProblemBuilder {
        ProblemBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    #[must_use]
    pub fn extra_funcs(&self) -> &[ExtraFunction] {
        &self.extra_funcs
    }

    #[must_use]
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    #[must_use]
    pub fn scalarization_funcs(&self) -> &[ScalarizationFunction] {
        &self.scalarization_funcs
    }

    #[must_use]
    pub fn discrete_representation(&self) -> Option<&DiscreteRepresentation> {
        self.discrete_representation.as_deref()
    }

    /// Iterates over every field: constants, variables, extra functions,
    /// objectives, constraints, then scalarization functions.
    pub fn fields(&self) -> impl Iterator<Item = FieldRef<'_>> {
        self.constants
            .iter()
            .map(FieldRef::Constant)
            .chain(self.variables.iter().map(FieldRef::Variable))
            .chain(self.extra_funcs.iter().map(FieldRef::ExtraFunction))
            .chain(self.objectives.iter().map(FieldRef::Objective))
            .chain(self.constraints.iter().map(FieldRef::Constraint))
            .chain(self.scalarization_funcs.iter().map(FieldRef::Scalarization))
    }

    /// Looks up a field by symbol.
    #[must_use]
    pub fn field(&self, symbol: &str) -> Option<FieldRef<'_>> {
        self.fields().find(|field| field.symbol() == symbol)
    }

    #[must_use]
    pub fn variable(&self, symbol: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.symbol == symbol)
    }

    #[must_use]
    pub fn objective(&self, symbol: &str) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.symbol == symbol)
    }

    /// Returns `true` if `symbol` names a field or an objective's `_min`
    /// alias.
    #[must_use]
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.field(symbol).is_some() || self.objectives.iter().any(|o| o.min_symbol() == symbol)
    }

    /// Returns a copy with one more scalarization function, sharing every
    /// other field list with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError`] if the new function breaks an invariant.
    pub(crate) fn with_scalarization(
        &self,
        function: ScalarizationFunction,
    ) -> Result<Self, ProblemError> {
        let scalarization_funcs: Arc<[ScalarizationFunction]> = self
            .scalarization_funcs
            .iter()
            .cloned()
            .chain(std::iter::once(function))
            .collect();

        let problem = Self {
            scalarization_funcs,
            ..self.clone()
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Checks every invariant a problem must satisfy.
    fn validate(&self) -> Result<(), ProblemError> {
        if self.objectives.is_empty() {
            return Err(ProblemError::NoObjectives);
        }

        let mut seen = HashSet::new();
        for field in self.fields() {
            if !parse::is_identifier(field.symbol()) {
                return Err(ProblemError::InvalidSymbol {
                    symbol: field.symbol().to_string(),
                });
            }
            if !seen.insert(field.symbol().to_string()) {
                return Err(ProblemError::DuplicateSymbol {
                    symbol: field.symbol().to_string(),
                });
            }
            if let FieldRef::Objective(objective) = field {
                let alias = objective.min_symbol();
                if !seen.insert(alias.clone()) {
                    return Err(ProblemError::DuplicateSymbol { symbol: alias });
                }
            }
        }

        for objective in self.objectives.iter().filter(|o| o.expr.is_none()) {
            let stored = self
                .discrete_representation()
                .is_some_and(|repr| repr.objective_values().contains_key(&objective.symbol));
            if !stored {
                return Err(ProblemError::MissingExpression {
                    symbol: objective.symbol.clone(),
                });
            }
        }

        resolve::check_references(self)
    }
}

impl TryFrom<ProblemBuilder> for Problem {
    type Error = ProblemError;

    fn try_from(builder: ProblemBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
