use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    Constant, Constraint, DiscreteRepresentation, ExtraFunction, Objective, Problem,
    ProblemError, ScalarizationFunction, Variable,
};

/// Collects the fields of a problem and validates them on [`build`](Self::build).
///
/// This is also the description format read by serde: every list is
/// optional, and each `func` is either infix text or the JSON array form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemBuilder {
    name: String,
    description: String,
    constants: Vec<Constant>,
    variables: Vec<Variable>,
    extra_funcs: Vec<ExtraFunction>,
    objectives: Vec<Objective>,
    constraints: Vec<Constraint>,
    scalarization_funcs: Vec<ScalarizationFunction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discrete_representation: Option<DiscreteRepresentation>,
}

impl ProblemBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn constant(mut self, constant: Constant) -> Self {
        self.constants.push(constant);
        self
    }

    #[must_use]
    pub fn variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    #[must_use]
    pub fn extra_function(mut self, function: ExtraFunction) -> Self {
        self.extra_funcs.push(function);
        self
    }

    #[must_use]
    pub fn objective(mut self, objective: Objective) -> Self {
        self.objectives.push(objective);
        self
    }

    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    #[must_use]
    pub fn scalarization(mut self, function: ScalarizationFunction) -> Self {
        self.scalarization_funcs.push(function);
        self
    }

    #[must_use]
    pub fn discrete_representation(mut self, representation: DiscreteRepresentation) -> Self {
        self.discrete_representation = Some(representation);
        self
    }

    /// Validates the fields and freezes them into a [`Problem`].
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::NoObjectives`] if there are no objectives,
    /// [`ProblemError::InvalidSymbol`] for a symbol that is not an
    /// identifier, [`ProblemError::DuplicateSymbol`] if two fields (or an objective's
    /// `_min` alias) share a symbol, [`ProblemError::MissingExpression`] for a
    /// data-based objective without stored values, and
    /// [`ProblemError::UnknownSymbol`] if an expression references a symbol
    /// not available at its stage.
    pub fn build(self) -> Result<Problem, ProblemError> {
        let problem = Problem {
            name: self.name,
            description: self.description,
            constants: Arc::from(self.constants),
            variables: Arc::from(self.variables),
            extra_funcs: Arc::from(self.extra_funcs),
            objectives: Arc::from(self.objectives),
            constraints: Arc::from(self.constraints),
            scalarization_funcs: Arc::from(self.scalarization_funcs),
            discrete_representation: self.discrete_representation.map(Arc::new),
        };
        problem.validate()?;

        debug!(
            problem = %problem.name,
            variables = problem.variables.len(),
            objectives = problem.objectives.len(),
            constraints = problem.constraints.len(),
            "problem built"
        );
        Ok(problem)
    }
}

impl From<Problem> for ProblemBuilder {
    fn from(problem: Problem) -> Self {
        Self {
            name: problem.name,
            description: problem.description,
            constants: problem.constants.to_vec(),
            variables: problem.variables.to_vec(),
            extra_funcs: problem.extra_funcs.to_vec(),
            objectives: problem.objectives.to_vec(),
            constraints: problem.constraints.to_vec(),
            scalarization_funcs: problem.scalarization_funcs.to_vec(),
            discrete_representation: problem.discrete_representation.as_deref().cloned(),
        }
    }
}
