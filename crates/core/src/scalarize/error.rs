use thiserror::Error;

use crate::problem::ProblemError;

/// Errors that can occur when adding a scalarization function.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScalarizationError {
    #[error(transparent)]
    Problem(#[from] ProblemError),

    #[error("no {parameter} given for objective `{objective}`")]
    MissingParameter {
        objective: String,
        parameter: &'static str,
    },
}
