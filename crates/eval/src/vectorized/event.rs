use skein_core::Stage;

use crate::table::Table;

use super::EvaluationError;

/// Events emitted while a batch is evaluated.
#[derive(Debug)]
pub enum Event<'a> {
    /// A sample failed under [`FailurePolicy::PerRow`](super::FailurePolicy::PerRow)
    /// and was set to `NaN`.
    RowFailed {
        stage: Stage,
        failure: &'a EvaluationError,
    },

    /// Every field of a stage has been evaluated and appended to the table.
    StageCompleted { stage: Stage, table: &'a Table },
}

impl Event<'_> {
    /// Returns the stage the event belongs to.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::RowFailed { stage, .. } | Self::StageCompleted { stage, .. } => *stage,
        }
    }
}
