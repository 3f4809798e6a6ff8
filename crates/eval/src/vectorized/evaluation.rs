use skein_core::ConstraintKind;

use crate::table::Table;

use super::EvaluationError;

/// Indicates whether every requested stage was evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// All stages up to [`Config::through`](super::Config::through) ran.
    Complete,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of evaluating a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Input columns followed by every computed field, stage by stage.
    pub table: Table,

    /// Samples set to `NaN` under the per-row policy, in the order they were
    /// found.
    pub failures: Vec<EvaluationError>,

    pub status: Status,

    /// Symbols and kinds of the constraints, once their stage has run.
    constraints: Option<Vec<(String, ConstraintKind)>>,
}

impl Evaluation {
    pub(super) fn new(table: Table) -> Self {
        Self {
            table,
            failures: Vec::new(),
            status: Status::Complete,
            constraints: None,
        }
    }

    pub(super) fn record_constraints(&mut self, constraints: Vec<(String, ConstraintKind)>) {
        self.constraints = Some(constraints);
    }

    /// Returns whether each sample satisfies every constraint within
    /// `tolerance`.
    ///
    /// Returns `None` if the constraint stage was not evaluated. A sample
    /// whose constraint value is `NaN` is infeasible.
    #[must_use]
    pub fn feasible(&self, tolerance: f64) -> Option<Vec<bool>> {
        let constraints = self.constraints.as_ref()?;

        let mut feasible = vec![true; self.table.len()];
        for (symbol, kind) in constraints {
            let values = self.table.get(symbol)?;
            for (ok, value) in feasible.iter_mut().zip(values) {
                *ok &= kind.is_satisfied(*value, tolerance);
            }
        }
        Some(feasible)
    }

    /// Returns `true` if no sample failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
