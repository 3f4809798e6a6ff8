/// Actions an observer can take during a batch evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fail the batch with the reported row failure.
    ///
    /// Only meaningful for [`Event::RowFailed`](super::Event::RowFailed);
    /// it turns the per-row policy into fail-fast for the rest of the batch.
    Abort,

    /// Stop and return the table as of the last completed stage.
    StopEarly,
}
