//! Hooks into a running evaluation.
//!
//! An evaluator reports progress as events, such as a sample failing or a
//! stage finishing, and lets an [`Observer`] answer each one. The event and
//! action types belong to the evaluator: `skein-eval` defines its own for
//! batch evaluation.

/// Watches the events of one evaluation and may answer with an action.
///
/// Returning `None` leaves the evaluation untouched. `Some(action)` asks the
/// evaluator to act, typically to stop after the current stage or to treat a
/// tolerated sample failure as fatal.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and so is a
/// mutable reference to one, which keeps the closure usable after the
/// evaluation returns. Pass `()` to observe nothing.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
