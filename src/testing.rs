use std::cell::Cell;

thread_local! {
    /// How many budget units the last search on this thread consumed.
    static LAST_EVALUATIONS: Cell<usize> = const { Cell::new(0) };
}

/// How many budget units the last search on this thread consumed.
pub fn last_evaluations() -> usize {
    LAST_EVALUATIONS.with(|cell| cell.get())
}

/// Records the cost of a finished search.
pub(crate) fn register_evaluations(evaluations: usize) {
    LAST_EVALUATIONS.with(|cell| cell.set(evaluations))
}
