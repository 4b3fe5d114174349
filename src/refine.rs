use crate::error::SearchError;
use crate::index::Index;
use crate::probe::Probe;

/// Narrows a bracket down to the boundary by bisection.
///
/// Requires `lo < hi` with the predicate holding at `lo` and failing at `hi`.
/// Returns the unique `k + 1` in `(lo, hi]` such that the predicate holds at
/// `k` and fails at `k + 1`. Takes at most `ceil(log2(hi - lo))` steps, each
/// of which consumes one budget unit.
pub fn refine<I, E, F>(
    probe: &mut Probe<I, E, F>,
    mut lo: I,
    mut hi: I,
) -> Result<I, SearchError<I, E>>
where
    I: Index,
    F: FnMut(I) -> Result<bool, E>,
{
    assert!(lo < hi, "gallop: cannot refine the empty bracket ({lo}, {hi})");
    debug_assert!(
        probe.known(lo) != Some(false) && probe.known(hi) != Some(true),
        "gallop: refinement bracket ({lo}, {hi}) does not straddle the boundary",
    );

    loop {
        // Adjacent indices have no midpoint strictly between them.
        let mid = lo.midpoint_to(hi);
        if mid == lo {
            tracing::debug!(boundary = %hi, "refined bracket");
            return Ok(hi);
        }

        if probe.step(mid)? {
            lo = mid;
        } else {
            hi = mid;
        }
    }
}
