use crate::error::SearchError;
use crate::index::Index;
use crate::probe::Probe;

/// The outcome of the doubling phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Bound<I> {
    /// The predicate holds at `lo` and fails at `hi`. Apart from the maximal
    /// index, `hi` is a power of two and `lo` is half of it (or zero).
    Bracket { lo: I, hi: I },
    /// The predicate holds on every representable index.
    Exhausted,
}

/// Probes `1, 2, 4, ...` until the predicate fails.
///
/// Once the largest power of two `2^(W-1)` holds, the maximal index is probed
/// last since doubling again would overflow.
///
/// The predicate must already be known to hold at zero, so that a failure at
/// one yields the bracket `(0, 1)`.
pub fn find_bound<I, E, F>(probe: &mut Probe<I, E, F>) -> Result<Bound<I>, SearchError<I, E>>
where
    I: Index,
    F: FnMut(I) -> Result<bool, E>,
{
    debug_assert!(
        probe.known(I::ZERO) == Some(true),
        "gallop: doubling phase started without the predicate holding at zero",
    );

    let mut lo = I::ZERO;
    let mut hi = I::ONE;
    loop {
        if !probe.evaluate(hi)? {
            tracing::debug!(%lo, %hi, "found bracket");
            return Ok(Bound::Bracket { lo, hi });
        }

        if hi == I::MAX {
            tracing::debug!(max = %hi, "predicate holds on the whole range");
            return Ok(Bound::Exhausted);
        }

        lo = hi;
        hi = hi.checked_double().unwrap_or(I::MAX);
    }
}
