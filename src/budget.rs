use crate::error::SearchError;
use crate::index::{Index, ceil_log2};

/// A ceiling on the work a single search may perform.
///
/// One unit is consumed by every genuine predicate evaluation and by every
/// refinement step. A refinement step that evaluates a fresh midpoint is
/// the same work as that evaluation and consumes a single unit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Budget {
    /// The total number of units available.
    limit: usize,
    /// How many units have been consumed so far.
    used: usize,
}

impl Budget {
    /// The budget used when the caller does not supply one: `2 * W + 4`.
    ///
    /// The search never needs more than `2 * W + 1` units, so the default
    /// cannot be exceeded by a monotonic predicate.
    pub fn default_for<I: Index>() -> usize {
        2 * I::BITS as usize + 4
    }

    /// The smallest budget a caller may request: `2 * ceil(log2(W)) + 4`.
    pub fn minimum_for<I: Index>() -> usize {
        2 * ceil_log2(I::BITS) as usize + 4
    }

    /// Creates a budget for searching over `I`, validating a requested limit.
    pub fn new<I: Index, E>(limit: Option<usize>) -> Result<Self, SearchError<I, E>> {
        let limit = match limit {
            None => Self::default_for::<I>(),
            Some(budget) => {
                let minimum = Self::minimum_for::<I>();
                if budget < minimum {
                    return Err(SearchError::InvalidConfiguration { budget, minimum });
                }
                budget
            }
        };
        Ok(Self { limit, used: 0 })
    }

    /// Consumes one unit. Returns `false` and consumes nothing if the budget
    /// is already spent.
    #[must_use]
    pub(crate) fn charge(&mut self) -> bool {
        if self.used >= self.limit {
            return false;
        }
        self.used += 1;
        true
    }

    /// The total number of units available.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// How many units have been consumed.
    pub fn used(&self) -> usize {
        self.used
    }

    /// How many units are left.
    pub fn remaining(&self) -> usize {
        self.limit - self.used
    }
}
