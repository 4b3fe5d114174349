use std::fmt::{self, Display, Formatter};

use crate::budget::Budget;
use crate::error::SearchError;
use crate::exponential::{Bound, find_bound};
use crate::index::Index;
use crate::probe::Probe;
use crate::refine::refine;

/// Searches for the number of leading indices that satisfy `predicate`.
///
/// The predicate must be monotonic: once it fails at some index, it must fail
/// at every larger index. Violations are reported when they are observed,
/// but a non-monotonic predicate can also silently produce a wrong count.
///
/// Without a `budget` the default of `2 * W + 4` units is used, which always
/// suffices for a monotonic predicate over a `W`-bit index.
///
/// ```
/// use gallop::{Boundary, search};
///
/// assert_eq!(search(|i: u64| i <= 41, None), Ok(Boundary::Found(42)));
/// assert_eq!(search(|_: u8| true, None), Ok(Boundary::Exhausted));
/// ```
pub fn search<I: Index>(
    predicate: impl FnMut(I) -> bool,
    budget: Option<usize>,
) -> Result<Boundary<I>, SearchError<I>> {
    Search { budget }.run(predicate)
}

/// Like [`search`], but for a fallible predicate.
///
/// The first error returned by the predicate aborts the search and is passed
/// through in [`SearchError::Predicate`].
pub fn try_search<I: Index, E>(
    predicate: impl FnMut(I) -> Result<bool, E>,
    budget: Option<usize>,
) -> Result<Boundary<I>, SearchError<I, E>> {
    Search { budget }.try_run(predicate)
}

/// The result of a successful search.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Boundary<I> {
    /// The predicate holds exactly on `0..n`.
    Found(I),
    /// The predicate holds on every representable index. The count is one
    /// past the maximal index and thus not representable itself.
    Exhausted,
}

impl<I: Copy> Boundary<I> {
    /// The count, if it is representable.
    pub fn found(self) -> Option<I> {
        match self {
            Self::Found(n) => Some(n),
            Self::Exhausted => None,
        }
    }

    /// Whether the predicate held on the whole range.
    pub fn is_exhausted(self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

impl<I: Display> Display for Boundary<I> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Found(n) => write!(f, "{n}"),
            Self::Exhausted => f.pad("exhausted"),
        }
    }
}

/// A boundary together with what it cost to find it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Report<I> {
    /// The search result.
    pub boundary: Boundary<I>,
    /// How many budget units the search consumed.
    pub evaluations: usize,
    /// How many queries were answered from the memo.
    pub hits: usize,
}

/// A configurable boundary search.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Search {
    budget: Option<usize>,
}

impl Search {
    /// A search with the default budget.
    pub const fn new() -> Self {
        Self { budget: None }
    }

    /// Overrides the budget. It must be at least
    /// [`Budget::minimum_for`] the searched index type.
    pub const fn budget(mut self, budget: usize) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Runs the search with an infallible predicate.
    pub fn run<I: Index>(
        self,
        mut predicate: impl FnMut(I) -> bool,
    ) -> Result<Boundary<I>, SearchError<I>> {
        self.try_run(move |i| Ok(predicate(i)))
    }

    /// Runs the search with a fallible predicate.
    pub fn try_run<I: Index, E>(
        self,
        predicate: impl FnMut(I) -> Result<bool, E>,
    ) -> Result<Boundary<I>, SearchError<I, E>> {
        self.try_report(predicate).map(|report| report.boundary)
    }

    /// Runs the search with an infallible predicate and reports its cost.
    pub fn report<I: Index>(
        self,
        mut predicate: impl FnMut(I) -> bool,
    ) -> Result<Report<I>, SearchError<I>> {
        self.try_report(move |i| Ok(predicate(i)))
    }

    /// Runs the search with a fallible predicate and reports its cost.
    pub fn try_report<I: Index, E>(
        self,
        predicate: impl FnMut(I) -> Result<bool, E>,
    ) -> Result<Report<I>, SearchError<I, E>> {
        let (result, evaluations) = self.execute(predicate);

        #[cfg(feature = "testing")]
        crate::testing::register_evaluations(evaluations);

        let (boundary, hits) = result?;
        Ok(Report { boundary, evaluations, hits })
    }

    /// Validates the budget and drives the state machine to completion.
    #[allow(clippy::type_complexity)]
    fn execute<I: Index, E>(
        self,
        predicate: impl FnMut(I) -> Result<bool, E>,
    ) -> (Result<(Boundary<I>, usize), SearchError<I, E>>, usize) {
        let budget = match Budget::new::<I, E>(self.budget) {
            Ok(budget) => budget,
            Err(err) => {
                tracing::debug!(requested = ?self.budget, "rejected search budget");
                return (Err(err), 0);
            }
        };

        let mut probe = Probe::new(predicate, budget);
        let result = drive(&mut probe).map(|boundary| (boundary, probe.hits()));
        if result.is_err() {
            tracing::debug!(bracket = %probe.bracket(), "search failed");
        }

        (result, probe.evaluations())
    }
}

/// The states of a single search.
#[derive(Debug, Copy, Clone)]
enum State<I> {
    CheckZero,
    CheckOne,
    Exponential,
    Binary { lo: I, hi: I },
    Done(Boundary<I>),
}

/// Runs a search on a freshly created probe.
fn drive<I, E, F>(probe: &mut Probe<I, E, F>) -> Result<Boundary<I>, SearchError<I, E>>
where
    I: Index,
    F: FnMut(I) -> Result<bool, E>,
{
    let mut state = State::CheckZero;
    loop {
        tracing::debug!(?state, evaluations = probe.evaluations(), "search state");
        state = match state {
            State::CheckZero => {
                if probe.evaluate(I::ZERO)? {
                    State::CheckOne
                } else {
                    State::Done(Boundary::Found(I::ZERO))
                }
            }
            State::CheckOne => {
                if probe.evaluate(I::ONE)? {
                    State::Exponential
                } else {
                    State::Done(Boundary::Found(I::ONE))
                }
            }
            State::Exponential => match find_bound(probe)? {
                Bound::Bracket { lo, hi } => State::Binary { lo, hi },
                Bound::Exhausted => State::Done(Boundary::Exhausted),
            },
            State::Binary { lo, hi } => State::Done(Boundary::Found(refine(probe, lo, hi)?)),
            State::Done(boundary) => return Ok(boundary),
        };
    }
}
