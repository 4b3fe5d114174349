use std::convert::Infallible;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

/// What is known about the boundary at some point during a search.
///
/// `lo` is the largest index at which the predicate was observed to hold and
/// `hi` the smallest index at which it was observed to fail. The boundary
/// always lies in `(lo, hi]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Bracket<I> {
    /// Largest index known to satisfy the predicate.
    pub lo: Option<I>,
    /// Smallest index known to violate the predicate.
    pub hi: Option<I>,
}

impl<I> Bracket<I> {
    /// A bracket without any knowledge.
    pub const fn unknown() -> Self {
        Self { lo: None, hi: None }
    }
}

impl<I> Default for Bracket<I> {
    fn default() -> Self {
        Self::unknown()
    }
}

impl<I: Display> Display for Bracket<I> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("(")?;
        match &self.lo {
            Some(lo) => write!(f, "{lo}")?,
            None => f.write_str("?")?,
        }
        f.write_str(", ")?;
        match &self.hi {
            Some(hi) => write!(f, "{hi}")?,
            None => f.write_str("?")?,
        }
        f.write_str(")")
    }
}

/// An error that can occur during a boundary search.
///
/// The type parameter `E` is the error type of a fallible predicate. For
/// infallible predicates it is [`Infallible`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SearchError<I, E = Infallible> {
    /// The supplied budget is below the provable minimum for the index width.
    /// No evaluation was performed.
    InvalidConfiguration {
        /// The budget that was requested.
        budget: usize,
        /// The smallest budget accepted for the index type.
        minimum: usize,
    },
    /// The search ran out of budget before the boundary was pinned down.
    BudgetExceeded {
        /// The bracket at the time the budget ran out.
        last_bracket: Bracket<I>,
        /// How many budget units were used.
        evaluations: usize,
    },
    /// The predicate contradicted an earlier observation, so it is not
    /// monotonic. This is a violation of the caller's contract.
    PredicateViolation {
        /// The index at which the contradiction was observed.
        index: I,
        /// What the predicate returned at `index`.
        value: bool,
        /// The bracket that the result contradicts.
        bracket: Bracket<I>,
    },
    /// The predicate itself failed.
    Predicate(E),
}

impl<I, E> SearchError<I, E> {
    /// Whether the error is a budget exhaustion.
    pub fn is_budget_exceeded(&self) -> bool {
        matches!(self, Self::BudgetExceeded { .. })
    }
}

impl<I: Display, E: Display> Display for SearchError<I, E> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { budget, minimum } => write!(
                f,
                "budget of {budget} is below the minimum of {minimum} for this index width"
            ),
            Self::BudgetExceeded { last_bracket, evaluations } => write!(
                f,
                "budget exceeded after {evaluations} evaluations, \
                 boundary lies in {last_bracket}"
            ),
            Self::PredicateViolation { index, value, bracket } => write!(
                f,
                "predicate is not monotonic: it returned {value} at {index}, \
                 contradicting the bracket {bracket}"
            ),
            Self::Predicate(err) => write!(f, "predicate failed: {err}"),
        }
    }
}

impl<I, E> Error for SearchError<I, E>
where
    I: Debug + Display,
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Predicate(err) => Some(err),
            _ => None,
        }
    }
}
