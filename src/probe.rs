use std::marker::PhantomData;

use rustc_hash::FxHashMap;

use crate::budget::Budget;
use crate::error::{Bracket, SearchError};
use crate::index::Index;

/// A memoizing wrapper around a predicate.
///
/// Every index is evaluated at most once; repeated queries are answered from
/// the memo and are free. Genuine evaluations are charged against the budget
/// and checked against everything observed so far.
pub struct Probe<I, E, F> {
    /// The caller's predicate.
    predicate: F,
    /// Maps from evaluated indices to their results.
    memo: FxHashMap<I, bool>,
    /// The budget of the search this probe belongs to.
    budget: Budget,
    /// What the evaluations so far say about the boundary.
    bracket: Bracket<I>,
    /// How many queries were served from the memo.
    hits: usize,
    _error: PhantomData<fn() -> E>,
}

impl<I, E, F> Probe<I, E, F>
where
    I: Index,
    F: FnMut(I) -> Result<bool, E>,
{
    /// Wraps a fallible predicate.
    pub fn new(predicate: F, budget: Budget) -> Self {
        Self {
            predicate,
            memo: FxHashMap::default(),
            budget,
            bracket: Bracket::unknown(),
            hits: 0,
            _error: PhantomData,
        }
    }

    /// Evaluates the predicate at `index`, or reuses an earlier result.
    pub fn evaluate(&mut self, index: I) -> Result<bool, SearchError<I, E>> {
        if let Some(&value) = self.memo.get(&index) {
            self.hits += 1;
            return Ok(value);
        }
        self.evaluate_fresh(index)
    }

    /// Evaluates the predicate at `index` as one refinement step.
    ///
    /// A step always consumes exactly one unit, even when its result is
    /// already memoized.
    pub fn step(&mut self, index: I) -> Result<bool, SearchError<I, E>> {
        if let Some(&value) = self.memo.get(&index) {
            self.hits += 1;
            self.charge()?;
            return Ok(value);
        }
        self.evaluate_fresh(index)
    }

    /// The memoized result at `index`, without evaluating or charging.
    pub fn known(&self, index: I) -> Option<bool> {
        self.memo.get(&index).copied()
    }

    /// The bracket established by the evaluations so far.
    pub fn bracket(&self) -> Bracket<I> {
        self.bracket
    }

    /// How many budget units have been consumed.
    pub fn evaluations(&self) -> usize {
        self.budget.used()
    }

    /// How many queries were answered from the memo.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// The probe's budget.
    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    /// Runs the underlying predicate.
    fn evaluate_fresh(&mut self, index: I) -> Result<bool, SearchError<I, E>> {
        self.charge()?;
        let value = (self.predicate)(index).map_err(SearchError::Predicate)?;
        tracing::trace!(%index, value, "evaluated predicate");
        self.observe(index, value)?;
        self.memo.insert(index, value);
        Ok(value)
    }

    /// Consumes one budget unit or fails with the current bracket.
    fn charge(&mut self) -> Result<(), SearchError<I, E>> {
        if self.budget.charge() {
            Ok(())
        } else {
            tracing::debug!(
                bracket = %self.bracket,
                evaluations = self.budget.used(),
                "budget exceeded"
            );
            Err(SearchError::BudgetExceeded {
                last_bracket: self.bracket,
                evaluations: self.budget.used(),
            })
        }
    }

    /// Narrows the bracket with a fresh result, rejecting contradictions.
    fn observe(&mut self, index: I, value: bool) -> Result<(), SearchError<I, E>> {
        let contradicts = if value {
            self.bracket.hi.is_some_and(|hi| index >= hi)
        } else {
            self.bracket.lo.is_some_and(|lo| index <= lo)
        };

        if contradicts {
            return Err(SearchError::PredicateViolation {
                index,
                value,
                bracket: self.bracket,
            });
        }

        if value {
            self.bracket.lo = Some(self.bracket.lo.map_or(index, |lo| lo.max(index)));
        } else {
            self.bracket.hi = Some(self.bracket.hi.map_or(index, |hi| hi.min(index)));
        }

        Ok(())
    }
}
