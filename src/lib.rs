//! Budgeted boundary search over monotonic predicates.
//!
//! Given a predicate over unsigned indices that holds on `0..n` and fails
//! everywhere above, [`search`] finds `n` with a number of evaluations that is
//! logarithmic in `n`: it gallops through the powers of two until the
//! predicate fails and then bisects the last bracket. Each index is evaluated
//! at most once and the total work is capped by an explicit budget, so a
//! search over a `W`-bit index never performs more than `2 * W + 4` steps.
//!
//! ```
//! use gallop::{Boundary, Search, SearchError};
//!
//! let report = Search::new().report(|i: u64| i * i <= 1_000_000).unwrap();
//! assert_eq!(report.boundary, Boundary::Found(1001));
//! assert!(report.evaluations <= 22);
//!
//! let err = Search::new().budget(0).run(|i: u64| i < 10).unwrap_err();
//! assert!(matches!(err, SearchError::InvalidConfiguration { .. }));
//! ```

mod budget;
mod error;
mod exponential;
mod index;
mod probe;
mod refine;
mod registry;
mod search;
#[cfg(feature = "testing")]
mod testing;

pub use crate::budget::Budget;
pub use crate::error::{Bracket, SearchError};
pub use crate::index::Index;
pub use crate::registry::{Registry, SharedRegistry};
pub use crate::search::{Boundary, Report, Search, search, try_search};

/// These are implementation details. Do not rely on them!
#[doc(hidden)]
pub mod internal {
    pub use crate::exponential::{Bound, find_bound};
    pub use crate::probe::Probe;
    pub use crate::refine::refine;

    #[cfg(feature = "testing")]
    pub use crate::testing::last_evaluations;
}
