//! Run with `cargo test --all-features`.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use gallop::{Boundary, Bracket, Budget, Search, SearchError, search, try_search};

macro_rules! test {
    ($call:expr, $result:expr, evaluations: $n:expr) => {{
        assert_eq!($call, $result);
        assert_eq!(gallop::internal::last_evaluations(), $n);
    }};
    ($call:expr, $result:expr, at_most: $n:expr) => {{
        assert_eq!($call, $result);
        assert!(gallop::internal::last_evaluations() <= $n);
    }};
}

/// The evaluation bound for a boundary `k + 1` with `k >= 1`.
fn bound(k: u128) -> usize {
    2 * k.ilog2() as usize + 3
}

/// Test the worked example.
#[test]
fn test_example() {
    test!(search(|i: u64| i <= 41, None), Ok(Boundary::Found(42)), evaluations: 13);
    assert!(gallop::internal::last_evaluations() <= 14);
}

/// Test the base cases handled before the doubling phase.
#[test]
fn test_base_cases() {
    test!(search(|_: u64| false, None), Ok(Boundary::Found(0)), evaluations: 1);
    test!(search(|i: u64| i == 0, None), Ok(Boundary::Found(1)), evaluations: 2);
    test!(search(|i: u64| i <= 1, None), Ok(Boundary::Found(2)), evaluations: 3);
}

/// Test a predicate that holds on the whole range.
#[test]
fn test_exhausted() {
    test!(search(|_: u8| true, None), Ok(Boundary::Exhausted), evaluations: 10);
    test!(search(|_: u64| true, None), Ok(Boundary::Exhausted), evaluations: 66);
    test!(search(|_: u128| true, None), Ok(Boundary::Exhausted), evaluations: 130);
}

/// Test the top of the representable range.
#[test]
fn test_top_of_range() {
    test!(search(|i: u8| i < u8::MAX, None), Ok(Boundary::Found(u8::MAX)), evaluations: 17);
    test!(
        search(|i: u64| i < u64::MAX, None),
        Ok(Boundary::Found(u64::MAX)),
        at_most: Budget::default_for::<u64>()
    );
    test!(
        search(|i: u64| i <= 1 << 63, None),
        Ok(Boundary::Found((1 << 63) + 1)),
        at_most: Budget::default_for::<u64>()
    );
    test!(
        search(|i: u128| i < u128::MAX / 3, None),
        Ok(Boundary::Found(u128::MAX / 3)),
        at_most: Budget::default_for::<u128>()
    );
}

/// Test every boundary of an 8-bit index.
#[test]
fn test_every_u8_boundary() {
    for k in 0..u8::MAX {
        let expected = Ok(Boundary::Found(k + 1));
        if k == 0 {
            test!(search(|i: u8| i <= k, None), expected, evaluations: 2);
        } else {
            test!(search(|i: u8| i <= k, None), expected, at_most: bound(k as u128));
        }
    }
}

/// Test every boundary of a 16-bit index against a linear scan.
#[test]
fn test_every_u16_boundary() {
    for k in 1..u16::MAX {
        let expected = Ok(Boundary::Found(k + 1));
        test!(search(|i: u16| i <= k, None), expected, at_most: bound(k as u128));
        if k >= 8 {
            assert!(gallop::internal::last_evaluations() < k as usize + 2);
        }
    }
}

/// Test other index widths.
#[test]
fn test_widths() {
    test!(search(|i: u32| i < 100_000, None), Ok(Boundary::Found(100_000)), at_most: bound(99_999));
    test!(search(|i: usize| i < 7, None), Ok(Boundary::Found(7)), at_most: bound(6));
    test!(
        search(|i: u128| i <= 1 << 100, None),
        Ok(Boundary::Found((1 << 100) + 1)),
        at_most: bound(1 << 100)
    );
}

/// Test that no index is evaluated twice.
#[test]
fn test_memoization() {
    let seen = RefCell::new(HashSet::new());
    let result = search(
        |i: u64| {
            assert!(seen.borrow_mut().insert(i), "evaluated {i} twice");
            i < 5000
        },
        None,
    );
    assert_eq!(result, Ok(Boundary::Found(5000)));
    assert_eq!(seen.borrow().len(), gallop::internal::last_evaluations());
}

/// Test that repeated searches agree.
#[test]
fn test_idempotence() {
    let first = Search::new().budget(40).report(|i: u32| i < 777);
    let second = Search::new().budget(40).report(|i: u32| i < 777);
    assert_eq!(first, second);
    assert_eq!(first.map(|report| report.boundary), Ok(Boundary::Found(777)));
}

/// Test that a budget below the minimum is rejected up front.
#[test]
fn test_invalid_budget() {
    let calls = RefCell::new(0);
    let predicate = |i: u64| {
        *calls.borrow_mut() += 1;
        i < 10
    };

    test!(
        search(predicate, Some(0)),
        Err(SearchError::InvalidConfiguration { budget: 0, minimum: 16 }),
        evaluations: 0
    );
    assert_eq!(*calls.borrow(), 0);

    test!(
        Search::new().budget(9).run(|i: u8| i < 10),
        Err(SearchError::InvalidConfiguration { budget: 9, minimum: 10 }),
        evaluations: 0
    );
    test!(
        Search::new().budget(10).run(|i: u8| i < 10),
        Ok(Boundary::Found(10)),
        evaluations: 9
    );
}

/// Test running out of budget in both phases.
#[test]
fn test_budget_exceeded() {
    test!(
        search(|i: u64| i <= 1_000_000, Some(16)),
        Err(SearchError::BudgetExceeded {
            last_bracket: Bracket { lo: Some(1 << 14), hi: None },
            evaluations: 16,
        }),
        evaluations: 16
    );

    test!(
        search(|i: u8| i <= 200, Some(10)),
        Err(SearchError::BudgetExceeded {
            last_bracket: Bracket { lo: Some(128), hi: Some(255) },
            evaluations: 10,
        }),
        evaluations: 10
    );

    // Raising the budget resolves it.
    test!(search(|i: u8| i <= 200, Some(20)), Ok(Boundary::Found(201)), at_most: 20);
}

#[derive(Debug, Clone, PartialEq)]
struct Unavailable(u64);

impl Display for Unavailable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "index {} is unavailable", self.0)
    }
}

impl std::error::Error for Unavailable {}

/// Test that predicate failures are passed through unchanged.
#[test]
fn test_fallible_predicate() {
    let fallible = |i: u64| if i >= 100 { Err(Unavailable(i)) } else { Ok(i < 50) };
    test!(try_search(fallible, None), Ok(Boundary::Found(50)), at_most: bound(49));

    let failing = |i: u64| if i >= 32 { Err(Unavailable(i)) } else { Ok(true) };
    let err = try_search(failing, None).unwrap_err();
    assert_eq!(err, SearchError::Predicate(Unavailable(32)));
    assert_eq!(err.to_string(), "predicate failed: index 32 is unavailable");
    assert!(std::error::Error::source(&err).is_some());
}

#[quickcheck_macros::quickcheck]
fn test_arbitrary_boundary(k: u64) -> bool {
    let result = search(|i: u64| i <= k, None);
    let within = match k {
        0 => gallop::internal::last_evaluations() == 2,
        _ => gallop::internal::last_evaluations() <= bound(k as u128),
    };
    let expected = match k.checked_add(1) {
        Some(n) => Boundary::Found(n),
        None => Boundary::Exhausted,
    };
    within && result == Ok(expected)
}

#[quickcheck_macros::quickcheck]
fn test_arbitrary_wide_boundary(k: u64, shift: u8) -> bool {
    let k = (k as u128) << (shift % 64);
    search(|i: u128| i <= k, None) == Ok(Boundary::Found(k + 1))
}
