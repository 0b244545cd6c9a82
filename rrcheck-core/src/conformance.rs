//! Round-robin conformance checking
//!
//! Decides from the outside whether a picker cycles through a multiset of
//! expected handles, without knowing anything about its internal state.
//!
//! The check runs in two steps:
//!
//! 1. `want.len()` picks must form a permutation of `want`. Handles may come
//!    in any order, but no handle may appear more often than it does in
//!    `want`. With `want = [a, a, b]` the check fails on `a, a, a` (third `a`
//!    before `b`) and on `a, b, b` (second `b` before the second `a`).
//! 2. The next `REPEAT_CYCLES` cycles must repeat that permutation exactly.
//!    `a, b, a, b, a, a` passes step 1 but fails here, because the second
//!    cycle does not repeat the first.
//!
//! Repeating a handle in `want` turns the check into a weighted round-robin
//! check for free. Ties among equal handles may be broken any way in the
//! first cycle, but every later cycle must break them the same way.

use crate::balancer::Picker;
use crate::error::{Result, RoundRobinMismatch};
use crate::pool::ConnectionHandle;
use rrcheck_common::PickInfo;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Cycles checked after the first one
pub const REPEAT_CYCLES: usize = 2;

/// Check that repeated calls to `pick` are a (weighted) round robin over `want`
///
/// `pick` is called at most `(1 + REPEAT_CYCLES) * want.len()` times and
/// never after the first mismatch.
///
/// # Example
///
/// ```
/// use rrcheck_core::conformance::is_round_robin;
///
/// let want = ["a", "a", "b"];
/// let mut picks = ["b", "a", "a"].into_iter().cycle();
/// assert!(is_round_robin(&want, || picks.next().unwrap()).is_ok());
///
/// let mut picks = ["a", "a", "a"].into_iter().cycle();
/// assert!(is_round_robin(&want, || picks.next().unwrap()).is_err());
/// ```
pub fn is_round_robin<T, F>(want: &[T], mut pick: F) -> Result<()>
where
    T: Eq + Hash + Clone + fmt::Display,
    F: FnMut() -> T,
{
    try_is_round_robin(want, || Ok(pick()))
}

/// Like `is_round_robin`, but `pick` may fail
///
/// A pick error aborts the check and is returned unchanged.
pub fn try_is_round_robin<T, F>(want: &[T], mut pick: F) -> Result<()>
where
    T: Eq + Hash + Clone + fmt::Display,
    F: FnMut() -> Result<T>,
{
    // Handle -> remaining count, for weighted round robin
    let mut remaining: HashMap<T, i64> = HashMap::with_capacity(want.len());
    for w in want {
        *remaining.entry(w.clone()).or_insert(0) += 1;
    }

    let mut first = Vec::with_capacity(want.len());
    for _ in want {
        let got = pick()?;
        let count = remaining.entry(got.clone()).or_insert(0);
        *count -= 1;
        first.push(got);
        if *count < 0 {
            return Err(RoundRobinMismatch::ExtraPick { want: labels(want), got: labels(&first) }
                .into());
        }
    }

    let mut second = Vec::with_capacity(REPEAT_CYCLES * want.len());
    for _ in 0..REPEAT_CYCLES {
        for expected in &first {
            let got = pick()?;
            let matched = got == *expected;
            second.push(got);
            if !matched {
                return Err(RoundRobinMismatch::CycleMismatch {
                    first: labels(&first),
                    second: labels(&second),
                }
                .into());
            }
        }
    }

    tracing::trace!("round robin confirmed over [{}]", labels(&first).join(", "));
    Ok(())
}

/// Check a published picker against `want`
///
/// Every call is routed with a default `PickInfo`. A picker error fails the
/// check with that error.
pub fn is_round_robin_picker(want: &[ConnectionHandle], picker: &dyn Picker) -> Result<()> {
    let info = PickInfo::default();
    try_is_round_robin(want, || picker.pick(&info).map(|res| res.connection))
}

fn labels<T: fmt::Display>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
