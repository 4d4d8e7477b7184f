//! Helpers shared by more than one aggregate scheme: per-point
//! representative extraction, the monotonic-deque sliding-window
//! minimum used by the sparse-table and linear-EMT schemes, and the
//! exact mode/median of a small multiset.

use std::collections::{HashMap, VecDeque};

use crate::domain::Domain;
use crate::table::Table;

/// One representative `i64` per domain point, via `disambiguator`.
/// Points with no records are passed an empty slice.
pub(crate) fn per_point_values(table: &Table, domain: Domain, mut disambiguator: impl FnMut(&[i64]) -> i64) -> Vec<i64> {
    (domain.start..domain.end).map(|point| disambiguator(table.filter(point))).collect()
}

/// The minimum of an empty multiset, used as the identity for
/// minimum-style windowed aggregation so empty domain points never win.
pub(crate) const EMPTY_POINT_MIN: i64 = i64::MAX;

pub(crate) fn point_minimum(values: &[i64]) -> i64 {
    values.iter().copied().min().unwrap_or(EMPTY_POINT_MIN)
}

/// `out[i] = min(values[max(0, i - window + 1) ..= i])`, the left-hanging
/// sliding-window minimum computed with a monotonic deque in O(n).
pub(crate) fn sliding_window_minimum_left_hanging(values: &[i64], window: i64) -> Vec<i64> {
    let window = window.max(1) as usize;
    let mut deque: VecDeque<usize> = VecDeque::new();
    let mut out = vec![0i64; values.len()];

    for i in 0..values.len() {
        while let Some(&back) = deque.back() {
            if values[back] >= values[i] {
                deque.pop_back();
            } else {
                break;
            }
        }
        deque.push_back(i);
        while let Some(&front) = deque.front() {
            if front + window <= i {
                deque.pop_front();
            } else {
                break;
            }
        }
        out[i] = values[*deque.front().expect("deque always holds at least `i`")];
    }

    out
}

/// The exact mode of a multiset, ties broken toward the smallest value.
/// Empty multisets return `0` — a placeholder that matches
/// `point_minimum`'s `EMPTY_POINT_MIN` sentinel in spirit: an absent
/// point contributes no real candidate.
pub(crate) fn exact_mode(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for &v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(value, _)| value)
        .unwrap()
}

/// The exact median of a multiset: the element at 1-indexed rank
/// `ceil(len/2)` in sorted order, or `0` for an empty multiset.
pub(crate) fn exact_median(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let rank = (sorted.len() + 1) / 2;
    sorted[rank - 1]
}

/// Boyer-Moore-style running majority counter: folds `value` into the
/// current `(candidate, count)`, giving an online heavy-hitter estimate
/// of the mode over the sequence seen so far.
pub(crate) fn fold_running_mode(current: Option<(i64, i64)>, value: i64) -> (i64, i64) {
    match current {
        None => (value, 1),
        Some((candidate, count)) if candidate == value => (candidate, count + 1),
        Some((candidate, count)) if count > 1 => (candidate, count - 1),
        Some(_) => (value, 1),
    }
}

/// Ceiling integer division for non-negative `a` and positive `b`.
pub(crate) fn ceil_div(a: i64, b: i64) -> i64 {
    (a + b - 1) / b
}
