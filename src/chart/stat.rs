//! Statistical transformations applied before charting.
//!
//! Counting and averaging per group, top-N ranking, and equal-width binning.

use crate::dataset::Record;
use crate::filter::FilteredView;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One histogram bin, `[start, end)` except the last which is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Upper edge.
    pub end: f64,
    /// Number of values in the bin.
    pub count: usize,
}

/// Total order used to rank aggregated values.
///
/// A `NaN` mean ranks above every finite value.
pub trait Rank {
    /// Compare two values, ascending.
    fn rank_cmp(&self, other: &Self) -> Ordering;
}

impl Rank for usize {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Rank for f64 {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// Count records per key; keys come back in ascending order.
pub fn count_by<K, F>(view: &FilteredView<'_>, key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&Record) -> K,
{
    let mut counts = BTreeMap::new();
    for record in view.iter() {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

/// Mean salary per key; keys come back in ascending order.
pub fn mean_salary_by<K, F>(view: &FilteredView<'_>, key: F) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&Record) -> K,
{
    let mut sums: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for record in view.iter() {
        let entry = sums.entry(key(record)).or_insert((0.0, 0));
        entry.0 += record.salary_usd;
        entry.1 += 1;
    }
    sums.into_iter().map(|(k, (sum, n))| (k, sum / n as f64)).collect()
}

/// The `n` largest entries by value, largest first.
///
/// Ties keep the input (ascending key) order.
pub fn top_n<K, V>(groups: BTreeMap<K, V>, n: usize) -> Vec<(K, V)>
where
    V: Rank,
{
    let mut entries: Vec<(K, V)> = groups.into_iter().collect();
    entries.sort_by(|a, b| b.1.rank_cmp(&a.1));
    entries.truncate(n);
    entries
}

/// Exact extent of `values` as `(min, max)`, skipping `NaN`.
#[must_use]
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    let mut finite = values.iter().copied().filter(|v| !v.is_nan());
    let first = finite.next()?;
    Some(finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Split `values` into `bins` equal-width bins over their extent.
///
/// A zero-width extent is widened by 0.5 on each side. Every value lands in
/// exactly one bin, so the counts sum to `values.len()`. Returns an empty
/// vector for empty input.
#[must_use]
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let Some((min, max)) = extent(values) else {
        return Vec::new();
    };
    let bins = bins.max(1);
    let (lo, hi) = if max - min > 0.0 { (min, max) } else { (min - 0.5, max + 0.5) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &value in values {
        // NaN saturates to bin 0.
        let index = ((value - lo) / width).floor().max(0.0) as usize;
        counts[index.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            start: lo + width * i as f64,
            end: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect()
}
