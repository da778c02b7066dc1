// File: crates/hits-core/src/align.rs
// Summary: Merge independently sampled series onto one sorted, de-duplicated time axis.

use std::collections::HashMap;

use crate::series::{RawSeries, Timestamp};

/// Series re-expressed as dense rows over a shared axis.
///
/// Contract: `axis` is strictly ascending; every row has `axis.len()` entries
/// and `rows[r][i]` is `None` when series `r` had no sample at `axis[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlignedMatrix {
    pub axis: Vec<Timestamp>,
    pub rows: Vec<Vec<Option<f64>>>,
}

impl AlignedMatrix {
    pub fn empty() -> Self { Self::default() }

    /// Number of axis points.
    pub fn len(&self) -> usize { self.axis.len() }
    pub fn is_empty(&self) -> bool { self.axis.is_empty() }
    pub fn row_count(&self) -> usize { self.rows.len() }

    /// Axis as epoch seconds, the unit renderers place bars by.
    pub fn axis_seconds(&self) -> Vec<f64> {
        self.axis.iter().map(|t| t.timestamp_millis() as f64 / 1000.0).collect()
    }

    /// `true` if any row has at least one present sample.
    pub fn has_values(&self) -> bool {
        self.rows.iter().any(|r| r.iter().any(Option::is_some))
    }
}

/// Align `series` onto the union of their timestamps.
///
/// Zero and "no sample" stay distinct: a missing point is `None`, never `0.0`.
pub fn align(series: &[RawSeries]) -> AlignedMatrix {
    if series.is_empty() {
        return AlignedMatrix::empty();
    }

    let mut axis: Vec<Timestamp> =
        series.iter().flat_map(|s| s.timestamps.iter().copied()).collect();
    axis.sort_unstable();
    axis.dedup();

    let rows = series
        .iter()
        .map(|s| {
            let lookup: HashMap<Timestamp, Option<f64>> = s.samples().collect();
            axis.iter().map(|t| lookup.get(t).copied().flatten()).collect()
        })
        .collect();

    AlignedMatrix { axis, rows }
}
