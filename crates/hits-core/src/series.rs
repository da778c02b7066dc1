// File: crates/hits-core/src/series.rs
// Summary: RawSeries model: one time-bucketed hit or stat series as returned by the backend.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::SeriesError;
use crate::value::sum_values;

/// Identifying dimensions of a series (field name -> value).
pub type Labels = BTreeMap<String, String>;

/// Sample instant on the time axis.
pub type Timestamp = DateTime<Utc>;

#[derive(Clone, Debug, PartialEq)]
pub struct RawSeries {
    pub timestamps: Vec<Timestamp>,
    pub values: Vec<Option<f64>>,
    pub labels: Labels,
    /// Sum of all present values.
    pub total: f64,
    /// Set only on the synthetic series produced by folding the tail.
    pub is_other: bool,
}

impl RawSeries {
    /// Build a series enforcing `timestamps.len() == values.len()`; `total` is computed.
    pub fn try_new(
        timestamps: Vec<Timestamp>,
        values: Vec<Option<f64>>,
        labels: Labels,
    ) -> Result<Self, SeriesError> {
        if timestamps.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                timestamps: timestamps.len(),
                values: values.len(),
            });
        }
        let total = sum_values(&values);
        Ok(Self { timestamps, values, labels, total, is_other: false })
    }

    pub fn from_samples<I>(labels: Labels, samples: I) -> Self
    where
        I: IntoIterator<Item = (Timestamp, Option<f64>)>,
    {
        let (timestamps, values): (Vec<_>, Vec<_>) = samples.into_iter().unzip();
        let total = sum_values(&values);
        Self { timestamps, values, labels, total, is_other: false }
    }

    /// Override the computed total (hit responses carry their own).
    pub fn with_total(mut self, total: f64) -> Self {
        self.total = total;
        self
    }

    /// The synthetic "Other" series built from per-timestamp sums.
    pub(crate) fn other(sums: BTreeMap<Timestamp, f64>, total: f64) -> Self {
        let (timestamps, values): (Vec<_>, Vec<_>) =
            sums.into_iter().map(|(t, v)| (t, Some(v))).unzip();
        Self { timestamps, values, labels: Labels::new(), total, is_other: true }
    }

    pub fn len(&self) -> usize { self.timestamps.len() }
    pub fn is_empty(&self) -> bool { self.timestamps.is_empty() }

    /// `true` when the series has no distinguishing fields.
    pub fn is_unlabelled(&self) -> bool { self.labels.is_empty() }

    pub fn samples(&self) -> impl Iterator<Item = (Timestamp, Option<f64>)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }
}
