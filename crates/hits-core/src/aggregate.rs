// File: crates/hits-core/src/aggregate.rs
// Summary: Top-K ranking of series with the long tail folded into one synthetic "Other" series.

use std::collections::BTreeMap;

use log::debug;

use crate::error::ResponseError;
use crate::response::{HitsResponse, MatrixResponse};
use crate::series::{RawSeries, Timestamp};
use crate::value::sum_contribution;

/// Which series are folded into "Other" regardless of their magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OtherRule {
    /// Pure ranking by total (statistics-matrix responses).
    #[default]
    RankOnly,
    /// A series without labels is the backend's overflow bucket and is always
    /// folded (hit-count responses).
    EmptyLabels,
}

impl OtherRule {
    pub fn forces_other(&self, series: &RawSeries) -> bool {
        match self {
            OtherRule::RankOnly => false,
            OtherRule::EmptyLabels => series.is_unlabelled(),
        }
    }
}

/// Keep the `limit` largest series by total and fold the rest into one
/// "Other" series placed first.
///
/// Ties keep input order. Without anything to fold the ranked input is
/// returned and no Other row is added. `limit == 0` folds everything.
pub fn aggregate(series: Vec<RawSeries>, limit: usize, rule: OtherRule) -> Vec<RawSeries> {
    let (forced, mut ranked): (Vec<_>, Vec<_>) =
        series.into_iter().partition(|s| rule.forces_other(s));

    // Vec::sort_by is stable. A NaN total ranks like 0, as it sums.
    ranked.sort_by(|a, b| rank_key(b.total).total_cmp(&rank_key(a.total)));

    let top_count = limit.min(ranked.len());
    let tail = ranked.split_off(top_count);

    if forced.is_empty() && tail.is_empty() {
        return ranked;
    }

    let folded = forced.len() + tail.len();
    let other = fold_other(forced.into_iter().chain(tail));
    debug!(
        "kept {} series, folded {folded} into other (total {})",
        ranked.len(),
        other.total
    );

    let mut out = Vec::with_capacity(ranked.len() + 1);
    out.push(other);
    out.extend(ranked);
    out
}

fn rank_key(total: f64) -> f64 {
    sum_contribution(Some(total))
}

/// Sum the folded series per timestamp; the total is the sum of their totals.
fn fold_other<I>(folded: I) -> RawSeries
where
    I: IntoIterator<Item = RawSeries>,
{
    let mut sums: BTreeMap<Timestamp, f64> = BTreeMap::new();
    let mut total = 0.0;

    for s in folded {
        for (t, v) in s.samples() {
            *sums.entry(t).or_insert(0.0) += sum_contribution(v);
        }
        total += rank_key(s.total);
    }

    RawSeries::other(sums, total)
}

/// Decode a hit-count response and aggregate it. Unlabelled hit series are
/// always folded into Other.
pub fn aggregate_hits(response: HitsResponse, limit: usize) -> Result<Vec<RawSeries>, ResponseError> {
    Ok(aggregate(response.into_series()?, limit, OtherRule::EmptyLabels))
}

/// Decode a statistics-matrix response and aggregate it by magnitude only.
pub fn aggregate_matrix(response: MatrixResponse, limit: usize) -> Result<Vec<RawSeries>, ResponseError> {
    Ok(aggregate(response.into_series()?, limit, OtherRule::RankOnly))
}
