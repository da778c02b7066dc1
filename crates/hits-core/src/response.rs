// File: crates/hits-core/src/response.rs
// Summary: Serde models of the hit-count and statistics-matrix backend responses.
// Notes:
// - Only the fields the aggregator consumes are modelled; everything else is ignored.
// - A missing result container deserializes to `None` so callers can tell it
//   apart from an empty one.

use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;

use crate::error::ResponseError;
use crate::metric::build_metric_label;
use crate::series::{Labels, RawSeries, Timestamp};
use crate::value::{parse_value, SampleValue};

/// Label key under which a stat series stores its formatted metric label.
pub const STAT_NAME_FIELD: &str = "name";

/// `{ hits: [...] }`
#[derive(Clone, Debug, Deserialize)]
pub struct HitsResponse {
    pub hits: Option<Vec<HitSeries>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HitSeries {
    #[serde(default)]
    pub timestamps: Vec<String>,
    #[serde(default)]
    pub values: Vec<SampleValue>,
    #[serde(default)]
    pub fields: Labels,
    #[serde(default)]
    pub total: Option<f64>,
}

/// `{ status, data?: { result: [...] } }`
#[derive(Clone, Debug, Deserialize)]
pub struct MatrixResponse {
    #[serde(default)]
    pub status: String,
    pub data: Option<MatrixData>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MatrixData {
    pub result: Option<Vec<MetricSeries>>,
    #[serde(default, rename = "resultType")]
    pub result_type: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MetricSeries {
    #[serde(default)]
    pub metric: Labels,
    /// `[epochSeconds, valueText]` pairs.
    #[serde(default)]
    pub values: Vec<(f64, String)>,
}

impl HitsResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// All hit series, or `MalformedResponse` when `hits` is absent.
    pub fn into_series(self) -> Result<Vec<RawSeries>, ResponseError> {
        let hits = self.hits.ok_or(ResponseError::MalformedResponse { field: "hits" })?;
        Ok(hits.into_iter().map(HitSeries::into_raw).collect())
    }
}

impl MatrixResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn into_result(self) -> Option<Vec<MetricSeries>> {
        self.data?.result
    }

    /// All stat series, or `MalformedResponse` when `data.result` is absent.
    pub fn into_series(self) -> Result<Vec<RawSeries>, ResponseError> {
        let result = self
            .into_result()
            .ok_or(ResponseError::MalformedResponse { field: "result" })?;
        Ok(result.into_iter().map(MetricSeries::into_raw).collect())
    }
}

pub fn parse_rfc3339(s: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(s.trim()).ok().map(|t| t.with_timezone(&Utc))
}

/// Epoch seconds (possibly fractional) to an instant, at millisecond precision.
pub fn from_epoch_seconds(secs: f64) -> Option<Timestamp> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)
}

impl HitSeries {
    /// Convert to a `RawSeries`. Samples whose timestamp does not parse are
    /// dropped; a backend-provided `total` is kept as is.
    pub fn into_raw(self) -> RawSeries {
        if self.timestamps.len() != self.values.len() {
            warn!(
                "hit series {:?}: {} timestamps vs {} values, extra samples ignored",
                self.fields,
                self.timestamps.len(),
                self.values.len()
            );
        }
        let samples = self
            .timestamps
            .iter()
            .zip(&self.values)
            .filter_map(|(ts, v)| match parse_rfc3339(ts) {
                Some(t) => Some((t, v.to_value())),
                None => {
                    warn!("hit series {:?}: dropping sample with bad timestamp {ts:?}", self.fields);
                    None
                }
            })
            .collect::<Vec<_>>();

        let series = RawSeries::from_samples(self.fields, samples);
        match self.total {
            Some(total) => series.with_total(total),
            None => series,
        }
    }
}

impl MetricSeries {
    /// Convert to a `RawSeries` labelled `{ name: <metric label> }`; the total
    /// is the sum of the parsed values.
    pub fn into_raw(self) -> RawSeries {
        let label = build_metric_label(&self.metric);
        let samples = self
            .values
            .iter()
            .filter_map(|(secs, text)| match from_epoch_seconds(*secs) {
                Some(t) => Some((t, Some(parse_value(text)))),
                None => {
                    warn!("series {label:?}: dropping sample with bad timestamp {secs}");
                    None
                }
            })
            .collect::<Vec<_>>();

        let mut labels = Labels::new();
        labels.insert(STAT_NAME_FIELD.to_string(), label);
        RawSeries::from_samples(labels, samples)
    }
}
