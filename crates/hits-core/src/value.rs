// File: crates/hits-core/src/value.rs
// Summary: Numeric-as-text sample parsing, including NaN/Inf sentinel tokens.

use serde::Deserialize;

/// Parse a backend sample value.
///
/// Recognises the `NaN`, `Inf`, `+Inf` and `-Inf` tokens. Text that is not a
/// number becomes NaN, so a single bad sample degrades one point instead of
/// failing the whole response.
pub fn parse_value(s: &str) -> f64 {
    match s.trim() {
        "NaN" => f64::NAN,
        "Inf" | "+Inf" => f64::INFINITY,
        "-Inf" => f64::NEG_INFINITY,
        other => other.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// What a sample adds to a running sum: absent and NaN samples add 0.
#[inline]
pub fn sum_contribution(v: Option<f64>) -> f64 {
    match v {
        Some(x) if !x.is_nan() => x,
        _ => 0.0,
    }
}

/// Sum of all present, parseable samples.
pub fn sum_values(values: &[Option<f64>]) -> f64 {
    values.iter().map(|&v| sum_contribution(v)).sum()
}

/// A sample as it appears on the wire: a JSON number, a numeric string, or null.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SampleValue {
    Number(f64),
    Text(String),
    Null,
}

impl SampleValue {
    pub fn to_value(&self) -> Option<f64> {
        match self {
            SampleValue::Number(n) => Some(*n),
            SampleValue::Text(s) => Some(parse_value(s)),
            SampleValue::Null => None,
        }
    }
}
