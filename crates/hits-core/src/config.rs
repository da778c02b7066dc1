// File: crates/hits-core/src/config.rs
// Summary: Chart configuration (top-K, grouping field, cumulative/stacked modes) and parameter parsing.

use chrono::TimeDelta;
use log::warn;

use crate::cumulative::CumulativeMode;
use crate::error::ConfigError;
use crate::series::Timestamp;

/// Default number of series kept individually.
pub const DEFAULT_TOP_HITS: usize = 5;
/// Default number of time buckets requested for the chart range.
pub const DEFAULT_BARS_COUNT: usize = 100;
/// Default field hits are grouped by.
pub const DEFAULT_GROUP_FIELD: &str = "_stream";

pub const PARAM_TOP_HITS: &str = "top_hits";
pub const PARAM_GROUP_HITS: &str = "group_hits";
pub const PARAM_BARS_COUNT: &str = "bars_count";
pub const PARAM_GRAPH_MODE: &str = "graph_mode";
pub const PARAM_CUMULATIVE: &str = "cumulative";
pub const PARAM_STACKED: &str = "stacked";
pub const PARAM_HIDE_CHART: &str = "hide_chart";

/// Which backend endpoint feeds the chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueryMode {
    /// Pre-bucketed hit counts.
    #[default]
    Hits,
    /// Range-query statistics matrix.
    Stats,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Hits => "hits",
            QueryMode::Stats => "stats",
        }
    }
}

impl std::str::FromStr for QueryMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hits" => Ok(QueryMode::Hits),
            "stats" => Ok(QueryMode::Stats),
            _ => Err(invalid(PARAM_GRAPH_MODE, s)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartConfig {
    /// Series kept individually; the rest fold into Other. 0 folds everything.
    pub top_k: usize,
    /// Bucket-count hint for the fetch; see [`ChartConfig::bucket_step`].
    pub bars_count: usize,
    pub group_field: String,
    pub query_mode: QueryMode,
    /// `None` renders raw values.
    pub cumulative: Option<CumulativeMode>,
    /// Renderer-only: stack bars instead of overlaying them.
    pub stacked: bool,
    /// Hidden charts drop their data and pause updates.
    pub hide_chart: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_HITS,
            bars_count: DEFAULT_BARS_COUNT,
            group_field: DEFAULT_GROUP_FIELD.to_string(),
            query_mode: QueryMode::default(),
            cumulative: None,
            stacked: false,
            hide_chart: false,
        }
    }
}

impl ChartConfig {
    /// Build a config from query-string style pairs; unknown keys are ignored.
    ///
    /// `top_hits` or `bars_count` that is not a positive integer falls back to
    /// its default;
    /// malformed modes and flags are errors.
    pub fn from_params<'a, I>(params: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut cfg = Self::default();
        for (key, value) in params {
            cfg.apply_param(key, value)?;
        }
        Ok(cfg)
    }

    pub fn apply_param(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            PARAM_TOP_HITS => self.top_k = positive_or(key, value, DEFAULT_TOP_HITS),
            PARAM_BARS_COUNT => self.bars_count = positive_or(key, value, DEFAULT_BARS_COUNT),
            PARAM_GROUP_HITS => {
                let v = value.trim();
                self.group_field =
                    if v.is_empty() { DEFAULT_GROUP_FIELD.to_string() } else { v.to_string() };
            }
            PARAM_GRAPH_MODE => self.query_mode = value.parse()?,
            PARAM_CUMULATIVE => self.cumulative = parse_cumulative(value)?,
            PARAM_STACKED => self.stacked = parse_flag(key, value)?,
            PARAM_HIDE_CHART => self.hide_chart = parse_flag(key, value)?,
            _ => {}
        }
        Ok(())
    }

    /// Bucket width that splits `[start, end]` into `bars_count` bars, never
    /// below one millisecond. The hits fetch sends it as its `step`.
    pub fn bucket_step(&self, start: Timestamp, end: Timestamp) -> TimeDelta {
        let span_ms = (end - start).num_milliseconds().max(0);
        let bars = i64::try_from(self.bars_count.max(1)).unwrap_or(i64::MAX);
        TimeDelta::milliseconds((span_ms / bars).max(1))
    }
}

fn positive_or(key: &str, value: &str, default: usize) -> usize {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            warn!("ignoring {key}={value:?}, using {default}");
            default
        }
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue { key: key.to_string(), value: value.to_string() }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

/// `true`/`gaps` selects gap-preserving sums, `zero` zero-filling, `false`/`off` disables.
pub fn parse_cumulative(value: &str) -> Result<Option<CumulativeMode>, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "on" | "gaps" => Ok(Some(CumulativeMode::GapPreserving)),
        "zero" | "zero-fill" => Ok(Some(CumulativeMode::ZeroFill)),
        "false" | "0" | "off" => Ok(None),
        _ => Err(invalid(PARAM_CUMULATIVE, value)),
    }
}
