// File: crates/hits-core/src/state.rs
// Summary: Current chart result (aligned frame + legend), replaced wholesale per response.
// Notes:
// - `ChartState` keeps the decoded response so top-K or cumulative changes
//   re-derive the frame without another fetch.
// - Completing a superseded request is ignored.

use std::sync::Arc;

use log::debug;

use crate::aggregate::{aggregate, OtherRule};
use crate::align::{align, AlignedMatrix};
use crate::config::{ChartConfig, QueryMode};
use crate::cumulative::accumulate;
use crate::error::ResponseError;
use crate::hover::SeriesVisibility;
use crate::metric::hits_label;
use crate::response::{HitsResponse, MatrixResponse, STAT_NAME_FIELD};
use crate::series::{Labels, RawSeries};

/// Legend name of the synthetic tail series.
pub const OTHER_LABEL: &str = "other";

/// Response series before ranking, with the folding rule of their source.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedResponse {
    pub series: Vec<RawSeries>,
    pub rule: OtherRule,
}

/// Decode a response body for `mode`.
pub fn decode_response(body: &[u8], mode: QueryMode) -> Result<DecodedResponse, ResponseError> {
    match mode {
        QueryMode::Hits => Ok(DecodedResponse {
            series: HitsResponse::from_slice(body)?.into_series()?,
            rule: OtherRule::EmptyLabels,
        }),
        QueryMode::Stats => Ok(DecodedResponse {
            series: MatrixResponse::from_slice(body)?.into_series()?,
            rule: OtherRule::RankOnly,
        }),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub labels: Labels,
    pub is_other: bool,
    pub total: f64,
}

/// Why a frame has nothing to draw, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Ready,
    Loading,
    Hidden,
    NoData,
    NoTimestamps,
    NoValues,
}

impl FrameStatus {
    /// User-facing text for empty states; `None` when the chart should be drawn.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            FrameStatus::Ready | FrameStatus::Loading => None,
            FrameStatus::Hidden => Some("Chart hidden. Hits updates paused."),
            FrameStatus::NoData => Some(
                "No logs volume available\nNo volume information available for the current queries and time range.",
            ),
            FrameStatus::NoTimestamps => {
                Some("No timestamp information available for the current queries and time range.")
            }
            FrameStatus::NoValues => {
                Some("No value information available for the current queries and time range.")
            }
        }
    }
}

/// What the renderer draws: aligned rows plus one legend entry per row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartFrame {
    pub matrix: AlignedMatrix,
    pub legend: Vec<LegendEntry>,
}

impl ChartFrame {
    pub fn empty() -> Self { Self::default() }

    /// Align aggregated `series` and apply the configured cumulative mode once.
    pub fn build(series: &[RawSeries], config: &ChartConfig) -> Self {
        let aligned = align(series);
        let matrix = match config.cumulative {
            Some(mode) => accumulate(&aligned, mode),
            None => aligned,
        };
        let legend = series
            .iter()
            .map(|s| LegendEntry {
                label: legend_label(s, config),
                labels: s.labels.clone(),
                is_other: s.is_other,
                total: s.total,
            })
            .collect();
        Self { matrix, legend }
    }

    /// Number of data rows (renderer series `1..=series_count()`).
    pub fn series_count(&self) -> usize { self.matrix.row_count() }

    /// Renderer series list: the axis at 0, then one shown entry per row.
    pub fn visibility(&self) -> Vec<SeriesVisibility> {
        SeriesVisibility::all_shown(self.series_count() + 1)
    }

    pub fn status(&self) -> FrameStatus {
        if self.matrix.rows.is_empty() {
            FrameStatus::NoData
        } else if self.matrix.axis.is_empty() {
            FrameStatus::NoTimestamps
        } else if !self.matrix.has_values() {
            FrameStatus::NoValues
        } else {
            FrameStatus::Ready
        }
    }
}

fn legend_label(series: &RawSeries, config: &ChartConfig) -> String {
    if series.is_other {
        return OTHER_LABEL.to_string();
    }
    match config.query_mode {
        QueryMode::Hits => hits_label(&series.labels, &config.group_field),
        QueryMode::Stats => series.labels.get(STAT_NAME_FIELD).cloned().unwrap_or_default(),
    }
}

/// Identifies one backend request; newer tickets supersede older ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Default)]
pub struct ChartState {
    config: ChartConfig,
    response: Option<Arc<DecodedResponse>>,
    series: Arc<Vec<RawSeries>>,
    frame: Arc<ChartFrame>,
    error: Option<String>,
    latest: u64,
    loading: bool,
}

impl ChartState {
    pub fn new(config: ChartConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &ChartConfig { &self.config }

    /// Current aggregated series (Other first when present).
    pub fn series(&self) -> Arc<Vec<RawSeries>> { Arc::clone(&self.series) }

    pub fn frame(&self) -> Arc<ChartFrame> { Arc::clone(&self.frame) }

    pub fn error(&self) -> Option<&str> { self.error.as_deref() }

    pub fn is_loading(&self) -> bool { self.loading }

    pub fn status(&self) -> FrameStatus {
        if self.loading {
            FrameStatus::Loading
        } else if self.config.hide_chart {
            FrameStatus::Hidden
        } else {
            self.frame.status()
        }
    }

    /// Start a request; any request still in flight becomes stale.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.latest += 1;
        self.loading = true;
        self.error = None;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply a successful fetch body. Returns `false` when the ticket was superseded.
    pub fn complete(&mut self, ticket: RequestTicket, body: &[u8]) -> bool {
        if !self.is_current(ticket) {
            debug!("dropping response for superseded request {}", ticket.0);
            return false;
        }
        self.loading = false;
        match decode_response(body, self.config.query_mode) {
            Ok(decoded) => {
                self.response = Some(Arc::new(decoded));
                self.error = None;
                // Hidden charts keep the newest response for when they are shown again.
                if !self.config.hide_chart {
                    self.rebuild();
                }
            }
            Err(e) => self.set_failed(e.to_string()),
        }
        true
    }

    /// Record a transport or backend failure for `ticket`.
    pub fn fail(&mut self, ticket: RequestTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.set_failed(message.into());
        true
    }

    /// Cancelled fetches leave the current result untouched.
    pub fn cancel(&mut self, ticket: RequestTicket) {
        if self.is_current(ticket) {
            self.loading = false;
        }
    }

    /// Swap the configuration and re-derive the frame from the kept response.
    ///
    /// Switching the query mode drops the response; the caller must refetch.
    pub fn reconfigure(&mut self, config: ChartConfig) {
        if config.query_mode != self.config.query_mode {
            self.response = None;
        }
        self.config = config;
        if self.config.hide_chart {
            self.clear();
            self.error = None;
            return;
        }
        self.rebuild();
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        let mut config = self.config.clone();
        config.hide_chart = hidden;
        self.reconfigure(config);
    }

    fn set_failed(&mut self, message: String) {
        self.error = Some(message);
        self.response = None;
        self.clear();
    }

    fn clear(&mut self) {
        self.series = Arc::new(Vec::new());
        self.frame = Arc::new(ChartFrame::empty());
    }

    fn rebuild(&mut self) {
        let Some(response) = self.response.as_ref() else {
            self.clear();
            return;
        };
        let series = aggregate(response.series.clone(), self.config.top_k, response.rule);
        self.frame = Arc::new(ChartFrame::build(&series, &self.config));
        self.series = Arc::new(series);
    }
}
