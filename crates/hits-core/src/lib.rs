// File: crates/hits-core/src/lib.rs
// Summary: Core library entry point; turns backend hit/stat series into an aligned,
// top-K aggregated bar frame and answers pointer hit-tests against rendered bars.

pub mod value;
pub mod series;
pub mod response;
pub mod metric;
pub mod align;
pub mod aggregate;
pub mod cumulative;
pub mod geometry;
pub mod layout;
pub mod hover;
pub mod config;
pub mod state;
pub mod error;

pub use value::parse_value;
pub use series::{Labels, RawSeries, Timestamp};
pub use align::{align, AlignedMatrix};
pub use aggregate::{aggregate, aggregate_hits, aggregate_matrix, OtherRule};
pub use cumulative::{accumulate, CumulativeMode};
pub use geometry::{RectI32, Viewport};
pub use layout::{BarGeometry, BarLayoutCache, AXIS_SERIES};
pub use hover::{pixel_ratio, HoverHit, HoverHitTester, SeriesVisibility};
pub use config::{ChartConfig, QueryMode};
pub use state::{decode_response, ChartFrame, ChartState, FrameStatus, LegendEntry, RequestTicket};
pub use error::{ConfigError, ResponseError, SeriesError};
