// File: crates/hits-render-skia/src/lib.rs
// Summary: Skia renderer for hit/stat bar frames; records bar geometry for hover hit-testing.

pub mod bars;
pub mod grid;
pub mod scale;
pub mod theme;
pub mod types;

pub use bars::{BarChart, RenderOptions};
pub use scale::{IndexScale, ValueScale};
pub use theme::Theme;
pub use types::Insets;
