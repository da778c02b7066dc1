// File: crates/hits-render-skia/src/types.rs
// Summary: Shared sizes and plot margins for the bar renderer.

use hits_core::RectI32;

/// Default surface width in CSS pixels.
pub const WIDTH: i32 = 960;
/// Default surface height in CSS pixels.
pub const HEIGHT: i32 = 280;

/// Screen margins around the plot, in CSS pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }

    /// Plot rectangle inside a `width x height` device-pixel surface, with
    /// margins scaled by `dpr`. Degenerate sizes collapse to an empty rect.
    pub fn plot_rect(&self, width: i32, height: i32, dpr: f32) -> RectI32 {
        let s = |v: u32| (v as f32 * dpr).round() as i32;
        let left = s(self.left).min(width);
        let top = s(self.top).min(height);
        let right = (width - s(self.right)).max(left);
        let bottom = (height - s(self.bottom)).max(top);
        RectI32::from_ltrb(left, top, right, bottom)
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(56, 16, 28, 32)
    }
}
