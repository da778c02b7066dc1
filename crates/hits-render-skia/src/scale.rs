// File: crates/hits-render-skia/src/scale.rs
// Summary: Index (X) and value (Y) scales for bar placement.

/// Horizontal scale over data indices: one slot of `bar_spacing` device px per index.
#[derive(Clone, Copy, Debug)]
pub struct IndexScale {
    pub left_px: f32,
    pub start_logical: f64,
    pub bar_spacing: f32,
}

impl IndexScale {
    pub fn new(left_px: f32, start_logical: f64, bar_spacing: f32) -> Self {
        Self { left_px, start_logical, bar_spacing: bar_spacing.max(0.01) }
    }

    /// Scale that fits indices `[start, end)` exactly into `width_px`.
    pub fn for_window(left_px: f32, width_px: f32, start: usize, end: usize) -> Self {
        let count = end.saturating_sub(start).max(1);
        Self::new(left_px, start as f64, width_px / count as f32)
    }

    #[inline]
    pub fn to_px(&self, x: f64) -> f32 {
        self.left_px + ((x - self.start_logical) as f32) * self.bar_spacing
    }

    /// Left edge and width of the bar for index `i`, leaving `gap` px between
    /// neighbours. Width is NaN when the gap eats the whole slot.
    pub fn bar(&self, i: usize, gap: f32) -> (f32, f32) {
        let width = self.bar_spacing - gap;
        let left = self.to_px(i as f64) + gap * 0.5;
        if width > 0.0 { (left, width) } else { (left, f32::NAN) }
    }
}

/// Vertical linear value scale mapping `[vmin, vmax]` to `[bottom, top]` pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if !(s.vmax - s.vmin).is_finite() || (s.vmax - s.vmin).abs() < 1e-12 {
            s.vmax = s.vmin + 1.0;
        }
        s
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
}
