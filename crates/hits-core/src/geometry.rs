// File: crates/hits-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math (plot rect, hit-test viewport).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
}

/// Horizontal extent of the plot area in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub width: f64,
}

impl Viewport {
    pub const fn new(left: f64, width: f64) -> Self { Self { left, width } }

    pub fn right(&self) -> f64 { self.left + self.width }

    /// Inclusive on both edges.
    pub fn contains_x(&self, x: f64) -> bool {
        x.is_finite() && x >= self.left && x <= self.right()
    }
}

impl From<RectI32> for Viewport {
    fn from(r: RectI32) -> Self {
        Self { left: r.left as f64, width: r.width() as f64 }
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
