// File: crates/hits-core/src/hover.rs
// Summary: Pointer hit-testing against the bar layout cache (topmost visible series wins).

use crate::geometry::Viewport;
use crate::layout::{BarLayoutCache, AXIS_SERIES};

/// Series and absolute data index of the bar under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverHit {
    pub series_index: usize,
    pub absolute_data_index: usize,
}

/// One entry of the renderer's series list, in draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeriesVisibility {
    pub index: usize,
    pub shown: bool,
}

impl SeriesVisibility {
    pub const fn new(index: usize, shown: bool) -> Self { Self { index, shown } }

    /// Series `0..count`, all shown.
    pub fn all_shown(count: usize) -> Vec<Self> {
        (0..count).map(|i| Self::new(i, true)).collect()
    }
}

/// Device-pixel ratio of a canvas: backing width over client (CSS) width.
pub fn pixel_ratio(backing_width: f64, client_width: f64) -> f64 {
    if client_width > 0.0 && backing_width > 0.0 { backing_width / client_width } else { 1.0 }
}

/// Read-only hit-tester over the geometry recorded by the last paint pass.
pub struct HoverHitTester<'a> {
    cache: &'a BarLayoutCache,
}

impl<'a> HoverHitTester<'a> {
    pub fn new(cache: &'a BarLayoutCache) -> Self { Self { cache } }

    /// Find the bar under `pointer_x` (CSS pixels, canvas coordinates).
    ///
    /// The pointer is absolute within the canvas, not relative to the plot
    /// area: callers holding a plot-relative cursor add the plot's CSS left
    /// offset first.
    ///
    /// `viewport` and the cached geometry are in device pixels. `visible` must
    /// be in draw order; it is walked from the last (topmost) entry down and
    /// the first series with a containing bar wins.
    pub fn locate(
        &self,
        pointer_x: f64,
        pixel_ratio: f64,
        viewport: Viewport,
        visible: &[SeriesVisibility],
    ) -> Option<HoverHit> {
        let x = pointer_x * pixel_ratio;
        if !viewport.contains_x(x) {
            return None;
        }

        for vis in visible.iter().rev() {
            if vis.index == AXIS_SERIES || !vis.shown {
                continue;
            }
            let Some(geometry) = self.cache.geometry(vis.index) else {
                continue;
            };
            if let Some(j) = geometry.containing(x) {
                return Some(HoverHit {
                    series_index: vis.index,
                    absolute_data_index: geometry.range_start + j,
                });
            }
        }
        None
    }

    /// Absolute data index under the pointer, if any.
    pub fn hover_index(
        &self,
        pointer_x: f64,
        pixel_ratio: f64,
        viewport: Viewport,
        visible: &[SeriesVisibility],
    ) -> Option<usize> {
        self.locate(pointer_x, pixel_ratio, viewport, visible)
            .map(|hit| hit.absolute_data_index)
    }

    /// Horizontal extent `(left, right)` covered by every shown series' bar at
    /// the hit's data index; used to paint the hover band.
    pub fn highlight_span(&self, hit: HoverHit, visible: &[SeriesVisibility]) -> Option<(f64, f64)> {
        let (left, right) = visible
            .iter()
            .filter(|v| v.index != AXIS_SERIES && v.shown)
            .filter_map(|v| self.cache.geometry(v.index)?.bar_at(hit.absolute_data_index))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (l, w)| {
                (lo.min(l), hi.max(l + w))
            });

        (left.is_finite() && right.is_finite() && right > left).then_some((left, right))
    }
}
