// File: crates/hits-core/src/layout.rs
// Summary: Per-series cache of rendered bar geometry for the visible index range.
// Notes:
// - The renderer calls `begin_pass` once per series and `record_bar` once per
//   bar, in ascending index order, during each paint pass.
// - Series 0 is the time axis and never has bars.

use std::collections::HashMap;

use log::trace;

/// Series index reserved for the time axis.
pub const AXIS_SERIES: usize = 0;

/// Screen geometry of one series' bars over `[range_start, range_end)`.
///
/// Contract: `valid_order` lists exactly the positions whose `left` and
/// `width` are both finite, ascending by `left`. Unrecorded slots hold NaN,
/// so compare snapshots bitwise rather than with `==`.
#[derive(Clone, Debug)]
pub struct BarGeometry {
    pub range_start: usize,
    pub range_end: usize,
    pub left: Vec<f64>,
    pub width: Vec<f64>,
    pub valid_order: Vec<usize>,
}

impl BarGeometry {
    pub fn new(range_start: usize, range_end: usize) -> Self {
        let n = range_end.saturating_sub(range_start);
        Self {
            range_start,
            range_end,
            left: vec![f64::NAN; n],
            width: vec![f64::NAN; n],
            valid_order: Vec::new(),
        }
    }

    /// Number of positions covered by the range.
    pub fn len(&self) -> usize { self.left.len() }
    pub fn is_empty(&self) -> bool { self.left.is_empty() }

    pub fn covers(&self, range_start: usize, range_end: usize) -> bool {
        self.range_start == range_start
            && self.range_end == range_end
            && self.len() == range_end.saturating_sub(range_start)
    }

    /// Position of an absolute data index inside the range.
    pub fn position(&self, absolute_index: usize) -> Option<usize> {
        absolute_index
            .checked_sub(self.range_start)
            .filter(|&j| j < self.len())
    }

    /// `(left, width)` of the bar at `absolute_index`, if it has finite geometry.
    pub fn bar_at(&self, absolute_index: usize) -> Option<(f64, f64)> {
        let j = self.position(absolute_index)?;
        let (left, width) = (self.left[j], self.width[j]);
        (left.is_finite() && width.is_finite()).then_some((left, width))
    }

    /// Forget recorded bars, keeping the range.
    fn reset(&mut self) {
        self.left.fill(f64::NAN);
        self.width.fill(f64::NAN);
        self.valid_order.clear();
    }

    fn record(&mut self, absolute_index: usize, left: f64, width: f64) -> bool {
        let Some(j) = self.position(absolute_index) else {
            return false;
        };
        if self.left[j].is_finite() && self.width[j].is_finite() {
            // Re-recorded within one pass: drop the stale entry first.
            self.valid_order.retain(|&k| k != j);
        }
        self.left[j] = left;
        self.width[j] = width;

        if left.is_finite() && width.is_finite() {
            match self.valid_order.last() {
                Some(&last) if self.left[last] > left => {
                    // Out-of-order emission: keep the order sorted explicitly.
                    let at = self.valid_order.partition_point(|&k| self.left[k] <= left);
                    self.valid_order.insert(at, j);
                }
                _ => self.valid_order.push(j),
            }
        }
        true
    }

    /// Position of the rightmost valid bar whose left edge is `<= x`.
    ///
    /// This is only a candidate: `x` may still fall in the gap after it.
    pub fn candidate(&self, x: f64) -> Option<usize> {
        let upper = self.valid_order.partition_point(|&k| self.left[k] <= x);
        upper.checked_sub(1).map(|pos| self.valid_order[pos])
    }

    /// Position of the bar whose `[left, left + width)` contains `x`.
    pub fn containing(&self, x: f64) -> Option<usize> {
        let j = self.candidate(x)?;
        let (left, width) = (self.left[j], self.width[j]);
        (x >= left && x < left + width).then_some(j)
    }
}

/// Map from series index to the geometry of its bars, owned by one chart.
#[derive(Clone, Debug, Default)]
pub struct BarLayoutCache {
    layouts: HashMap<usize, BarGeometry>,
}

impl BarLayoutCache {
    pub fn new() -> Self { Self::default() }

    /// Make sure `series` has geometry for `[start, end_exclusive)`.
    ///
    /// Rebuilds (never patches) when the cached range differs; otherwise a
    /// no-op. Returns whether a rebuild happened.
    pub fn ensure_layout(&mut self, series: usize, start: usize, end_exclusive: usize) -> bool {
        if series == AXIS_SERIES {
            return false;
        }
        if self.layouts.get(&series).is_some_and(|g| g.covers(start, end_exclusive)) {
            return false;
        }
        trace!("rebuilding bar layout for series {series}: [{start}, {end_exclusive})");
        self.layouts.insert(series, BarGeometry::new(start, end_exclusive));
        true
    }

    /// Start a paint pass for `series`: ensure the range, then forget the bars
    /// recorded by the previous pass.
    pub fn begin_pass(&mut self, series: usize, start: usize, end_exclusive: usize) {
        self.ensure_layout(series, start, end_exclusive);
        if let Some(g) = self.layouts.get_mut(&series) {
            g.reset();
        }
    }

    /// Store one rendered bar. Non-finite geometry is kept for index
    /// alignment but is invisible to hit-testing. Indices outside the cached
    /// range are ignored.
    pub fn record_bar(&mut self, series: usize, absolute_index: usize, left: f64, width: f64) {
        let Some(g) = self.layouts.get_mut(&series) else {
            trace!("record_bar for series {series} without layout");
            return;
        };
        if !g.record(absolute_index, left, width) {
            trace!(
                "record_bar: index {absolute_index} outside [{}, {}) for series {series}",
                g.range_start,
                g.range_end
            );
        }
    }

    pub fn geometry(&self, series: usize) -> Option<&BarGeometry> {
        self.layouts.get(&series)
    }

    pub fn remove(&mut self, series: usize) -> Option<BarGeometry> {
        self.layouts.remove(&series)
    }

    /// Drop every entry (chart teardown or a new frame).
    pub fn clear(&mut self) {
        self.layouts.clear();
    }

    pub fn len(&self) -> usize { self.layouts.len() }
    pub fn is_empty(&self) -> bool { self.layouts.is_empty() }
}
