// File: crates/hits-render-skia/src/grid.rs
// Summary: Simple grid/tick layout helpers.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Every `stride`-th index of `[start, end)` so that at most `max_labels` are picked.
pub fn label_indices(start: usize, end: usize, max_labels: usize) -> Vec<usize> {
    let count = end.saturating_sub(start);
    if count == 0 || max_labels == 0 { return Vec::new(); }
    let stride = count.div_ceil(max_labels).max(1);
    (start..end).step_by(stride).collect()
}
