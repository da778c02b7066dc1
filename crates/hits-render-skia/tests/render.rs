// File: crates/hits-render-skia/tests/render.rs
// Purpose: End-to-end bar renders: output buffers, recorded geometry, and hover against it.

use hits_core::{BarLayoutCache, ChartConfig, ChartFrame, ChartState, HoverHit, SeriesVisibility};
use hits_render_skia::{BarChart, Insets, RenderOptions, Theme};

const HITS: &[u8] = br#"{"hits": [
    {"timestamps": ["2024-01-01T00:00:00Z", "2024-01-01T00:01:00Z", "2024-01-01T00:02:00Z",
                    "2024-01-01T00:03:00Z", "2024-01-01T00:04:00Z"],
     "values": [4, 8, 6, 2, 10], "fields": {"_stream": "a"}, "total": 30},
    {"timestamps": ["2024-01-01T00:00:00Z", "2024-01-01T00:01:00Z", "2024-01-01T00:02:00Z",
                    "2024-01-01T00:03:00Z", "2024-01-01T00:04:00Z"],
     "values": [1, 2, 3, 4, 5], "fields": {"_stream": "b"}, "total": 15}
]}"#;

fn frame() -> std::sync::Arc<ChartFrame> {
    let mut state = ChartState::new(ChartConfig::default());
    let ticket = state.begin_request();
    assert!(state.complete(ticket, HITS));
    state.frame()
}

/// 400x200 surface with a 350px wide plot starting at x=40: 70px slots for 5 bars.
fn opts() -> RenderOptions {
    RenderOptions {
        width: 400,
        height: 200,
        dpr: 1.0,
        insets: Insets::new(40, 10, 10, 30),
        theme: Theme::dark(),
        draw_labels: false, // avoid font variance
        ..RenderOptions::default()
    }
}

fn pixel(px: &[u8], stride: usize, x: usize, y: usize) -> [u8; 4] {
    let o = y * stride + x * 4;
    [px[o], px[o + 1], px[o + 2], px[o + 3]]
}

#[test]
fn render_png_bytes() {
    let frame = frame();
    let chart = BarChart::new(&frame);
    let mut cache = BarLayoutCache::new();

    let bytes = chart.render_to_png_bytes(&opts(), &mut cache).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&bytes).expect("decode png");
    assert_eq!((img.width(), img.height()), (400, 200));
}

#[test]
fn render_png_file() {
    let frame = frame();
    let out = std::path::PathBuf::from("target/test_out/hits_bars.png");
    BarChart::new(&frame)
        .render_to_png(&opts(), &mut BarLayoutCache::new(), &out)
        .expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}

#[test]
fn paint_records_bar_geometry() {
    let frame = frame();
    let chart = BarChart::new(&frame);
    let mut cache = BarLayoutCache::new();
    chart.render_to_rgba8(&opts(), &mut cache).expect("rgba render");

    assert!(cache.geometry(0).is_none());
    for series in [1, 2] {
        let g = cache.geometry(series).expect("series geometry");
        assert_eq!((g.range_start, g.range_end), (0, 5));
        assert_eq!(g.valid_order, vec![0, 1, 2, 3, 4]);
        assert_eq!(g.bar_at(2), Some((180.5, 69.0)));
    }
}

#[test]
fn hover_hits_topmost_series() {
    let frame = frame();
    let chart = BarChart::new(&frame);
    let opts = opts();
    let mut cache = BarLayoutCache::new();
    chart.render_to_rgba8(&opts, &mut cache).expect("rgba render");

    assert_eq!(
        chart.hover(&opts, &cache, 215.0),
        Some(HoverHit { series_index: 2, absolute_data_index: 2 })
    );
    // Gap between slots 0 and 1.
    assert_eq!(chart.hover(&opts, &cache, 110.2), None);
    // Left of the plot.
    assert_eq!(chart.hover(&opts, &cache, 20.0), None);

    let hidden = BarChart::new(&frame).with_visibility(vec![
        SeriesVisibility::new(0, true),
        SeriesVisibility::new(1, true),
        SeriesVisibility::new(2, false),
    ]);
    assert_eq!(
        hidden.hover(&opts, &cache, 215.0),
        Some(HoverHit { series_index: 1, absolute_data_index: 2 })
    );
}

#[test]
fn hover_band_changes_bar_pixels() {
    let frame = frame();
    let chart = BarChart::new(&frame);
    let base = opts();
    let (plain, _, _, stride) = chart.render_to_rgba8(&base, &mut BarLayoutCache::new()).expect("rgba render");

    let hovered_opts = RenderOptions { pointer_x: Some(215.0), ..opts() };
    let (hovered, _, _, _) = chart.render_to_rgba8(&hovered_opts, &mut BarLayoutCache::new()).expect("rgba render");

    // Inside bar 2, near the baseline.
    assert_ne!(pixel(&plain, stride, 215, 165), pixel(&hovered, stride, 215, 165));
    // Bar 0 is untouched.
    assert_eq!(pixel(&plain, stride, 75, 165), pixel(&hovered, stride, 75, 165));
}

#[test]
fn stacked_bars_sit_on_previous_rows() {
    let frame = frame();
    let chart = BarChart::new(&frame);
    let theme = Theme::dark();
    let a = theme.palette[0];
    let b = theme.palette[1];

    // Overlay: value axis tops out at 10.5, so row a (6) reaches y~79 and row b (3) y~124.
    let (px, _, _, stride) = chart.render_to_rgba8(&opts(), &mut BarLayoutCache::new()).expect("rgba render");
    assert_eq!(pixel(&px, stride, 215, 95), [a.r(), a.g(), a.b(), 255]);

    // Stacked: axis tops out at 15.75; b spans 6..9, y~109 down to y~79.
    let stacked = RenderOptions { stacked: true, ..opts() };
    let (px, _, _, stride) = chart.render_to_rgba8(&stacked, &mut BarLayoutCache::new()).expect("rgba render");
    assert_eq!(pixel(&px, stride, 215, 95), [b.r(), b.g(), b.b(), 255]);
}

#[test]
fn window_limits_recorded_range() {
    let frame = frame();
    let chart = BarChart::new(&frame);
    let opts = RenderOptions { window: Some((1, 3)), ..opts() };
    let mut cache = BarLayoutCache::new();
    chart.render_to_rgba8(&opts, &mut cache).expect("rgba render");

    let g = cache.geometry(1).expect("series geometry");
    assert_eq!((g.range_start, g.range_end), (1, 3));
    // Two 175px slots: bar 1 spans 40.5..214.5, bar 2 215.5..389.5.
    assert_eq!(chart.hover(&opts, &cache, 215.0), None);
    assert_eq!(
        chart.hover(&opts, &cache, 300.0),
        Some(HoverHit { series_index: 2, absolute_data_index: 2 })
    );
}

#[test]
fn hover_pointer_scales_with_dpr() {
    let frame = frame();
    let chart = BarChart::new(&frame);
    let opts = RenderOptions { dpr: 2.0, ..opts() };
    let mut cache = BarLayoutCache::new();
    let (px, w, h, stride) = chart.render_to_rgba8(&opts, &mut cache).expect("rgba render");
    assert_eq!((w, h), (800, 400));
    assert_eq!(px.len(), stride * h as usize);

    // CSS x=215 is device x=430, inside bar 2 (360.5..499.5).
    assert_eq!(
        chart.hover(&opts, &cache, 215.0).map(|h| h.absolute_data_index),
        Some(2)
    );
}

#[test]
fn empty_frame_renders_background_only() {
    let frame = ChartFrame::empty();
    let chart = BarChart::new(&frame);
    let mut cache = BarLayoutCache::new();
    let (px, _, _, stride) = chart.render_to_rgba8(&opts(), &mut cache).expect("rgba render");
    assert!(cache.is_empty());
    assert_eq!(pixel(&px, stride, 0, 0)[3], 255);
}

#[test]
fn hidden_and_empty_frames_drop_stale_geometry() {
    let frame = frame();
    let mut cache = BarLayoutCache::new();
    BarChart::new(&frame).render_to_rgba8(&opts(), &mut cache).expect("rgba render");
    assert_eq!(cache.len(), 2);

    let hidden = BarChart::new(&frame).with_visibility(vec![
        SeriesVisibility::new(0, true),
        SeriesVisibility::new(1, true),
        SeriesVisibility::new(2, false),
    ]);
    hidden.render_to_rgba8(&opts(), &mut cache).expect("rgba render");
    assert!(cache.geometry(1).is_some());
    assert!(cache.geometry(2).is_none());

    let empty = ChartFrame::empty();
    BarChart::new(&empty).render_to_rgba8(&opts(), &mut cache).expect("rgba render");
    assert!(cache.is_empty());
}
