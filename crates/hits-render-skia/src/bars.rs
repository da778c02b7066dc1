// File: crates/hits-render-skia/src/bars.rs
// Summary: Bar chart paint pass over an aligned frame using Skia CPU raster surfaces.
// Notes:
// - Every paint pass re-records bar geometry into the caller's BarLayoutCache,
//   in ascending index order per series, before any hover lookup is served.
// - Renderer series index r + 1 draws matrix row r; index 0 is the time axis.

use anyhow::Result;
use log::debug;
use skia_safe as skia;

use hits_core::geometry::clamp;
use hits_core::{BarLayoutCache, ChartFrame, HoverHit, HoverHitTester, RectI32, SeriesVisibility, Viewport};

use crate::grid::{label_indices, linspace};
use crate::scale::{IndexScale, ValueScale};
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};

pub struct RenderOptions {
    /// Surface size in CSS pixels; the backing surface is `dpr` times larger.
    pub width: i32,
    pub height: i32,
    pub dpr: f32,
    pub insets: Insets,
    pub theme: Theme,
    /// Stack series on top of each other instead of overlaying them from 0.
    pub stacked: bool,
    /// Visible index window `[start, end)`; `None` shows the whole axis.
    pub window: Option<(usize, usize)>,
    /// Pointer x in CSS pixels (canvas coordinates) for the hover band.
    pub pointer_x: Option<f32>,
    /// Device pixels left between neighbouring bars.
    pub bar_gap: f32,
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            dpr: 1.0,
            insets: Insets::default(),
            theme: Theme::dark(),
            stacked: false,
            window: None,
            pointer_x: None,
            bar_gap: 1.0,
            draw_labels: true,
        }
    }
}

impl RenderOptions {
    /// Backing surface size in device pixels.
    pub fn device_size(&self) -> (i32, i32) {
        let dpr = self.dpr.max(0.1);
        (
            ((self.width.max(1) as f32) * dpr).round() as i32,
            ((self.height.max(1) as f32) * dpr).round() as i32,
        )
    }

    pub fn plot_rect(&self) -> RectI32 {
        let (w, h) = self.device_size();
        self.insets.plot_rect(w, h, self.dpr.max(0.1))
    }

    /// Plot extent in device pixels, as the hit-tester expects it.
    pub fn viewport(&self) -> Viewport {
        Viewport::from(self.plot_rect())
    }
}

/// Renders one frame's rows as bars.
pub struct BarChart<'a> {
    pub frame: &'a ChartFrame,
    /// Renderer series list in draw order (axis at 0).
    pub visible: Vec<SeriesVisibility>,
}

impl<'a> BarChart<'a> {
    pub fn new(frame: &'a ChartFrame) -> Self {
        Self { frame, visible: frame.visibility() }
    }

    pub fn with_visibility(mut self, visible: Vec<SeriesVisibility>) -> Self {
        self.visible = visible;
        self
    }

    fn is_shown(&self, series: usize) -> bool {
        self.visible.iter().any(|v| v.index == series && v.shown)
    }

    /// Index window actually painted, clamped to the axis.
    pub fn window(&self, opts: &RenderOptions) -> (usize, usize) {
        let n = self.frame.matrix.len();
        match opts.window {
            Some((start, end)) if start.min(n) < end.min(n) => (start.min(n), end.min(n)),
            _ => (0, n),
        }
    }

    /// Bar under `pointer_x` according to the geometry of the last paint pass.
    pub fn hover(&self, opts: &RenderOptions, cache: &BarLayoutCache, pointer_x: f32) -> Option<HoverHit> {
        HoverHitTester::new(cache).locate(pointer_x as f64, opts.dpr as f64, opts.viewport(), &self.visible)
    }

    /// Render to PNG bytes.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions, cache: &mut BarLayoutCache) -> Result<Vec<u8>> {
        let mut surface = self.paint_surface(opts, cache)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a PNG file at `output_png_path`.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        cache: &mut BarLayoutCache,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts, cache)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// Render to an unpremultiplied RGBA8 buffer: `(pixels, width, height, row_bytes)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions, cache: &mut BarLayoutCache) -> Result<(Vec<u8>, i32, i32, usize)> {
        let mut surface = self.paint_surface(opts, cache)?;
        let (w, h) = opts.device_size();
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            anyhow::bail!("reading back {w}x{h} pixels failed");
        }
        Ok((pixels, w, h, row_bytes))
    }

    fn paint_surface(&self, opts: &RenderOptions, cache: &mut BarLayoutCache) -> Result<skia::Surface> {
        let (w, h) = opts.device_size();
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;
        self.paint(surface.canvas(), opts, cache);
        Ok(surface)
    }

    /// One paint pass: grid, bars (recording geometry), hover band, labels.
    pub fn paint(&self, canvas: &skia::Canvas, opts: &RenderOptions, cache: &mut BarLayoutCache) {
        let theme = &opts.theme;
        let plot = opts.plot_rect();
        canvas.clear(theme.background);
        draw_grid(canvas, &plot, theme);

        let (start, end) = self.window(opts);
        if start >= end {
            cache.clear();
        } else {
            self.draw_bars(canvas, opts, &plot, cache, start, end);
            if let Some(px) = opts.pointer_x {
                self.draw_hover_band(canvas, opts, &plot, cache, px);
            }
        }

        draw_axes(canvas, &plot, theme);
        if opts.draw_labels {
            self.draw_labels(canvas, opts, &plot, start, end);
        }
    }

    fn draw_bars(
        &self,
        canvas: &skia::Canvas,
        opts: &RenderOptions,
        plot: &RectI32,
        cache: &mut BarLayoutCache,
        start: usize,
        end: usize,
    ) {
        let rows = &self.frame.matrix.rows;
        let xs = IndexScale::for_window(plot.left as f32, plot.width() as f32, start, end);
        let ymax = self.visible_max(opts.stacked, start, end);
        let ys = ValueScale::new(plot.top as f32, plot.bottom as f32, 0.0, ymax * 1.05);
        let (plot_l, plot_r) = (plot.left as f32, plot.right as f32);

        let mut stack = vec![0.0f64; end - start];
        let mut kept_rank = 0usize;
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(false);
        paint.set_style(skia::paint::Style::Fill);

        for (r, row) in rows.iter().enumerate() {
            let series = r + 1;
            let is_other = self.frame.legend.get(r).is_some_and(|l| l.is_other);
            let color = opts.theme.series_color(kept_rank, is_other);
            if !is_other {
                kept_rank += 1;
            }
            if !self.is_shown(series) {
                cache.remove(series);
                continue;
            }
            paint.set_color(color);
            cache.begin_pass(series, start, end);

            for i in start..end {
                let Some(v) = row.get(i).copied().flatten().filter(|v| v.is_finite()) else {
                    continue;
                };
                let j = i - start;
                let base = if opts.stacked { stack[j] } else { 0.0 };
                let top = base + v;
                if opts.stacked {
                    stack[j] = top;
                }

                let (left, width) = xs.bar(i, opts.bar_gap);
                let l = clamp(left, plot_l, plot_r);
                let rr = clamp(left + width, plot_l, plot_r);
                if !(rr > l) {
                    cache.record_bar(series, i, f64::NAN, f64::NAN);
                    continue;
                }
                let (y0, y1) = (ys.to_px(base), ys.to_px(top));
                canvas.draw_rect(skia::Rect::from_ltrb(l, y0.min(y1), rr, y0.max(y1)), &paint);
                cache.record_bar(series, i, l as f64, (rr - l) as f64);
            }
        }
    }

    /// Largest bar top within the window, at least 1.
    fn visible_max(&self, stacked: bool, start: usize, end: usize) -> f64 {
        let shown_rows = self
            .frame
            .matrix
            .rows
            .iter()
            .enumerate()
            .filter(|(r, _)| self.is_shown(r + 1))
            .map(|(_, row)| row);

        let mut max = 0.0f64;
        if stacked {
            let mut sums = vec![0.0f64; end - start];
            for row in shown_rows {
                for (j, v) in row[start..end].iter().enumerate() {
                    if let Some(v) = v.filter(|v| v.is_finite()) {
                        sums[j] += v;
                        max = max.max(sums[j]);
                    }
                }
            }
        } else {
            for row in shown_rows {
                for v in row[start..end].iter().flatten().filter(|v| v.is_finite()) {
                    max = max.max(*v);
                }
            }
        }
        if max > 0.0 { max } else { 1.0 }
    }

    fn draw_hover_band(
        &self,
        canvas: &skia::Canvas,
        opts: &RenderOptions,
        plot: &RectI32,
        cache: &BarLayoutCache,
        pointer_x: f32,
    ) {
        let tester = HoverHitTester::new(cache);
        let Some(hit) = tester.locate(pointer_x as f64, opts.dpr as f64, opts.viewport(), &self.visible) else {
            return;
        };
        let Some((left, right)) = tester.highlight_span(hit, &self.visible) else {
            return;
        };
        debug!("hover series {} index {}", hit.series_index, hit.absolute_data_index);

        let mut band = skia::Paint::default();
        band.set_color(opts.theme.hover_band);
        band.set_blend_mode(skia::BlendMode::SrcATop);
        canvas.save();
        canvas.draw_rect(
            skia::Rect::from_ltrb(left as f32, plot.top as f32, right as f32, plot.bottom as f32),
            &band,
        );
        canvas.restore();
    }

    fn draw_labels(&self, canvas: &skia::Canvas, opts: &RenderOptions, plot: &RectI32, start: usize, end: usize) {
        let mut text = skia::Paint::default();
        text.set_color(opts.theme.axis_label);
        let mut font = skia::Font::default();
        font.set_size(11.0 * opts.dpr);

        let axis = &self.frame.matrix.axis;
        if start < end {
            let xs = IndexScale::for_window(plot.left as f32, plot.width() as f32, start, end);
            for i in label_indices(start, end, 6) {
                let label = axis[i].format("%H:%M").to_string();
                canvas.draw_str(&label, (xs.to_px(i as f64), plot.bottom as f32 + 16.0 * opts.dpr), &font, &text);
            }
        }

        let mut x = plot.left as f32;
        let y = plot.top as f32 - 10.0 * opts.dpr;
        for entry in &self.frame.legend {
            let label = if entry.label.is_empty() { "value" } else { entry.label.as_str() };
            canvas.draw_str(label, (x, y), &font, &text);
            x += (label.chars().count() as f32 * 6.5 + 18.0) * opts.dpr;
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, plot: &RectI32, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    let (l, t, r, b) = (plot.left as f64, plot.top as f64, plot.right as f64, plot.bottom as f64);
    // horizontals only; bar slots already read as columns
    for y in linspace(t, b, 5) {
        canvas.draw_line((l as f32, y as f32), (r as f32, y as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, plot: &RectI32, theme: &Theme) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.0);

    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);
    canvas.draw_line((l, b), (r, b), &axis_paint);
    canvas.draw_line((l, t), (l, b), &axis_paint);
}
