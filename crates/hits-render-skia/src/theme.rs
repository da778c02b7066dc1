// File: crates/hits-render-skia/src/theme.rs
// Summary: Light/Dark theming for bar colors, grid, and the hover band.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    /// Color of the synthetic "other" series.
    pub other: skia::Color,
    /// Cycled over the kept series in row order.
    pub palette: [skia::Color; 8],
    /// Painted source-atop over bars under the pointer.
    pub hover_band: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            other: skia::Color::from_argb(255, 110, 110, 120),
            palette: [
                skia::Color::from_argb(255, 64, 160, 255),
                skia::Color::from_argb(255, 40, 200, 120),
                skia::Color::from_argb(255, 255, 170, 50),
                skia::Color::from_argb(255, 220, 80, 80),
                skia::Color::from_argb(255, 170, 110, 240),
                skia::Color::from_argb(255, 60, 200, 210),
                skia::Color::from_argb(255, 240, 120, 200),
                skia::Color::from_argb(255, 190, 200, 70),
            ],
            hover_band: skia::Color::from_argb(153, 255, 255, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            other: skia::Color::from_argb(255, 170, 170, 178),
            palette: [
                skia::Color::from_argb(255, 32, 120, 200),
                skia::Color::from_argb(255, 20, 160, 90),
                skia::Color::from_argb(255, 230, 140, 20),
                skia::Color::from_argb(255, 200, 60, 60),
                skia::Color::from_argb(255, 130, 80, 200),
                skia::Color::from_argb(255, 20, 150, 160),
                skia::Color::from_argb(255, 200, 80, 160),
                skia::Color::from_argb(255, 140, 150, 30),
            ],
            hover_band: skia::Color::from_argb(153, 255, 255, 255),
        }
    }

    /// Bar color of the `kept_rank`-th non-other series, or the "other" color.
    pub fn series_color(&self, kept_rank: usize, is_other: bool) -> skia::Color {
        if is_other { self.other } else { self.palette[kept_rank % self.palette.len()] }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::dark)
}
