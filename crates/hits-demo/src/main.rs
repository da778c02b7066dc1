// File: crates/hits-demo/src/main.rs
// Summary: Demo loads a hits (or stats) response JSON, aggregates it, and renders the bar chart to PNG.

use anyhow::{Context, Result};
use clap::Parser;
use hits_core::{BarLayoutCache, ChartConfig, ChartState, FrameStatus};
use hits_render_skia::{theme, BarChart, RenderOptions};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hits-demo")]
#[command(about = "Render a log hits response as a bar chart PNG")]
struct Cli {
    /// Response body to render (hits or stats JSON)
    #[arg(default_value = "crates/hits-demo/data/hits.json")]
    input: PathBuf,

    /// Chart parameter as key=value (top_hits, bars_count, group_hits, graph_mode, cumulative, stacked, hide_chart)
    #[arg(long = "param", short = 'p')]
    params: Vec<String>,

    /// Output PNG; defaults to the input path with a .png extension
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Visible index window as start:end (end exclusive)
    #[arg(long)]
    window: Option<String>,

    /// Pointer x positions (CSS px) to hit-test after rendering
    #[arg(long = "probe")]
    probes: Vec<f32>,

    #[arg(long, default_value = "dark")]
    theme: String,

    #[arg(long, default_value_t = 1.0)]
    dpr: f32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = parse_config(&cli.params)?;
    let body = std::fs::read(&cli.input)
        .with_context(|| format!("failed to read '{}'", cli.input.display()))?;
    println!("Using input file: {}", cli.input.display());

    let mut state = ChartState::new(config);
    let ticket = state.begin_request();
    state.complete(ticket, &body);
    if let Some(err) = state.error() {
        anyhow::bail!("{err}");
    }

    let status = state.status();
    if status != FrameStatus::Ready {
        println!("{}", status.message().unwrap_or("nothing to draw"));
        return Ok(());
    }

    let frame = state.frame();
    let config = state.config();
    println!(
        "Aligned {} {} series over {} timestamps",
        frame.series_count(),
        config.query_mode.as_str(),
        frame.matrix.len()
    );
    if let (Some(first), Some(last)) = (frame.matrix.axis.first(), frame.matrix.axis.last()) {
        let step = config.bucket_step(*first, *last);
        println!("Refetch step for {} bars: {}s", config.bars_count, step.num_milliseconds() as f64 / 1000.0);
    }
    for entry in &frame.legend {
        println!("  {:<40} total {}", entry.label, entry.total);
    }

    let opts = RenderOptions {
        dpr: cli.dpr,
        theme: theme::find(&cli.theme),
        stacked: config.stacked,
        window: cli.window.as_deref().map(parse_window).transpose()?,
        pointer_x: cli.probes.first().copied(),
        ..RenderOptions::default()
    };

    let chart = BarChart::new(&frame);
    let mut cache = BarLayoutCache::new();
    let out = cli.out.unwrap_or_else(|| cli.input.with_extension("png"));
    chart.render_to_png(&opts, &mut cache, &out)?;
    println!("Wrote {}", out.display());

    for x in &cli.probes {
        match chart.hover(&opts, &cache, *x) {
            Some(hit) => {
                let label = frame.legend.get(hit.series_index - 1).map_or("", |l| l.label.as_str());
                let ts = frame.matrix.axis[hit.absolute_data_index];
                let value = frame.matrix.rows[hit.series_index - 1][hit.absolute_data_index];
                println!("x={x}: {label} @ {ts} = {value:?}");
            }
            None => println!("x={x}: no bar"),
        }
    }
    info!("rendered {} bars", cache.len());
    Ok(())
}

fn parse_config(params: &[String]) -> Result<ChartConfig> {
    let pairs = params
        .iter()
        .map(|p| p.split_once('=').with_context(|| format!("expected key=value, got '{p}'")))
        .collect::<Result<Vec<_>>>()?;
    Ok(ChartConfig::from_params(pairs)?)
}

fn parse_window(s: &str) -> Result<(usize, usize)> {
    let (a, b) = s.split_once(':').with_context(|| format!("expected start:end, got '{s}'"))?;
    Ok((a.trim().parse()?, b.trim().parse()?))
}
