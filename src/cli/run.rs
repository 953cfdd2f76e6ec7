use crate::cli::args::{Cli, Commands, HistogramArgs};
use anyhow::{Context, Result, bail};
use clap::Parser;
use kira_qscore::core::dump;
use kira_qscore::core::filter::FilterOptions;
use kira_qscore::core::plot::{BarPoint, PlotData, plot_qscore_histogram};
use kira_qscore::report;
use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Histogram(args) => histogram(args),
    }
}

fn histogram(args: HistogramArgs) -> Result<()> {
    let t0 = Instant::now();

    stage("preflight", || {
        if args.metrics.as_os_str() == "-" {
            bail!("stdin is not supported; provide a metric dump path");
        }
        if !args.metrics.is_file() {
            bail!("input file not found: {}", args.metrics.display());
        }
        Ok(())
    })?;

    let t_load = Instant::now();
    let mut metrics = dump::load(&args.metrics)?;
    stage_done("load", t_load);

    let options = FilterOptions {
        lane: args.lane,
        tile: args.tile,
        surface: args.surface,
        read: args.read,
        cycle: args.cycle,
    };

    let t_plot = Instant::now();
    let mut data: PlotData<BarPoint> = PlotData::new();
    plot_qscore_histogram(&mut metrics, &options, &mut data)
        .with_context(|| format!("failed to plot {}", args.metrics.display()))?;
    stage_done("plot", t_plot);
    log::info!(
        target: "stats",
        "points={} tile_records={} lane_records={}",
        data.point_count(),
        metrics.q_metrics.len(),
        metrics.q_by_lane.len()
    );

    let t_report = Instant::now();
    let stdout = io::stdout();
    let mut w = BufWriter::new(stdout.lock());
    report::plot_txt::write(&mut w, &data).with_context(|| "failed to write plot data")?;
    w.flush().with_context(|| "failed to flush stdout")?;
    stage_done("report", t_report);

    log::info!(target: "stats", "total={}", fmt_dur(t0.elapsed()));
    Ok(())
}

fn stage<F>(name: &str, f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let t = Instant::now();
    let res = f();
    stage_done(name, t);
    res
}

fn stage_done(name: &str, t: Instant) {
    log::info!(target: "stats", "stage={} time={}", name, fmt_dur(t.elapsed()));
}

fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}
