use crate::core::aggregate::{LaneAggregator, SumByLane};
use crate::core::error::PlotResult;
use crate::core::filter::FilterOptions;
use crate::core::model::{AccumulateRecord, MetricSet, RunInfo, RunMetrics};
use crate::core::plot::histogram::{
    plot_binned_histogram, plot_unbinned_histogram, populate_distribution, scale_histogram,
};
use crate::core::plot::scale::{AutoScaleY, AxisScaler};
use crate::core::plot::{PlotData, PlotPoint, Series, SeriesKind, SeriesOption};

const SERIES_TITLE: &str = "Q Score";
const X_LABEL: &str = "Q Score";
const X_PADDING: f64 = 1.1;

/// Plots the Q-score histogram with the default collaborators: tiles are
/// summed per lane when no lane metrics were loaded, and the y axis is fit to
/// the bars.
pub fn plot_qscore_histogram<P: PlotPoint>(
    metrics: &mut RunMetrics,
    options: &FilterOptions,
    data: &mut PlotData<P>,
) -> PlotResult<()> {
    plot_qscore_histogram_with(metrics, options, &SumByLane, &AutoScaleY::new(false), data)
}

/// Plots the Q-score histogram of the records selected by `options`.
///
/// With a specific surface the per-tile records are plotted, otherwise the
/// lane aggregates (derived through `aggregator` and cached in `metrics` when
/// absent). If the chosen source has no records, `data` is left holding the
/// one empty series with no title, labels or ranges.
pub fn plot_qscore_histogram_with<P, A, S>(
    metrics: &mut RunMetrics,
    options: &FilterOptions,
    aggregator: &A,
    scaler: &S,
    data: &mut PlotData<P>,
) -> PlotResult<()>
where
    P: PlotPoint,
    A: LaneAggregator + ?Sized,
    S: AxisScaler<P> + ?Sized,
{
    data.clear();
    let first_cycle = if options.all_reads() {
        1
    } else {
        metrics.run_info.read(options.read())?.first_cycle
    };

    let mut series = Series::new(SERIES_TITLE, SeriesKind::Bar);
    series.add_option(SeriesOption::Shifted);
    data.series.push(series);

    let mut points = Vec::new();
    let (unit, max_x) = if options.is_specific_surface() {
        if metrics.q_metrics.is_empty() {
            log::debug!("q-score histogram: no tile metrics");
            return Ok(());
        }
        log::debug!("q-score histogram: plotting tile metrics");
        histogram_points(
            &metrics.q_metrics,
            &metrics.run_info,
            options,
            first_cycle,
            &mut points,
        )?
    } else {
        if metrics.q_by_lane.is_empty() {
            log::debug!(
                "q-score histogram: deriving lane metrics from {} tile records",
                metrics.q_metrics.len()
            );
            metrics.q_by_lane = aggregator.aggregate(&metrics.q_metrics);
        }
        if metrics.q_by_lane.is_empty() {
            log::debug!("q-score histogram: no lane metrics");
            return Ok(());
        }
        log::debug!("q-score histogram: plotting lane metrics");
        histogram_points(
            &metrics.q_by_lane,
            &metrics.run_info,
            options,
            first_cycle,
            &mut points,
        )?
    };
    if let Some(series) = data.series.first_mut() {
        series.points = points;
    }

    scaler.auto_scale_y(data);
    if max_x > 0.0 {
        data.set_xrange(1.0, max_x * X_PADDING);
    } else {
        data.set_xrange(1.0, 2.0);
    }
    data.x_label = X_LABEL.to_string();
    data.y_label = format!("Total ({})", unit);
    data.title = compose_title(&metrics.run_info, options);
    Ok(())
}

/// Last cycle kept by `options`: the selected read's last cycle, or
/// `max_cycle` for all reads, clamped down to a specific cycle.
pub fn last_filtered_cycle(
    run_info: &RunInfo,
    options: &FilterOptions,
    max_cycle: u32,
) -> PlotResult<u32> {
    let mut last_cycle = if options.all_reads() {
        max_cycle
    } else {
        run_info.read(options.read())?.last_cycle
    };
    if !options.all_cycles() {
        last_cycle = last_cycle.min(options.cycle());
    }
    Ok(last_cycle)
}

fn histogram_points<R, P>(
    set: &MetricSet<R>,
    run_info: &RunInfo,
    options: &FilterOptions,
    first_cycle: u32,
    points: &mut Vec<P>,
) -> PlotResult<(&'static str, f64)>
where
    R: AccumulateRecord,
    P: PlotPoint,
{
    let last_cycle = last_filtered_cycle(run_info, options, set.max_cycle())?;
    log::debug!(
        "q-score histogram: cycles {}..={} over {} records",
        first_cycle,
        last_cycle,
        set.len()
    );
    let mut histogram = Vec::new();
    populate_distribution(set.records(), options, first_cycle, last_cycle, &mut histogram);
    let unit = scale_histogram(&mut histogram);
    let max_x = if set.bins().is_empty() {
        plot_unbinned_histogram(&histogram, points)
    } else {
        plot_binned_histogram(set.bins(), &histogram, points)?
    };
    Ok((unit, max_x))
}

fn compose_title(run_info: &RunInfo, options: &FilterOptions) -> String {
    let mut title = run_info.flowcell.barcode.clone();
    if !title.is_empty() {
        title.push(' ');
    }
    title.push_str(&options.lane_description());
    if options.is_specific_read() {
        title.push(' ');
        title.push_str(&options.read_description());
    }
    if run_info.flowcell.surface_count > 1 && options.is_specific_surface() {
        title.push(' ');
        title.push_str(&options.surface_description());
    }
    title
}
