use crate::core::error::{PlotError, PlotResult};
use crate::core::filter::FilterOptions;
use crate::core::model::{AccumulateRecord, QScoreBin};
use crate::core::plot::PlotPoint;

const MILLION: f64 = 1e6;
// Past this many millions the axis switches to billions.
const BILLION_THRESHOLD: f64 = 10_000.0;

/// Sums the counts of every record kept by `options` whose cycle lies in
/// `first_cycle..=last_cycle`. The histogram is sized from the first record
/// and left untouched when there are no records.
pub fn populate_distribution<R: AccumulateRecord>(
    records: &[R],
    options: &FilterOptions,
    first_cycle: u32,
    last_cycle: u32,
    histogram: &mut Vec<f64>,
) {
    let Some(first) = records.first() else {
        return;
    };
    histogram.resize(first.size(), 0.0);
    for record in records {
        if !options.valid_tile(record) || record.cycle() < first_cycle || record.cycle() > last_cycle
        {
            continue;
        }
        record.accumulate_into(histogram);
    }
}

/// Rescales the histogram in place and returns the unit of the result.
pub fn scale_histogram(histogram: &mut [f64]) -> &'static str {
    let mut max_height = 0.0f64;
    for v in histogram.iter_mut() {
        *v /= MILLION;
        max_height = max_height.max(*v);
    }
    if max_height < BILLION_THRESHOLD {
        return "million";
    }
    for v in histogram.iter_mut() {
        *v /= 1000.0;
    }
    "billion"
}

/// Plots one bar per nonzero Q-score. Returns the max x extent, 0 when no
/// bar was emitted.
pub fn plot_unbinned_histogram<P: PlotPoint>(histogram: &[f64], points: &mut Vec<P>) -> f64 {
    points.clear();
    points.reserve(histogram.len());
    for (i, &height) in histogram.iter().enumerate() {
        if height == 0.0 {
            continue;
        }
        // Q-scores are 1-based; Q0 never shows up on the axis.
        points.push(P::new((i + 1) as f64, height, None));
    }
    points.shrink_to_fit();
    match points.last() {
        Some(p) => p.x() + 1.0,
        None => 0.0,
    }
}

/// How a bin table addresses histogram slots.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BinLayout {
    /// Bin `i` describes histogram slot `i`.
    Compressed,
    /// Bin `b` describes histogram slot `b.value - 1`.
    Legacy,
}

impl BinLayout {
    pub fn detect(bins: &[QScoreBin], histogram_len: usize) -> Self {
        if bins.len() == histogram_len {
            BinLayout::Compressed
        } else {
            BinLayout::Legacy
        }
    }
}

/// Plots one bar per bin whose histogram slot is nonzero. Each bar spans the
/// bin's inclusive Q-score range. A legacy bin whose slot lies outside the
/// histogram is an inconsistent bin/histogram pairing and fails the call
/// without touching `points`.
pub fn plot_binned_histogram<P: PlotPoint>(
    bins: &[QScoreBin],
    histogram: &[f64],
    points: &mut Vec<P>,
) -> PlotResult<f64> {
    let layout = BinLayout::detect(bins, histogram.len());
    log::debug!(
        "binned projection: layout={:?} bins={} slots={}",
        layout,
        bins.len(),
        histogram.len()
    );
    let mut out = Vec::with_capacity(bins.len());
    let mut max_x = 0.0f64;
    for (i, bin) in bins.iter().enumerate() {
        let slot = match layout {
            BinLayout::Compressed => i,
            BinLayout::Legacy => legacy_slot(bin, histogram.len())?,
        };
        let height = histogram[slot];
        if height == 0.0 {
            continue;
        }
        let point = P::new(bin.lower as f64, height, Some(bin.width() as f64));
        max_x = max_x.max(point.x() + point.width());
        out.push(point);
    }
    out.shrink_to_fit();
    *points = out;
    Ok(max_x)
}

fn legacy_slot(bin: &QScoreBin, len: usize) -> PlotResult<usize> {
    let index = bin.value as i64 - 1;
    if index < 0 || index as usize >= len {
        return Err(PlotError::BinOutOfBounds { index, len });
    }
    Ok(index as usize)
}
