use crate::core::error::{PlotError, PlotResult};

/// Where a record was collected on the flowcell. Lane aggregates carry
/// neither tile nor surface.
pub trait TileAddress {
    fn lane(&self) -> u32;
    fn tile(&self) -> Option<u32>;
    fn surface(&self) -> Option<u32>;
}

/// A per-cycle Q-score record that can be summed into a flat histogram.
pub trait AccumulateRecord: TileAddress {
    fn cycle(&self) -> u32;
    fn size(&self) -> usize;
    /// Adds the record's counts elementwise into `histogram`. Slots past the
    /// shorter of the two lengths are left untouched.
    fn accumulate_into(&self, histogram: &mut [f64]);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QScoreBin {
    pub lower: u32,
    pub upper: u32,
    pub value: u32,
}

impl QScoreBin {
    pub fn new(lower: u32, upper: u32, value: u32) -> Self {
        Self {
            lower,
            upper,
            value,
        }
    }

    pub fn width(&self) -> u32 {
        self.upper.saturating_sub(self.lower) + 1
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QMetric {
    pub lane: u32,
    pub tile: u32,
    pub surface: u32,
    pub cycle: u32,
    pub counts: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QByLaneMetric {
    pub lane: u32,
    pub cycle: u32,
    pub counts: Vec<u64>,
}

fn add_counts(counts: &[u64], histogram: &mut [f64]) {
    for (slot, &c) in histogram.iter_mut().zip(counts) {
        *slot += c as f64;
    }
}

impl TileAddress for QMetric {
    fn lane(&self) -> u32 {
        self.lane
    }

    fn tile(&self) -> Option<u32> {
        Some(self.tile)
    }

    fn surface(&self) -> Option<u32> {
        Some(self.surface)
    }
}

impl AccumulateRecord for QMetric {
    fn cycle(&self) -> u32 {
        self.cycle
    }

    fn size(&self) -> usize {
        self.counts.len()
    }

    fn accumulate_into(&self, histogram: &mut [f64]) {
        add_counts(&self.counts, histogram);
    }
}

impl TileAddress for QByLaneMetric {
    fn lane(&self) -> u32 {
        self.lane
    }

    fn tile(&self) -> Option<u32> {
        None
    }

    fn surface(&self) -> Option<u32> {
        None
    }
}

impl AccumulateRecord for QByLaneMetric {
    fn cycle(&self) -> u32 {
        self.cycle
    }

    fn size(&self) -> usize {
        self.counts.len()
    }

    fn accumulate_into(&self, histogram: &mut [f64]) {
        add_counts(&self.counts, histogram);
    }
}

/// Records of one metric type together with the Q-score bin table they were
/// written with. An empty bin table means the counts are unbinned.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricSet<T> {
    records: Vec<T>,
    bins: Vec<QScoreBin>,
}

impl<T> Default for MetricSet<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            bins: Vec::new(),
        }
    }
}

impl<T> MetricSet<T> {
    pub fn new(records: Vec<T>, bins: Vec<QScoreBin>) -> Self {
        Self { records, bins }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn bins(&self) -> &[QScoreBin] {
        &self.bins
    }

    pub fn set_bins(&mut self, bins: Vec<QScoreBin>) {
        self.bins = bins;
    }

    pub fn push(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: AccumulateRecord> MetricSet<T> {
    pub fn max_cycle(&self) -> u32 {
        self.records.iter().map(|r| r.cycle()).max().unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReadInfo {
    pub number: u32,
    pub first_cycle: u32,
    pub last_cycle: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Flowcell {
    pub barcode: String,
    pub surface_count: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunInfo {
    pub flowcell: Flowcell,
    pub reads: Vec<ReadInfo>,
}

impl RunInfo {
    /// Looks up a read by its 1-based read number.
    pub fn read(&self, number: u32) -> PlotResult<&ReadInfo> {
        self.reads
            .iter()
            .find(|r| r.number == number)
            .ok_or(PlotError::InvalidRead {
                read: number,
                count: self.reads.len(),
            })
    }
}

#[derive(Clone, Debug, Default)]
pub struct RunMetrics {
    pub run_info: RunInfo,
    pub q_metrics: MetricSet<QMetric>,
    pub q_by_lane: MetricSet<QByLaneMetric>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_adds_into_prefix() {
        let rec = QMetric {
            lane: 1,
            tile: 1101,
            surface: 1,
            cycle: 3,
            counts: vec![1, 2, 3],
        };
        let mut hist = vec![10.0, 10.0];
        rec.accumulate_into(&mut hist);
        assert_eq!(hist, vec![11.0, 12.0]);
        assert_eq!(rec.size(), 3);
    }

    #[test]
    fn read_lookup_by_number() {
        let info = RunInfo {
            flowcell: Flowcell::default(),
            reads: vec![
                ReadInfo {
                    number: 1,
                    first_cycle: 1,
                    last_cycle: 151,
                },
                ReadInfo {
                    number: 2,
                    first_cycle: 152,
                    last_cycle: 302,
                },
            ],
        };
        assert_eq!(info.read(2).map(|r| r.first_cycle).ok(), Some(152));
        assert!(matches!(
            info.read(3),
            Err(PlotError::InvalidRead { read: 3, count: 2 })
        ));
    }

    #[test]
    fn max_cycle_of_empty_set_is_zero() {
        let set: MetricSet<QByLaneMetric> = MetricSet::default();
        assert_eq!(set.max_cycle(), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn bin_width_is_inclusive() {
        assert_eq!(QScoreBin::new(11, 20, 15).width(), 10);
        assert_eq!(QScoreBin::new(5, 5, 5).width(), 1);
    }
}
