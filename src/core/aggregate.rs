use crate::core::model::{MetricSet, QByLaneMetric, QMetric};
use std::collections::BTreeMap;

/// Derives lane-level Q-score records from per-tile records.
pub trait LaneAggregator {
    fn aggregate(&self, tiles: &MetricSet<QMetric>) -> MetricSet<QByLaneMetric>;
}

/// Sums every tile of a lane into one record per cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct SumByLane;

impl LaneAggregator for SumByLane {
    fn aggregate(&self, tiles: &MetricSet<QMetric>) -> MetricSet<QByLaneMetric> {
        let mut by_key: BTreeMap<(u32, u32), Vec<u64>> = BTreeMap::new();
        for rec in tiles.records() {
            let counts = by_key.entry((rec.lane, rec.cycle)).or_default();
            if counts.len() < rec.counts.len() {
                counts.resize(rec.counts.len(), 0);
            }
            for (acc, &c) in counts.iter_mut().zip(&rec.counts) {
                *acc = acc.saturating_add(c);
            }
        }
        let records = by_key
            .into_iter()
            .map(|((lane, cycle), counts)| QByLaneMetric {
                lane,
                cycle,
                counts,
            })
            .collect();
        MetricSet::new(records, tiles.bins().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::QScoreBin;

    fn tile(lane: u32, tile: u32, cycle: u32, counts: &[u64]) -> QMetric {
        QMetric {
            lane,
            tile,
            surface: tile / 1000,
            cycle,
            counts: counts.to_vec(),
        }
    }

    #[test]
    fn sums_tiles_per_lane_and_cycle() {
        let tiles = MetricSet::new(
            vec![
                tile(2, 1101, 1, &[1, 2]),
                tile(1, 1101, 1, &[5, 5]),
                tile(1, 2101, 1, &[1, 1]),
                tile(1, 1101, 2, &[7, 0]),
            ],
            vec![QScoreBin::new(1, 14, 10), QScoreBin::new(15, 40, 30)],
        );
        let lanes = SumByLane.aggregate(&tiles);
        assert_eq!(lanes.bins(), tiles.bins());
        let got: Vec<(u32, u32, Vec<u64>)> = lanes
            .records()
            .iter()
            .map(|r| (r.lane, r.cycle, r.counts.clone()))
            .collect();
        assert_eq!(
            got,
            vec![
                (1, 1, vec![6, 6]),
                (1, 2, vec![7, 0]),
                (2, 1, vec![1, 2]),
            ]
        );
    }

    #[test]
    fn empty_tiles_give_empty_lanes() {
        let lanes = SumByLane.aggregate(&MetricSet::default());
        assert!(lanes.is_empty());
    }
}
