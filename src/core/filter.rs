use crate::core::model::TileAddress;

/// Selection applied to metric records before plotting. `None` means every
/// id is kept.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterOptions {
    pub lane: Option<u32>,
    pub tile: Option<u32>,
    pub surface: Option<u32>,
    pub read: Option<u32>,
    pub cycle: Option<u32>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps records matching lane, surface and tile. A record without a tile
    /// or surface (lane aggregates) passes those checks.
    pub fn valid_tile<R: TileAddress + ?Sized>(&self, record: &R) -> bool {
        if let Some(lane) = self.lane {
            if record.lane() != lane {
                return false;
            }
        }
        if let (Some(want), Some(got)) = (self.surface, record.surface()) {
            if want != got {
                return false;
            }
        }
        if let (Some(want), Some(got)) = (self.tile, record.tile()) {
            if want != got {
                return false;
            }
        }
        true
    }

    pub fn all_reads(&self) -> bool {
        self.read.is_none()
    }

    pub fn all_cycles(&self) -> bool {
        self.cycle.is_none()
    }

    /// Selected read number, 0 when every read is kept.
    pub fn read(&self) -> u32 {
        self.read.unwrap_or(0)
    }

    /// Last cycle to keep, 0 when every cycle is kept.
    pub fn cycle(&self) -> u32 {
        self.cycle.unwrap_or(0)
    }

    pub fn is_specific_read(&self) -> bool {
        self.read.is_some()
    }

    pub fn is_specific_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn lane_description(&self) -> String {
        match self.lane {
            Some(lane) => format!("Lane {}", lane),
            None => "All Lanes".to_string(),
        }
    }

    pub fn read_description(&self) -> String {
        match self.read {
            Some(read) => format!("Read {}", read),
            None => "All Reads".to_string(),
        }
    }

    pub fn surface_description(&self) -> String {
        match self.surface {
            Some(1) => "Top".to_string(),
            Some(2) => "Bottom".to_string(),
            Some(s) => format!("Surface {}", s),
            None => "All Surfaces".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{QByLaneMetric, QMetric};

    fn tile(lane: u32, tile: u32, surface: u32) -> QMetric {
        QMetric {
            lane,
            tile,
            surface,
            cycle: 1,
            counts: vec![],
        }
    }

    #[test]
    fn default_keeps_everything() {
        let opts = FilterOptions::new();
        assert!(opts.valid_tile(&tile(3, 2105, 2)));
        assert!(opts.all_reads());
        assert!(opts.all_cycles());
        assert!(!opts.is_specific_surface());
    }

    #[test]
    fn lane_surface_and_tile_must_match() {
        let opts = FilterOptions {
            lane: Some(1),
            surface: Some(2),
            tile: Some(2101),
            ..FilterOptions::default()
        };
        assert!(opts.valid_tile(&tile(1, 2101, 2)));
        assert!(!opts.valid_tile(&tile(2, 2101, 2)));
        assert!(!opts.valid_tile(&tile(1, 1101, 1)));
        assert!(!opts.valid_tile(&tile(1, 2102, 2)));
    }

    #[test]
    fn lane_aggregates_ignore_tile_and_surface() {
        let opts = FilterOptions {
            lane: Some(4),
            tile: Some(1101),
            ..FilterOptions::default()
        };
        let rec = QByLaneMetric {
            lane: 4,
            cycle: 1,
            counts: vec![],
        };
        assert!(opts.valid_tile(&rec));
    }

    #[test]
    fn read_and_cycle_selection() {
        let opts = FilterOptions {
            read: Some(2),
            cycle: Some(40),
            ..FilterOptions::default()
        };
        assert!(!opts.all_reads());
        assert!(!opts.all_cycles());
        assert_eq!(opts.read(), 2);
        assert_eq!(opts.cycle(), 40);
        let all = FilterOptions::new();
        assert_eq!((all.read(), all.cycle()), (0, 0));
    }

    #[test]
    fn descriptions() {
        let opts = FilterOptions {
            lane: Some(2),
            read: Some(1),
            surface: Some(2),
            ..FilterOptions::default()
        };
        assert_eq!(opts.lane_description(), "Lane 2");
        assert_eq!(opts.read_description(), "Read 1");
        assert_eq!(opts.surface_description(), "Bottom");
        assert_eq!(FilterOptions::new().lane_description(), "All Lanes");
    }
}
