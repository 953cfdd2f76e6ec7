use crate::core::plot::{PlotData, PlotPoint};

/// Picks the vertical range of a finished plot.
pub trait AxisScaler<P> {
    fn auto_scale_y(&self, data: &mut PlotData<P>);
}

/// Pads the observed y extent of every point in every series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoScaleY {
    pub zero_min: bool,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for AutoScaleY {
    fn default() -> Self {
        Self {
            zero_min: true,
            min_scale: 0.9,
            max_scale: 1.1,
        }
    }
}

impl AutoScaleY {
    pub fn new(zero_min: bool) -> Self {
        Self {
            zero_min,
            ..Self::default()
        }
    }
}

impl<P: PlotPoint> AxisScaler<P> for AutoScaleY {
    fn auto_scale_y(&self, data: &mut PlotData<P>) {
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in data.series.iter().flat_map(|s| s.points.iter()) {
            min_y = min_y.min(p.y());
            max_y = max_y.max(p.y());
        }
        if !min_y.is_finite() || !max_y.is_finite() {
            return;
        }
        let lo = if self.zero_min {
            0.0
        } else {
            min_y * self.min_scale
        };
        data.set_yrange(lo, max_y * self.max_scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::plot::{AxisRange, BarPoint, Series, SeriesKind};

    fn data(heights: &[f64]) -> PlotData<BarPoint> {
        let mut data = PlotData::new();
        let mut series = Series::new("Q Score", SeriesKind::Bar);
        series.points = heights
            .iter()
            .enumerate()
            .map(|(i, &h)| BarPoint::new(i as f64 + 1.0, h, None))
            .collect();
        data.series.push(series);
        data
    }

    #[test]
    fn pads_min_and_max() {
        let mut d = data(&[10.0, 20.0]);
        AutoScaleY::new(false).auto_scale_y(&mut d);
        let r = d.y_range.unwrap();
        assert!((r.min - 9.0).abs() < 1e-9);
        assert!((r.max - 22.0).abs() < 1e-9);
    }

    #[test]
    fn zero_min_pins_bottom() {
        let mut d = data(&[10.0, 20.0]);
        AutoScaleY::new(true).auto_scale_y(&mut d);
        assert_eq!(d.y_range.map(|r| r.min), Some(0.0));
    }

    #[test]
    fn no_points_leaves_range_unset() {
        let mut d = data(&[]);
        d.y_range = Some(AxisRange { min: 1.0, max: 2.0 });
        AutoScaleY::new(false).auto_scale_y(&mut d);
        assert_eq!(d.y_range, Some(AxisRange { min: 1.0, max: 2.0 }));
    }
}
