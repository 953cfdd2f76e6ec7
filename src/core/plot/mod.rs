pub mod histogram;
pub mod qscore;
pub mod scale;

pub use histogram::{
    BinLayout, plot_binned_histogram, plot_unbinned_histogram, populate_distribution,
    scale_histogram,
};
pub use qscore::{plot_qscore_histogram, plot_qscore_histogram_with};
pub use scale::{AutoScaleY, AxisScaler};

/// Something a series can hold: an x position, a height and a bar width.
pub trait PlotPoint {
    fn new(x: f64, y: f64, width: Option<f64>) -> Self;
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn width(&self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarPoint {
    x: f64,
    y: f64,
    width: f64,
}

impl PlotPoint for BarPoint {
    fn new(x: f64, y: f64, width: Option<f64>) -> Self {
        Self {
            x,
            y,
            width: width.unwrap_or(1.0),
        }
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn width(&self) -> f64 {
        self.width
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeriesKind {
    Bar,
}

impl SeriesKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SeriesKind::Bar => "Bar",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeriesOption {
    /// The x-axis starts at 1 rather than 0.
    Shifted,
}

impl SeriesOption {
    pub fn as_str(self) -> &'static str {
        match self {
            SeriesOption::Shifted => "Shifted",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series<P> {
    pub title: String,
    pub kind: SeriesKind,
    pub options: Vec<SeriesOption>,
    pub points: Vec<P>,
}

impl<P> Series<P> {
    pub fn new(title: &str, kind: SeriesKind) -> Self {
        Self {
            title: title.to_string(),
            kind,
            options: Vec::new(),
            points: Vec::new(),
        }
    }

    pub fn add_option(&mut self, option: SeriesOption) {
        if !self.options.contains(&option) {
            self.options.push(option);
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Output of a plot call: series plus the axis and title metadata a renderer
/// needs.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotData<P> {
    pub series: Vec<Series<P>>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: Option<AxisRange>,
    pub y_range: Option<AxisRange>,
}

impl<P> Default for PlotData<P> {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            x_range: None,
            y_range: None,
        }
    }
}

impl<P> PlotData<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.series.clear();
        self.title.clear();
        self.x_label.clear();
        self.y_label.clear();
        self.x_range = None;
        self.y_range = None;
    }

    pub fn set_xrange(&mut self, min: f64, max: f64) {
        self.x_range = Some(AxisRange { min, max });
    }

    pub fn set_yrange(&mut self, min: f64, max: f64) {
        self.y_range = Some(AxisRange { min, max });
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }
}
