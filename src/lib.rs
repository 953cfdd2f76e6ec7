pub mod core;
pub mod report;

pub use crate::core::error::{PlotError, PlotResult};
pub use crate::core::filter::FilterOptions;
pub use crate::core::model::RunMetrics;
pub use crate::core::plot::{BarPoint, PlotData, plot_qscore_histogram};
