use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    /// The filter selects a read the run info does not describe.
    #[error("invalid read selection: read {read} not found in run info ({count} reads)")]
    InvalidRead { read: u32, count: usize },

    /// A legacy bin table points past the end of the histogram.
    #[error("bin index out of bounds: {index} < {len} violated")]
    BinOutOfBounds { index: i64, len: usize },

    #[error("metric dump parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type PlotResult<T> = Result<T, PlotError>;
