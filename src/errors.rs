pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The graph needs at least one history slot to plot anything.
    #[error("History capacity must be at least 1")]
    ZeroCapacity,

    /// A sample value was NaN or infinite and cannot be plotted.
    #[error("Non-finite sample for metric `{name}` (got: {value})")]
    NonFiniteSample {
        /// Metric name.
        name: String,
        /// Rejected value.
        value: f32,
    },

    /// The layout has no palette color to assign to the first row.
    #[error("Graph palette is empty")]
    EmptyPalette,

    /// A profiler entry was recorded with two different methods (e.g. `add` then `max`).
    #[error("Profiler entry `{name}` is recorded as {existing}, not {requested}")]
    RecordKindMismatch {
        /// Entry name.
        name: String,
        /// Kind the entry was created with.
        existing: &'static str,
        /// Kind of the rejected record.
        requested: &'static str,
    },

    /// A profiler page outside `1..=pagecount` was requested.
    #[error("Invalid profiler page {page} of {pagecount}")]
    InvalidPage {
        /// Requested page (1-based).
        page: u32,
        /// Total page count.
        pagecount: u32,
    },

    /// The plotters backend failed to draw.
    #[cfg(feature = "draws")]
    #[error("Plotters error: {0}")]
    Plotters(String),

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Formatting into a text sink failed.
    #[error("Format error: {0}")]
    FmtError(#[from] std::fmt::Error),

    /// JSON serialization/deserialization error occurred.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
