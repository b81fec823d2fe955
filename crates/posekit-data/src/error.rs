/// All errors that can occur while building or reading datasets.
///
/// Construction problems (bad source lists, bad mixing fractions, loader
/// failures) are fatal one-time setup errors; lookup errors come from the
/// delegated source and are passed through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The mixed dataset needs a primary source, a tail source, and at
    /// least one in-the-wild source in between.
    #[error("too few sources: need at least 3, got {got}")]
    TooFewSources { got: usize },

    /// Two sources in the list share a name.
    #[error("duplicate source name: {0}")]
    DuplicateSource(String),

    /// A source reported zero samples; it could never be indexed.
    #[error("source {0} is empty")]
    EmptySource(String),

    /// Every in-the-wild source is empty, so the proportional split of the
    /// in-the-wild probability mass is undefined.
    #[error("in-the-wild bucket is empty: sources {0:?} have no samples")]
    EmptyItwBucket(Vec<String>),

    /// Mixing fractions out of range or leaving no mass for the
    /// in-the-wild bucket.
    #[error(
        "invalid mix fractions: primary {primary} + tail {tail} must each be in [0, 1) and sum below 1"
    )]
    InvalidMixSpec { primary: f64, tail: f64 },

    /// The cumulative partition failed to reach 1.0 within tolerance;
    /// a sampler built from it would starve its last sources.
    #[error("partition does not reach 1.0: final bound {last}")]
    PartitionNotNormalized { last: f64 },

    /// The loader does not know the requested source name.
    #[error("unknown source: {0}")]
    UnknownSource(String),

    /// Index past the end of a source (after wraparound this should not
    /// occur; a source raising it is surfaced unchanged).
    #[error("index {index} out of range for source {source_name} (len {len})")]
    IndexOutOfRange {
        source_name: String,
        index: usize,
        len: usize,
    },

    /// I/O failure while a source loads its backing data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic message for source-specific failures not covered above.
    #[error("{0}")]
    Msg(String),
}

impl DataError {
    /// Create an error from any string message.
    pub fn msg(s: impl Into<String>) -> Self {
        DataError::Msg(s.into())
    }
}

/// Convenience Result type used throughout posekit-data.
pub type Result<T> = std::result::Result<T, DataError>;
