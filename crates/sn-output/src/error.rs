use thiserror::Error;

/// Failure while recording detections or tick summaries.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output directory or a recording file could not be opened or flushed.
    #[error("recording I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A row could not be serialized into a recording file.
    #[error("recording row rejected: {0}")]
    Csv(#[from] csv::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
