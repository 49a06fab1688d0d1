use std::io;
use thiserror::Error;

/// Error type for masking operations.
#[derive(Error, Debug)]
pub enum MaskError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Separator outside the supported set.
    #[error("Unknown separator {0:?} (expected one of '|', tab, ';', ',')")]
    UnknownSeparator(String),

    /// The first data line lies past the end of the input.
    #[error("Data start line {data_start} is beyond the end of the input ({total_lines} lines)")]
    DataStartOutOfRange {
        data_start: usize,
        total_lines: usize,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The run was cancelled through the cancel flag.
    #[error("Cancelled before line {line}")]
    Cancelled { line: usize },
}

/// Result type alias for masking operations.
pub type Result<T> = std::result::Result<T, MaskError>;

/// Failure of a single value transform.
///
/// Never surfaces as a [`MaskError`]: the engine turns it into a pass-through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The transformed value does not keep the original character count.
    #[error("shape mismatch: expected {expected} chars, produced {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}
