/// Default number of non-empty data lines buffered for type inference.
pub const DEFAULT_SAMPLE_LINES: usize = 150;

/// Default number of sampled rows the classifier actually votes on.
pub const DEFAULT_CLASSIFIER_ROWS: usize = 100;

/// Sampling configuration for column type inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampling {
    /// Non-empty lines read from `data_start` onward before classifying.
    pub lines: usize,
    /// Rows of that window the classifier votes on.
    ///
    /// Values above `lines` have no effect.
    pub classifier_rows: usize,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            lines: DEFAULT_SAMPLE_LINES,
            classifier_rows: DEFAULT_CLASSIFIER_ROWS,
        }
    }
}

impl Sampling {
    /// Create a sampling configuration.
    pub const fn new(lines: usize, classifier_rows: usize) -> Self {
        Self {
            lines,
            classifier_rows,
        }
    }
}
