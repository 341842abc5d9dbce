//! Validation rejection errors.

/// Raised when an edited output fails its block-type validator.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Validation Error: {} error(s) blocking save: {} at line {} in {}",
    error_count,
    summary,
    line,
    file
)]
pub struct ValidationRejected {
    /// Number of blocking errors
    pub error_count: usize,
    /// Formatted error messages
    pub summary: String,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ValidationRejected {
    /// Create a new rejection at the current location.
    #[track_caller]
    pub fn new(error_count: usize, summary: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            error_count,
            summary: summary.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
