//! Run operation error types.

use std::time::Duration;

/// Specific error conditions for run operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RunErrorKind {
    /// Rerun or edit requested without a persisted run to act on
    #[display("No persisted run available for block {_0}")]
    MissingRunContext(i64),
    /// Persisted run has no block run for the block
    #[display("Run {run_id} has no block run for block {block_id}")]
    MissingBlockRun {
        /// Persisted run id
        run_id: i64,
        /// Block that was looked up
        block_id: i64,
    },
    /// Block is not part of the loaded sequence
    #[display("Unknown block: {_0}")]
    UnknownBlock(i64),
    /// No sequence has been loaded into the session
    #[display("No sequence loaded")]
    NoSequence,
    /// Operation was cancelled before its result was applied
    #[display("Operation cancelled")]
    Cancelled,
    /// Single-block result arrived after a full run superseded live results
    #[display("Result for block {_0} was superseded by a newer run")]
    Superseded(i64),
    /// Backend call exceeded the configured timeout
    #[display("Operation timed out after {_0:?}")]
    TimedOut(Duration),
}

/// Run error with location tracking.
///
/// # Examples
///
/// ```
/// use sequin_error::{RunError, RunErrorKind};
///
/// let err = RunError::new(RunErrorKind::MissingRunContext(7));
/// assert!(err.to_string().contains("block 7"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Run Error: {} at line {} in {}", kind, line, file)]
pub struct RunError {
    /// The specific error condition
    pub kind: RunErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl RunError {
    /// Create a new RunError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RunErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
