//! Template edit error types.

/// Specific error conditions for template edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TemplateErrorKind {
    /// Requested order is not a permutation of the referenced variables
    #[display("Order {requested:?} does not match referenced variables {current:?}")]
    InvalidOrder {
        /// Names currently referenced by the template
        current: Vec<String>,
        /// Names supplied by the caller
        requested: Vec<String>,
    },
    /// Variable name cannot form a reference token
    #[display("Invalid variable name: {_0:?}")]
    InvalidName(String),
}

/// Template error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Template Error: {} at line {} in {}", kind, line, file)]
pub struct TemplateError {
    /// The specific error condition
    pub kind: TemplateErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl TemplateError {
    /// Create a new TemplateError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TemplateErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
