//! Error types for the Sequin prompt-sequence engine.
//!
//! Every error records the source location where it was constructed.
//! Domain crates return [`SequinResult`], and any of the concern-specific
//! errors converts into [`SequinError`] with `?`.

mod backend;
mod config;
mod http;
mod json;
mod run;
mod template;
mod validation;

pub use backend::BackendError;
pub use config::ConfigError;
pub use http::HttpError;
pub use json::JsonError;
pub use run::{RunError, RunErrorKind};
pub use template::{TemplateError, TemplateErrorKind};
pub use validation::ValidationRejected;

/// Crate-level error variants.
#[derive(Debug, Clone, derive_more::From, derive_more::Display)]
pub enum SequinErrorKind {
    /// Transport failure talking to the backend
    #[display("{}", _0)]
    Http(HttpError),
    /// Backend answered with a non-success status
    #[display("{}", _0)]
    Backend(BackendError),
    /// Payload could not be encoded or decoded
    #[display("{}", _0)]
    Json(JsonError),
    /// Configuration could not be loaded
    #[display("{}", _0)]
    Config(ConfigError),
    /// Template edit was rejected
    #[display("{}", _0)]
    Template(TemplateError),
    /// Run operation failed before committing state
    #[display("{}", _0)]
    Run(RunError),
    /// Edited output failed validation
    #[display("{}", _0)]
    Validation(ValidationRejected),
}

/// Sequin error with kind discrimination.
///
/// # Examples
///
/// ```
/// use sequin_error::{ConfigError, SequinError, SequinErrorKind};
///
/// let err: SequinError = ConfigError::new("missing base url").into();
/// assert!(matches!(err.kind(), SequinErrorKind::Config(_)));
/// assert!(err.to_string().contains("missing base url"));
/// ```
#[derive(Debug, Clone)]
pub struct SequinError(Box<SequinErrorKind>);

impl SequinError {
    /// Create a new error from a kind.
    pub fn new(kind: SequinErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SequinErrorKind {
        &self.0
    }

    /// Returns true if the error came from a cancelled operation.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self.kind(),
            SequinErrorKind::Run(RunError {
                kind: RunErrorKind::Cancelled,
                ..
            })
        )
    }
}

impl std::fmt::Display for SequinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sequin Error: {}", self.0)
    }
}

impl std::error::Error for SequinError {}

// Generic From implementation for any type that converts to SequinErrorKind
impl<T> From<T> for SequinError
where
    T: Into<SequinErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Sequin operations.
pub type SequinResult<T> = std::result::Result<T, SequinError>;
