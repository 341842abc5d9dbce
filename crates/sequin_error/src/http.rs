//! Transport failures talking to the execution backend.

/// A request to the backend that never produced a usable response.
///
/// Non-success status codes are not transport failures; they surface as
/// `BackendError`.
#[derive(Debug, Clone)]
pub struct HttpError {
    /// What went wrong
    pub message: String,
    /// Backend route the request targeted, when one was involved
    pub endpoint: Option<String>,
    /// Whether the request hit the configured timeout
    pub timed_out: bool,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// A transport failure not tied to a particular route.
    ///
    /// # Examples
    ///
    /// ```
    /// use sequin_error::HttpError;
    ///
    /// let err = HttpError::new("Failed to build client");
    /// assert!(err.endpoint.is_none());
    /// assert!(!err.timed_out);
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            endpoint: None,
            timed_out: false,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A transport failure on one backend route.
    ///
    /// # Examples
    ///
    /// ```
    /// use sequin_error::HttpError;
    ///
    /// let err = HttpError::for_endpoint("POST /run_sequence", "Connection refused");
    /// assert_eq!(err.endpoint.as_deref(), Some("POST /run_sequence"));
    /// assert!(err.to_string().contains("POST /run_sequence"));
    /// ```
    #[track_caller]
    pub fn for_endpoint(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            endpoint: Some(endpoint.into()),
            timed_out: false,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Mark whether the failure was a request timeout.
    pub fn with_timeout(mut self, timed_out: bool) -> Self {
        self.timed_out = timed_out;
        self
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Backend transport error")?;
        if let Some(endpoint) = &self.endpoint {
            write!(f, " on {}", endpoint)?;
        }
        if self.timed_out {
            write!(f, " (timed out)")?;
        }
        write!(
            f,
            ": {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for HttpError {}
