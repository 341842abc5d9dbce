//! Backend connection settings errors.

use std::path::PathBuf;

/// Settings that could not be loaded or did not parse.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// What went wrong
    pub message: String,
    /// Settings file involved, if the value came from one
    pub path: Option<PathBuf>,
    /// Environment variable or key holding the bad value
    pub setting: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use sequin_error::ConfigError;
    ///
    /// let err = ConfigError::new("Missing required field");
    /// assert!(err.message.contains("Missing required"));
    /// assert!(err.path.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            path: None,
            setting: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the settings file the error came from.
    ///
    /// # Examples
    ///
    /// ```
    /// use sequin_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to read").with_path("sequin.toml");
    /// assert!(err.to_string().contains("sequin.toml"));
    /// ```
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the name of the offending setting.
    pub fn with_setting(mut self, setting: impl Into<String>) -> Self {
        self.setting = Some(setting.into());
        self
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration Error")?;
        if let Some(path) = &self.path {
            write!(f, " in {}", path.display())?;
        }
        if let Some(setting) = &self.setting {
            write!(f, " for {}", setting)?;
        }
        write!(
            f,
            ": {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for ConfigError {}
