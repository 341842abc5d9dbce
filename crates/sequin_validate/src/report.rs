//! Validation findings.

use serde::Serialize;

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IssueKind {
    /// Content or field is empty
    Empty,
    /// Claim text has no independent claim
    MissingIndependentClaim,
    /// Claim numbers do not run 1, 2, 3, ...
    NonSequentialClaims,
    /// Dependent claim cites itself or a later claim
    InvalidClaimDependency,
    /// Claim does not end with a period
    MissingTerminalPeriod,
    /// Text starts with a lowercase letter
    LowercaseStart,
    /// Embedded `{...}` fragment is not valid JSON
    MalformedJson,
    /// List items use more than one marker style
    MixedListMarkers,
    /// Numbered list items skip or repeat numbers
    NonSequentialList,
    /// A list item or matrix cell is empty
    EmptyItem,
    /// Edit shape cannot be stored by the block type
    MismatchedShape,
}

/// One finding, optionally tied to a named output field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// What the finding is about
    pub kind: IssueKind,
    /// Field the finding applies to, for named outputs
    pub field: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl ValidationIssue {
    /// Create a finding that applies to the whole output.
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Attach the finding to a field.
    pub fn in_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    fn render(&self) -> String {
        match &self.field {
            Some(field) => format!("[{}] {}", field, self.message),
            None => self.message.clone(),
        }
    }
}

/// Result of validating an edited output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputValidation {
    /// Findings that block the save
    pub errors: Vec<ValidationIssue>,
    /// Findings that should be reviewed
    pub warnings: Vec<ValidationIssue>,
    /// Optional improvements
    pub suggestions: Vec<ValidationIssue>,
}

impl OutputValidation {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing blocks the save.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if there are no findings at all.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.suggestions.is_empty()
    }

    /// Adds an error.
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    /// Adds a warning.
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Adds a suggestion.
    pub fn add_suggestion(&mut self, issue: ValidationIssue) {
        self.suggestions.push(issue);
    }

    /// Move every finding of `other` into this result.
    pub fn merge(&mut self, other: OutputValidation) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.suggestions.extend(other.suggestions);
    }

    /// Tag every finding without a field with `field`.
    pub(crate) fn scoped(mut self, field: &str) -> Self {
        for issue in self
            .errors
            .iter_mut()
            .chain(self.warnings.iter_mut())
            .chain(self.suggestions.iter_mut())
        {
            if issue.field.is_none() {
                issue.field = Some(field.to_string());
            }
        }
        self
    }

    /// Formats errors as a human-readable string.
    pub fn format_errors(&self) -> String {
        format_issues("Error", &self.errors)
    }

    /// Formats warnings as a human-readable string.
    pub fn format_warnings(&self) -> String {
        format_issues("Warning", &self.warnings)
    }

    /// Formats suggestions as a human-readable string.
    pub fn format_suggestions(&self) -> String {
        format_issues("Suggestion", &self.suggestions)
    }
}

fn format_issues(label: &str, issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .enumerate()
        .map(|(i, issue)| format!("{} {}: {}", label, i + 1, issue.render()))
        .collect::<Vec<_>>()
        .join("\n")
}
