//! Block-type validators.

use crate::rules::{
    check_claims, check_embedded_json, check_list_items, check_lowercase_start, check_not_empty,
    has_numbered_lines, is_claim_field, mentions_claims,
};
use crate::{IssueKind, OutputValidation, ValidationIssue};
use sequin_core::{BlockType, MatrixOutput, OutputEdit};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Validate an edited output for a block of the given type.
///
/// Free text is accepted for every block type. Structured edits must match
/// the block type: named outputs for discretization, a list for single
/// list and a matrix for multi list. Any other shape is an error.
///
/// # Examples
///
/// ```
/// use sequin_core::{BlockType, OutputEdit};
/// use sequin_validate::validate_output;
///
/// let report = validate_output(BlockType::Standard, &OutputEdit::Content("   ".into()));
/// assert!(!report.is_valid());
///
/// let report = validate_output(BlockType::Standard, &OutputEdit::List(vec![]));
/// assert!(!report.is_valid());
/// ```
#[instrument(skip(edit))]
pub fn validate_output(block_type: BlockType, edit: &OutputEdit) -> OutputValidation {
    if !accepts_shape(block_type, edit) {
        let mut report = OutputValidation::new();
        report.add_error(ValidationIssue::new(
            IssueKind::MismatchedShape,
            format!(
                "A {} block cannot store a {} edit",
                block_type,
                shape_name(edit)
            ),
        ));
        debug!("Rejected edit shape");
        return report;
    }

    let report = match edit {
        OutputEdit::Content(text) => validate_content(block_type, text),
        OutputEdit::NamedOutputs(fields) => validate_discretization(fields),
        OutputEdit::List(items) => validate_list(items),
        OutputEdit::Matrix(matrix) => validate_matrix(matrix),
    };
    debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        suggestions = report.suggestions.len(),
        "Validated output"
    );
    report
}

fn accepts_shape(block_type: BlockType, edit: &OutputEdit) -> bool {
    matches!(
        (block_type, edit),
        (_, OutputEdit::Content(_))
            | (BlockType::Discretization, OutputEdit::NamedOutputs(_))
            | (BlockType::SingleList, OutputEdit::List(_))
            | (BlockType::MultiList, OutputEdit::Matrix(_))
    )
}

fn shape_name(edit: &OutputEdit) -> &'static str {
    match edit {
        OutputEdit::Content(_) => "content",
        OutputEdit::NamedOutputs(_) => "named outputs",
        OutputEdit::List(_) => "list",
        OutputEdit::Matrix(_) => "matrix",
    }
}

/// Validate free response text.
///
/// Standard and discretization text must be non-empty and gets the claim
/// checks when it mentions claims. List block text is checked line by line
/// for marker consistency only.
pub fn validate_content(block_type: BlockType, text: &str) -> OutputValidation {
    let mut report = OutputValidation::new();
    match block_type {
        BlockType::Standard | BlockType::Discretization => {
            if check_not_empty(text, &mut report) {
                check_lowercase_start(text, &mut report);
                if mentions_claims(text) {
                    check_claims(text, &mut report);
                }
            }
        }
        BlockType::SingleList | BlockType::MultiList => {
            let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
            if lines.is_empty() {
                report.add_warning(ValidationIssue::new(IssueKind::Empty, "List is empty"));
            } else {
                check_list_items(&lines, &mut report);
            }
        }
    }
    report
}

/// Validate each named output independently.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use sequin_validate::validate_discretization;
///
/// let fields = BTreeMap::from([("c1".to_string(), "a widget".to_string())]);
/// let report = validate_discretization(&fields);
/// assert!(report.is_valid());
/// assert!(!report.warnings.is_empty());
/// ```
pub fn validate_discretization(fields: &BTreeMap<String, String>) -> OutputValidation {
    let mut report = OutputValidation::new();
    if fields.is_empty() {
        report.add_error(ValidationIssue::new(IssueKind::Empty, "No output fields"));
        return report;
    }

    for (name, value) in fields {
        let mut field = OutputValidation::new();
        if value.trim().is_empty() {
            field.add_error(ValidationIssue::new(IssueKind::Empty, "Field cannot be empty"));
        } else {
            check_lowercase_start(value, &mut field);
            if is_claim_field(name) && (mentions_claims(value) || has_numbered_lines(value)) {
                check_claims(value, &mut field);
            }
            check_embedded_json(value, &mut field);
        }
        report.merge(field.scoped(name));
    }
    report
}

/// Validate list items. Every finding is advisory.
pub fn validate_list(items: &[String]) -> OutputValidation {
    let mut report = OutputValidation::new();
    if items.is_empty() {
        report.add_warning(ValidationIssue::new(IssueKind::Empty, "List is empty"));
        return report;
    }
    let items: Vec<&str> = items.iter().map(String::as_str).collect();
    check_list_items(&items, &mut report);
    report
}

/// Validate matrix cells. Every finding is advisory.
pub fn validate_matrix(matrix: &MatrixOutput) -> OutputValidation {
    let mut report = OutputValidation::new();
    if matrix.is_empty() {
        report.add_warning(ValidationIssue::new(IssueKind::Empty, "Matrix is empty"));
    }
    for (row, cols) in matrix {
        for (col, cell) in cols {
            if cell.trim().is_empty() {
                report.add_warning(
                    ValidationIssue::new(IssueKind::EmptyItem, "Cell is empty")
                        .in_field(format!("{}/{}", row, col)),
                );
            }
        }
    }
    report
}
