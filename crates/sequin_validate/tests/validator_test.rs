//! Tests for block-type output validators.

use sequin_core::{BlockType, MatrixOutput, OutputEdit};
use sequin_validate::{
    IssueKind, validate_content, validate_discretization, validate_list, validate_matrix,
    validate_output,
};
use std::collections::BTreeMap;

fn kinds(issues: &[sequin_validate::ValidationIssue]) -> Vec<IssueKind> {
    issues.iter().map(|i| i.kind).collect()
}

fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_empty_standard_content_is_hard_failure() {
    let report = validate_content(BlockType::Standard, "");
    assert!(!report.is_valid());
    assert_eq!(kinds(&report.errors), vec![IssueKind::Empty]);

    let report = validate_content(BlockType::Standard, "  \n\t ");
    assert!(!report.is_valid());
}

#[test]
fn test_well_formed_claims_are_clean() {
    let text = "1. A widget comprising a handle.\n2. The widget of claim 1, wherein the handle is red.";
    let report = validate_content(BlockType::Standard, text);
    assert!(
        report.is_clean(),
        "Expected no findings, got {:?}",
        report
    );
}

#[test]
fn test_claim_rules_only_apply_when_claims_are_mentioned() {
    let report = validate_content(BlockType::Standard, "3. Something happened first");
    assert!(report.is_clean());
}

#[test]
fn test_non_sequential_claims_warn() {
    let text = "1. A widget.\n3. The widget of claim 1.";
    let report = validate_content(BlockType::Standard, text);
    assert!(report.is_valid());
    assert_eq!(kinds(&report.warnings), vec![IssueKind::NonSequentialClaims]);
}

#[test]
fn test_forward_dependency_warns() {
    let text = "1. A widget.\n2. The widget of claim 2.";
    let report = validate_content(BlockType::Standard, text);
    assert!(report.is_valid());
    assert_eq!(
        kinds(&report.warnings),
        vec![IssueKind::InvalidClaimDependency]
    );
}

#[test]
fn test_missing_independent_claim_warns() {
    let text = "Claims:\n1. The widget.";
    let report = validate_content(BlockType::Standard, text);
    assert!(report.is_valid());
    assert!(kinds(&report.warnings).contains(&IssueKind::MissingIndependentClaim));
}

#[test]
fn test_missing_terminal_period_is_suggestion() {
    let text = "Claim text:\n1. A widget";
    let report = validate_content(BlockType::Standard, text);
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
    assert_eq!(
        kinds(&report.suggestions),
        vec![IssueKind::MissingTerminalPeriod]
    );
}

#[test]
fn test_lowercase_start_warns() {
    let report = validate_content(BlockType::Standard, "the answer is yes.");
    assert!(report.is_valid());
    assert_eq!(kinds(&report.warnings), vec![IssueKind::LowercaseStart]);
}

#[test]
fn test_discretization_empty_field_rejected() {
    let report = validate_discretization(&fields(&[("c1", "")]));
    assert!(!report.is_valid());
    assert_eq!(report.errors[0].kind, IssueKind::Empty);
    assert_eq!(report.errors[0].field.as_deref(), Some("c1"));
}

#[test]
fn test_discretization_lowercase_field_saves_with_warning() {
    let report = validate_discretization(&fields(&[("c1", "a widget")]));
    assert!(report.is_valid());
    assert_eq!(kinds(&report.warnings), vec![IssueKind::LowercaseStart]);
    assert_eq!(report.warnings[0].field.as_deref(), Some("c1"));
}

#[test]
fn test_discretization_capitalized_field_is_clean() {
    let report = validate_discretization(&fields(&[("c1", "A widget.")]));
    assert!(report.is_clean());
}

#[test]
fn test_discretization_fields_validated_independently() {
    let report = validate_discretization(&fields(&[("c1", "A widget."), ("c2", " ")]));
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].field.as_deref(), Some("c2"));
}

#[test]
fn test_discretization_claim_field_gets_claim_rules() {
    let report = validate_discretization(&fields(&[(
        "claims",
        "1. A widget.\n3. The widget of claim 1.",
    )]));
    assert!(report.is_valid());
    assert_eq!(kinds(&report.warnings), vec![IssueKind::NonSequentialClaims]);
    assert_eq!(report.warnings[0].field.as_deref(), Some("claims"));
}

#[test]
fn test_discretization_malformed_json_flagged() {
    let report = validate_discretization(&fields(&[("summary", "Data: {\"a\": }")]));
    assert!(!report.is_valid());
    assert_eq!(kinds(&report.errors), vec![IssueKind::MalformedJson]);

    let report = validate_discretization(&fields(&[("summary", "Data: {\"a\": 1}")]));
    assert!(report.is_valid());
}

#[test]
fn test_discretization_without_fields_rejected() {
    let report = validate_discretization(&BTreeMap::new());
    assert!(!report.is_valid());
}

#[test]
fn test_list_mixed_markers_advisory() {
    let items = vec!["- one".to_string(), "2. two".to_string()];
    let report = validate_list(&items);
    assert!(report.is_valid());
    assert_eq!(kinds(&report.warnings), vec![IssueKind::MixedListMarkers]);
}

#[test]
fn test_list_non_sequential_numbers_suggested() {
    let items = vec!["1. one".to_string(), "3. three".to_string()];
    let report = validate_list(&items);
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
    assert_eq!(kinds(&report.suggestions), vec![IssueKind::NonSequentialList]);
}

#[test]
fn test_list_empty_items_warn() {
    let items = vec!["- one".to_string(), "- ".to_string(), String::new()];
    let report = validate_list(&items);
    assert!(report.is_valid());
    assert_eq!(
        kinds(&report.warnings),
        vec![IssueKind::EmptyItem, IssueKind::EmptyItem]
    );
}

#[test]
fn test_list_block_content_checked_by_line() {
    let report = validate_content(BlockType::SingleList, "- alpha\n\n- beta\n");
    assert!(report.is_clean());

    let report = validate_content(BlockType::MultiList, "");
    assert!(report.is_valid());
    assert_eq!(kinds(&report.warnings), vec![IssueKind::Empty]);
}

#[test]
fn test_matrix_empty_cell_warns() {
    let mut matrix = MatrixOutput::new();
    matrix.insert(
        "r1".to_string(),
        BTreeMap::from([
            ("c1".to_string(), String::new()),
            ("c2".to_string(), "Value".to_string()),
        ]),
    );
    let report = validate_matrix(&matrix);
    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].field.as_deref(), Some("r1/c1"));
}

#[test]
fn test_validate_output_dispatches_by_edit_shape() {
    let edit = OutputEdit::NamedOutputs(fields(&[("c1", "")]));
    let report = validate_output(BlockType::Discretization, &edit);
    assert!(!report.is_valid());

    let edit = OutputEdit::List(vec!["- a".to_string()]);
    let report = validate_output(BlockType::SingleList, &edit);
    assert!(report.is_clean());
}

#[test]
fn test_format_errors_names_fields() {
    let report = validate_discretization(&fields(&[("c1", "")]));
    let formatted = report.format_errors();
    assert!(formatted.starts_with("Error 1: [c1]"));
    assert!(report.format_warnings().is_empty());
}

#[test]
fn test_edit_shape_must_fit_block_type() {
    let empty_list = OutputEdit::List(Vec::new());
    let empty_matrix = OutputEdit::Matrix(MatrixOutput::new());
    let named = OutputEdit::NamedOutputs(fields(&[("c1", "A widget.")]));

    for edit in [&empty_list, &empty_matrix, &named] {
        let report = validate_output(BlockType::Standard, edit);
        assert!(!report.is_valid(), "Standard block accepted {:?}", edit);
        assert_eq!(kinds(&report.errors), vec![IssueKind::MismatchedShape]);
    }

    assert!(!validate_output(BlockType::SingleList, &empty_matrix).is_valid());
    assert!(!validate_output(BlockType::MultiList, &empty_list).is_valid());
    assert!(!validate_output(BlockType::Discretization, &empty_list).is_valid());
}

#[test]
fn test_content_edit_fits_every_block_type() {
    let edit = OutputEdit::Content("A widget.".to_string());
    for block_type in [
        BlockType::Standard,
        BlockType::Discretization,
        BlockType::SingleList,
        BlockType::MultiList,
    ] {
        let report = validate_output(block_type, &edit);
        assert!(
            !kinds(&report.errors).contains(&IssueKind::MismatchedShape),
            "{} rejected content",
            block_type
        );
    }
}

#[test]
fn test_huge_list_numbers_do_not_overflow() {
    let items = vec![
        "18446744073709551615. big".to_string(),
        "2. next".to_string(),
    ];
    let report = validate_list(&items);
    assert!(report.is_valid());
    assert_eq!(
        kinds(&report.suggestions),
        vec![IssueKind::NonSequentialList]
    );
}
