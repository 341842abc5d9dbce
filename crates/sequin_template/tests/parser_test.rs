//! Tests for reference extraction.

use sequin_core::{IndexExpr, VariableKind};
use sequin_template::{contains_reference, parse_references, reference_names};

#[test]
fn test_simple_reference() {
    let refs = parse_references("Hello <<name>>!");
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].raw_token, "<<name>>");
    assert_eq!(refs[0].name, "name");
    assert_eq!(refs[0].kind, VariableKind::Simple);
    assert!(refs[0].indices.is_empty());
}

#[test]
fn test_array_reference_with_literal_index() {
    let refs = parse_references("First item: <<items[0]>>");
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].name, "items");
    assert_eq!(refs[0].kind, VariableKind::ArrayIndexed);
    assert_eq!(refs[0].index_exprs(), vec![IndexExpr::Literal(0)]);
    assert_eq!(refs[0].simple_token(), "<<items>>");
}

#[test]
fn test_matrix_reference_with_dynamic_indices() {
    let refs = parse_references("Cell: <<grid[row][col]>>");
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].kind, VariableKind::MatrixIndexed);
    assert_eq!(refs[0].indices, vec!["row", "col"]);
    assert_eq!(refs[0].index_variables(), vec!["row", "col"]);
}

#[test]
fn test_extra_index_groups_count_as_matrix() {
    let refs = parse_references("<<cube[1][2][3]>>");
    assert_eq!(refs[0].kind, VariableKind::MatrixIndexed);
    assert_eq!(refs[0].indices.len(), 3);
}

#[test]
fn test_references_keep_duplicates_in_order() {
    let refs = parse_references("<<a>> then <<b>> then <<a>>");
    let names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "a"]);
}

#[test]
fn test_reference_names_are_distinct_in_first_appearance_order() {
    assert_eq!(
        reference_names("<<b>> <<a[0]>> <<b>> <<a>> <<c[x][y]>>"),
        vec!["b", "a", "c"]
    );
}

#[test]
fn test_text_without_references() {
    assert!(parse_references("plain text").is_empty());
    assert!(parse_references("single <angle> brackets").is_empty());
    assert!(parse_references("unclosed <<name").is_empty());
    assert!(parse_references("empty <<>> token").is_empty());
}

#[test]
fn test_names_are_trimmed() {
    let refs = parse_references("<< topic >>");
    assert_eq!(refs[0].raw_token, "<< topic >>");
    assert_eq!(refs[0].name, "topic");
}

#[test]
fn test_blank_names_are_not_listed() {
    assert!(reference_names("<<   >>").is_empty());
}

#[test]
fn test_contains_reference_matches_any_form() {
    let template = "Use <<items[2]>> for <<topic>>";
    assert!(contains_reference(template, "items"));
    assert!(contains_reference(template, "topic"));
    assert!(!contains_reference(template, "item"));
}
