//! Tests for prompt variable ordering.

use sequin_core::{CatalogEntry, CatalogKind, VariableCatalog, VariableType};
use sequin_error::TemplateErrorKind;
use sequin_template::{
    VariableOrder, derive_used_variables, insert_variable, reference_names, remove_variable,
    reorder_template, strip_tokens,
};

fn names(vars: &[sequin_core::UsedVariable]) -> Vec<&str> {
    vars.iter().map(|v| v.name().as_str()).collect()
}

#[test]
fn test_strip_tokens_leaves_indexed_references() {
    assert_eq!(
        strip_tokens("A <<x>> B   <<x[0]>>\n C", &["x"]),
        "A B <<x[0]>> C"
    );
}

#[test]
fn test_reorder_moves_tokens_to_tail() {
    let text = reorder_template(
        "Write about <<topic>> for <<audience>>.",
        &["topic", "audience"],
        &["audience", "topic"],
    );
    assert_eq!(text, "Write about for . <<audience>> <<topic>>");
}

#[test]
fn test_reorder_of_token_only_template_has_no_leading_space() {
    let text = reorder_template("<<a>> <<b>>", &["a", "b"], &["b", "a"]);
    assert_eq!(text, "<<b>> <<a>>");
}

#[test]
fn test_insert_variable_appends_token() {
    assert_eq!(insert_variable("Hello", "name"), "Hello <<name>>");
    assert_eq!(insert_variable("Hello   ", "name"), "Hello <<name>>");
    assert_eq!(insert_variable("", "name"), "<<name>>");
}

#[test]
fn test_remove_variable_strips_every_occurrence() {
    assert_eq!(
        remove_variable("Tell <<a>> about <<b>> and <<a>>", "a"),
        "Tell about <<b>> and"
    );
}

#[test]
fn test_derive_used_variables_follows_order_then_appearance() {
    let catalog = VariableCatalog::new(vec![
        CatalogEntry::new("a", CatalogKind::GlobalList)
            .with_items(vec!["x".to_string(), "y".to_string()]),
        CatalogEntry::new("b", CatalogKind::BlockOutput).with_description("Summary block"),
    ]);

    let vars = derive_used_variables(&["b", "a", "gone"], "<<a>> <<b>> <<c>>", &catalog);
    assert_eq!(names(&vars), vec!["b", "a", "c"]);

    assert_eq!(*vars[0].var_type(), VariableType::Output);
    assert_eq!(vars[0].description(), "Summary block");

    assert_eq!(*vars[1].var_type(), VariableType::List);
    assert_eq!(vars[1].default_value(), r#"["x","y"]"#);

    assert_eq!(*vars[2].var_type(), VariableType::Global);
    assert_eq!(vars[2].label(), "c");
    assert_eq!(vars[2].description(), "Variable: c");
}

#[test]
fn test_order_starts_in_appearance_order() {
    let order = VariableOrder::new("<<b>> before <<a>> before <<b>>");
    assert_eq!(order.order(), ["b", "a"]);
}

#[test]
fn test_reorder_rejects_non_permutation() {
    let mut order = VariableOrder::new("Compare <<a>> and <<b>>.");

    for bad in [vec!["a"], vec!["a", "a"], vec!["a", "c"], vec!["a", "b", "c"]] {
        let err = order.reorder(&bad).unwrap_err();
        assert!(
            matches!(err.kind, TemplateErrorKind::InvalidOrder { .. }),
            "Expected InvalidOrder for {:?}",
            bad
        );
    }
    assert_eq!(order.template(), "Compare <<a>> and <<b>>.");
    assert_eq!(order.order(), ["a", "b"]);
}

#[test]
fn test_free_form_edit_keeps_user_order() {
    let mut order = VariableOrder::new("<<a>> <<b>>");
    order.reorder(&["b", "a"]).unwrap();
    assert_eq!(order.template(), "<<b>> <<a>>");

    order.set_template("<<a>> <<c>> <<b>>");
    assert_eq!(order.order(), ["b", "a", "c"]);

    order.set_template("<<c>> only");
    assert_eq!(order.order(), ["c"]);
}

#[test]
fn test_remove_drops_name_from_order() {
    let mut order = VariableOrder::new("Use <<a>> and <<b>>");
    assert_eq!(order.remove("a"), "Use and <<b>>");
    assert_eq!(order.order(), ["b"]);
}

#[test]
fn test_insert_appends_and_extends_order() {
    let mut order = VariableOrder::new("Summarize <<text>>");
    assert_eq!(
        order.insert("audience").unwrap(),
        "Summarize <<text>> <<audience>>"
    );
    assert_eq!(order.order(), ["text", "audience"]);
}

#[test]
fn test_insert_rejects_unusable_names() {
    let mut order = VariableOrder::new("Summarize <<text>>");
    for bad in ["", "   ", "a>b", "a<b"] {
        let err = order.insert(bad).unwrap_err();
        assert!(matches!(err.kind, TemplateErrorKind::InvalidName(_)));
    }
    assert_eq!(order.template(), "Summarize <<text>>");
}

#[test]
fn test_derive_uses_current_order() {
    let catalog = VariableCatalog::new(vec![
        CatalogEntry::new("topic", CatalogKind::Global).with_default("rust"),
    ]);
    let mut order = VariableOrder::new("<<topic>> for <<audience>>");
    order.reorder(&["audience", "topic"]).unwrap();

    let vars = order.derive(&catalog);
    assert_eq!(names(&vars), vec!["audience", "topic"]);
    assert_eq!(vars[1].default_value(), "rust");
}

#[test]
fn test_reorder_compare_fixture() {
    let text = reorder_template("Compare <<a>> and <<b>>.", &["a", "b"], &["b", "a"]);
    assert_eq!(text, "Compare and . <<b>> <<a>>");
}

#[test]
fn test_reorder_is_idempotent() {
    let once = reorder_template("Compare <<a>> and <<b>>.", &["a", "b"], &["b", "a"]);
    let twice = reorder_template(&once, &["b", "a"], &["b", "a"]);
    assert_eq!(twice, once);

    let mut order = VariableOrder::new("Compare <<a>> and <<b>>.");
    order.reorder(&["b", "a"]).unwrap();
    let first = order.template().to_string();
    order.reorder(&["b", "a"]).unwrap();
    assert_eq!(order.template(), first);
    assert_eq!(order.order(), ["b", "a"]);
}

#[test]
fn test_order_tracks_referenced_names_through_edits() {
    fn assert_in_sync(order: &VariableOrder) {
        let mut ordered = order.order().to_vec();
        ordered.sort();
        let mut referenced = reference_names(order.template());
        referenced.sort();
        assert_eq!(
            ordered,
            referenced,
            "Order out of sync with {:?}",
            order.template()
        );
    }

    let mut order = VariableOrder::new("Write <<topic>> for <<audience>> using <<grid[0]>>.");
    assert_in_sync(&order);

    order.reorder(&["grid", "audience", "topic"]).unwrap();
    assert_in_sync(&order);

    order.remove("audience");
    assert_in_sync(&order);
    assert!(!order.order().contains(&"audience".to_string()));

    order.insert("tone").unwrap();
    assert_in_sync(&order);

    let current = order.order().to_vec();
    let reversed: Vec<&str> = current.iter().rev().map(String::as_str).collect();
    order.reorder(&reversed).unwrap();
    assert_in_sync(&order);
    assert_eq!(order.order(), reversed.as_slice());

    order.remove("topic");
    order.remove("tone");
    assert_in_sync(&order);
    assert_eq!(order.order(), ["grid"]);
}
