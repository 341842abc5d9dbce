//! Tests for block records and typed configuration.

use sequin_core::{Block, BlockConfig, BlockType, DEFAULT_OUTPUT_NAME, OutputEdit};
use serde_json::json;
use std::collections::BTreeMap;

fn decode(value: serde_json::Value) -> Result<Block, serde_json::Error> {
    serde_json::from_value(value)
}

#[test]
fn test_decode_discretization_block() {
    let block = decode(json!({
        "id": 1,
        "sequence_id": 7,
        "name": "Split",
        "block_type": "discretization",
        "prompt": "Split <<summary>>",
        "position": 2,
        "config": { "output_names": ["c1", "c2"] }
    }))
    .unwrap();

    assert_eq!(block.block_type(), BlockType::Discretization);
    assert_eq!(block.position, 2);
    assert_eq!(block.config.output_names(), vec!["c1", "c2"]);
}

#[test]
fn test_missing_config_uses_default_output_name() {
    let block = decode(json!({
        "id": 1,
        "sequence_id": 7,
        "block_type": "standard"
    }))
    .unwrap();

    assert_eq!(
        block.config,
        BlockConfig::Standard {
            output_name: DEFAULT_OUTPUT_NAME.to_string()
        }
    );
    assert_eq!(block.prompt, "");
}

#[test]
fn test_blank_output_name_uses_default() {
    let block = decode(json!({
        "id": 1,
        "sequence_id": 7,
        "block_type": "single_list",
        "config": { "output_name": "  ", "list_name": "topics" }
    }))
    .unwrap();

    assert_eq!(
        block.config,
        BlockConfig::SingleList {
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            list_name: Some("topics".to_string()),
        }
    );
}

#[test]
fn test_unknown_block_type_is_rejected() {
    let result = decode(json!({
        "id": 9,
        "sequence_id": 7,
        "block_type": "carousel"
    }));
    let err = result.unwrap_err().to_string();
    assert!(err.contains("carousel"), "Unexpected error: {}", err);
}

#[test]
fn test_malformed_config_is_rejected() {
    assert!(
        decode(json!({
            "id": 1,
            "sequence_id": 7,
            "block_type": "standard",
            "config": "output"
        }))
        .is_err()
    );
    assert!(
        decode(json!({
            "id": 1,
            "sequence_id": 7,
            "block_type": "discretization",
            "config": { "output_names": ["c1", 2] }
        }))
        .is_err()
    );
}

#[test]
fn test_block_serializes_as_record() {
    let block = Block {
        id: 3,
        sequence_id: 7,
        name: "Grid".to_string(),
        prompt: "<<rows>> x <<cols>>".to_string(),
        position: 0,
        config: BlockConfig::MultiList {
            output_name: "grid".to_string(),
            row_list: Some("rows".to_string()),
            column_list: None,
        },
    };

    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(value["block_type"], "multi_list");
    assert_eq!(value["config"]["output_name"], "grid");
    assert_eq!(value["config"]["row_list"], "rows");
    assert!(value["config"]["column_list"].is_null());
}

#[test]
fn test_edit_override_values_by_shape() {
    let standard = BlockConfig::Standard {
        output_name: "summary".to_string(),
    };
    let edit = OutputEdit::Content("Edited.".to_string());
    assert_eq!(
        edit.override_values(&standard),
        vec![("summary".to_string(), "Edited.".to_string())]
    );

    let list = BlockConfig::default_for(BlockType::SingleList);
    let edit = OutputEdit::List(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(
        edit.override_values(&list),
        vec![("output".to_string(), r#"["a","b"]"#.to_string())]
    );

    let discretization = BlockConfig::Discretization {
        output_names: vec!["c1".to_string()],
    };
    let mut fields = BTreeMap::new();
    fields.insert("c1".to_string(), "A widget.".to_string());
    fields.insert("c2".to_string(), "A gadget.".to_string());
    let edit = OutputEdit::NamedOutputs(fields);
    assert_eq!(edit.override_values(&discretization).len(), 2);
}

#[test]
fn test_edit_override_values_without_output_name() {
    let empty = BlockConfig::Discretization {
        output_names: Vec::new(),
    };
    let edit = OutputEdit::Content("text".to_string());
    assert!(edit.override_values(&empty).is_empty());
}

#[test]
fn test_edit_payload_keys() {
    assert_eq!(
        OutputEdit::Content("x".to_string()).to_payload(),
        json!({ "llm_output_text": "x" })
    );
    assert_eq!(
        OutputEdit::List(vec!["x".to_string()]).to_payload(),
        json!({ "list_outputs_json": ["x"] })
    );

    let mut row = BTreeMap::new();
    row.insert("c".to_string(), "cell".to_string());
    let mut matrix = BTreeMap::new();
    matrix.insert("r".to_string(), row);
    assert_eq!(
        OutputEdit::Matrix(matrix).to_payload(),
        json!({ "matrix_outputs_json": { "r": { "c": "cell" } } })
    );
}
