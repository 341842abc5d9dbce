//! Manual edits to a block's output.

use crate::{BlockConfig, MatrixOutput};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// The edited output of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutputEdit {
    /// Replacement response text
    Content(String),
    /// Replacement named fields
    NamedOutputs(BTreeMap<String, String>),
    /// Replacement list
    List(Vec<String>),
    /// Replacement matrix
    Matrix(MatrixOutput),
}

impl OutputEdit {
    /// Variable values downstream blocks should see once this edit applies.
    ///
    /// Named outputs publish one value per field. Other edits publish under
    /// the block's first output name; lists and matrices are JSON-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use sequin_core::{BlockConfig, OutputEdit};
    ///
    /// let config = BlockConfig::Standard { output_name: "summary".into() };
    /// let edit = OutputEdit::Content("Shorter.".into());
    /// assert_eq!(
    ///     edit.override_values(&config),
    ///     vec![("summary".to_string(), "Shorter.".to_string())]
    /// );
    /// ```
    pub fn override_values(&self, config: &BlockConfig) -> Vec<(String, String)> {
        let primary = config.output_names().first().map(|n| n.to_string());
        match self {
            OutputEdit::NamedOutputs(fields) => fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            OutputEdit::Content(text) => primary
                .map(|name| vec![(name, text.clone())])
                .unwrap_or_default(),
            OutputEdit::List(items) => primary
                .map(|name| vec![(name, Value::from(items.clone()).to_string())])
                .unwrap_or_default(),
            OutputEdit::Matrix(matrix) => primary
                .map(|name| vec![(name, matrix_to_value(matrix).to_string())])
                .unwrap_or_default(),
        }
    }

    /// Request body for the backend's edit-block-output endpoint.
    pub fn to_payload(&self) -> Value {
        match self {
            OutputEdit::Content(text) => json!({ "llm_output_text": text }),
            OutputEdit::NamedOutputs(fields) => json!({ "named_outputs_json": fields }),
            OutputEdit::List(items) => json!({ "list_outputs_json": items }),
            OutputEdit::Matrix(matrix) => {
                json!({ "matrix_outputs_json": matrix_to_value(matrix) })
            }
        }
    }
}

fn matrix_to_value(matrix: &MatrixOutput) -> Value {
    Value::Object(
        matrix
            .iter()
            .map(|(row, cols)| {
                let cells = cols
                    .iter()
                    .map(|(col, cell)| (col.clone(), Value::String(cell.clone())))
                    .collect();
                (row.clone(), Value::Object(cells))
            })
            .collect(),
    )
}
