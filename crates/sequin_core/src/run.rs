//! Persisted sequence runs as reported by the backend.

use crate::{decode_embedded_json, value_to_text};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Row key → column key → cell text.
pub type MatrixOutput = BTreeMap<String, BTreeMap<String, String>>;

/// Lifecycle status of a sequence run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case", from = "String")]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    /// Queued, not started
    Pending,
    /// Blocks are executing
    Running,
    /// All blocks finished
    Completed,
    /// Execution stopped on an error
    Failed,
    /// Status the client does not recognize
    #[default]
    Unknown,
}

impl From<String> for RunStatus {
    fn from(status: String) -> Self {
        match status.to_ascii_lowercase().as_str() {
            "pending" | "queued" => RunStatus::Pending,
            "running" | "in_progress" => RunStatus::Running,
            "completed" | "complete" | "success" => RunStatus::Completed,
            "failed" | "error" => RunStatus::Failed,
            _ => RunStatus::Unknown,
        }
    }
}

/// The persisted result of executing one block within a run.
///
/// The `*_json` fields are stored by the backend as text or as structured
/// JSON; use the accessor methods to read them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockRun {
    /// Block run id
    #[serde(default)]
    pub id: Option<i64>,
    /// Block that was executed
    pub block_id: i64,
    /// Named outputs of a discretization block
    #[serde(default)]
    pub named_outputs_json: Option<Value>,
    /// Matrix output of a multi-list block
    #[serde(default)]
    pub matrix_outputs_json: Option<Value>,
    /// List output of a single-list block
    #[serde(default)]
    pub list_outputs_json: Option<Value>,
    /// Raw model response text
    #[serde(default)]
    pub llm_output_text: Option<String>,
    /// Prompt after variable substitution
    #[serde(default)]
    pub prompt_text: Option<String>,
    /// Completion time; unset while the block is still executing
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Time of the last manual edit
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
}

impl BlockRun {
    /// Whether the block finished executing.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Decoded named outputs. Non-string values are rendered as JSON text.
    pub fn named_outputs(&self) -> BTreeMap<String, String> {
        match self.named_outputs_json.as_ref().and_then(decode_embedded_json) {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| (k.clone(), value_to_text(v)))
                .collect(),
            _ => BTreeMap::new(),
        }
    }

    /// A single named output. A `null` value counts as not emitted.
    pub fn named_output(&self, name: &str) -> Option<String> {
        match self.named_outputs_json.as_ref().and_then(decode_embedded_json) {
            Some(Value::Object(map)) => map
                .get(name)
                .filter(|value| !value.is_null())
                .map(value_to_text),
            _ => None,
        }
    }

    /// Decoded list output.
    pub fn list_outputs(&self) -> Option<Vec<String>> {
        match self.list_outputs_json.as_ref().and_then(decode_embedded_json) {
            Some(Value::Array(items)) => Some(items.iter().map(value_to_text).collect()),
            _ => None,
        }
    }

    /// Decoded matrix output. Rows that are not objects are skipped.
    pub fn matrix_outputs(&self) -> Option<MatrixOutput> {
        match self.matrix_outputs_json.as_ref().and_then(decode_embedded_json) {
            Some(Value::Object(rows)) => Some(
                rows.iter()
                    .filter_map(|(row, cols)| {
                        cols.as_object().map(|cols| {
                            let cells = cols
                                .iter()
                                .map(|(col, cell)| (col.clone(), value_to_text(cell)))
                                .collect();
                            (row.clone(), cells)
                        })
                    })
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// A sequence run fetched from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRunResult {
    /// Run id
    pub id: i64,
    /// Sequence that was run
    #[serde(default)]
    pub sequence_id: Option<i64>,
    /// Run status
    #[serde(default)]
    pub status: RunStatus,
    /// Block runs in execution order
    #[serde(default)]
    pub block_runs: Vec<BlockRun>,
}

impl SequenceRunResult {
    /// Create an empty run record.
    pub fn new(id: i64, status: RunStatus) -> Self {
        Self {
            id,
            sequence_id: None,
            status,
            block_runs: Vec::new(),
        }
    }

    /// The first block run recorded for a block.
    pub fn block_run(&self, block_id: i64) -> Option<&BlockRun> {
        self.block_runs.iter().find(|br| br.block_id == block_id)
    }
}
