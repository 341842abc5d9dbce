//! Unified per-block display state.

use crate::{BlockRun, MatrixOutput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Content shown for a persisted block run that produced no text.
pub const NO_OUTPUT: &str = "No output";

/// What a block currently displays, whether provisional or persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockResponse {
    /// Response text
    pub content: Option<String>,
    /// Named outputs
    pub outputs: Option<BTreeMap<String, String>>,
    /// List output
    pub list_output: Option<Vec<String>>,
    /// Matrix output
    pub matrix_output: Option<MatrixOutput>,
    /// Run the response belongs to
    pub run_id: Option<i64>,
    /// Block run the response came from
    pub block_run_id: Option<i64>,
    /// Prompt that produced the response
    pub prompt_text: Option<String>,
    /// Time of the last manual edit
    pub edited_at: Option<DateTime<Utc>>,
    /// True for a just-executed result the persisted run does not reflect yet
    pub is_live: bool,
}

impl BlockResponse {
    /// Map a persisted block run into a response.
    ///
    /// Missing or blank text becomes [`NO_OUTPUT`].
    pub fn persisted(block_run: &BlockRun, run_id: i64) -> Self {
        let content = match block_run.llm_output_text.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => NO_OUTPUT.to_string(),
        };
        Self {
            content: Some(content),
            run_id: Some(run_id),
            is_live: false,
            ..Self::outputs_of(block_run)
        }
    }

    /// Map a just-executed block run into a live response.
    ///
    /// Live responses carry no run identity of their own; the reconciler
    /// stamps the persisted run id when one exists.
    pub fn live(block_run: &BlockRun) -> Self {
        Self {
            content: block_run.llm_output_text.clone(),
            run_id: None,
            is_live: true,
            ..Self::outputs_of(block_run)
        }
    }

    fn outputs_of(block_run: &BlockRun) -> Self {
        let outputs = block_run.named_outputs();
        Self {
            content: None,
            outputs: (!outputs.is_empty()).then_some(outputs),
            list_output: block_run.list_outputs(),
            matrix_output: block_run.matrix_outputs(),
            run_id: None,
            block_run_id: block_run.id,
            prompt_text: block_run.prompt_text.clone(),
            edited_at: block_run.edited_at,
            is_live: false,
        }
    }

    /// Text to render, falling back to [`NO_OUTPUT`].
    pub fn display_content(&self) -> &str {
        match self.content.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => NO_OUTPUT,
        }
    }
}
