//! Execution backend trait and request payloads.

use async_trait::async_trait;
use sequin_core::{Block, BlockRun, OutputEdit, Sequence, SequenceRunResult, VariableCatalog};
use sequin_error::SequinResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of a full sequence run request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSequenceRequest {
    /// Sequence to execute
    pub sequence_id: i64,
    /// User-supplied variable values
    pub input_overrides: BTreeMap<String, String>,
}

/// Body of a single block run request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRunRequest {
    /// Resolved value for every variable the block's prompt uses
    pub inputs: BTreeMap<String, String>,
}

/// Body of a rerun-from-block request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RerunRequest {
    /// User-supplied variable values
    pub input_overrides: BTreeMap<String, String>,
}

/// Identifies the block run an edit applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOutputRequest {
    /// Persisted run
    pub run_id: i64,
    /// Block run within that run
    pub block_run_id: i64,
    /// Replacement output
    pub edit: OutputEdit,
}

/// The external execution and persistence service.
///
/// Implementations perform network I/O; every method may fail with an
/// HTTP, backend or JSON error. None of them retry.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Fetch a sequence.
    async fn get_sequence(&self, sequence_id: i64) -> SequinResult<Sequence>;

    /// Fetch a sequence's blocks.
    async fn list_blocks(&self, sequence_id: i64) -> SequinResult<Vec<Block>>;

    /// Fetch the variables a sequence's prompts may reference.
    async fn available_variables(&self, sequence_id: i64) -> SequinResult<VariableCatalog>;

    /// Execute every block of a sequence and persist the run.
    async fn run_sequence(&self, request: &RunSequenceRequest) -> SequinResult<SequenceRunResult>;

    /// Execute one block without touching the persisted run.
    async fn run_block(&self, block_id: i64, request: &BlockRunRequest) -> SequinResult<BlockRun>;

    /// Re-execute a run starting at a block, reusing earlier outputs.
    async fn rerun_from_block(
        &self,
        run_id: i64,
        block_id: i64,
        request: &RerunRequest,
    ) -> SequinResult<SequenceRunResult>;

    /// Replace the stored output of a block run.
    async fn edit_block_output(&self, request: &EditOutputRequest) -> SequinResult<()>;

    /// Fetch a run with its block runs.
    async fn get_run(&self, run_id: i64) -> SequinResult<SequenceRunResult>;
}
