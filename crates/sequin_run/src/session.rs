//! In-memory state of one sequence being worked on.

use crate::{RunState, resolve_all};
use sequin_core::{
    Block, BlockResponse, InputOverrides, Sequence, SequenceRunResult, UsedVariable,
    VariableCatalog,
};
use sequin_error::{RunError, RunErrorKind, SequinResult};
use sequin_template::{derive_used_variables, reference_names};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// A loaded sequence with its catalog snapshot, overrides and run state.
///
/// Pure state: nothing here performs I/O. The orchestrator fills and
/// mutates it around backend calls.
#[derive(Debug, Clone, Default)]
pub struct SequenceSession {
    sequence: Option<Sequence>,
    blocks: Vec<Block>,
    catalog: VariableCatalog,
    overrides: InputOverrides,
    state: RunState,
}

impl SequenceSession {
    /// Empty session with no sequence loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded sequence. Blocks are kept in execution order and
    /// any previous run state and overrides are dropped.
    #[instrument(skip_all, fields(sequence_id = sequence.id, blocks = blocks.len()))]
    pub fn load(&mut self, sequence: Sequence, mut blocks: Vec<Block>, catalog: VariableCatalog) {
        blocks.sort_by_key(|block| block.position);
        self.sequence = Some(sequence);
        self.blocks = blocks;
        self.catalog = catalog;
        self.overrides.clear();
        self.state.clear();
        debug!("Loaded sequence");
    }

    /// Loaded sequence.
    pub fn sequence(&self) -> Option<&Sequence> {
        self.sequence.as_ref()
    }

    /// Loaded sequence id.
    ///
    /// # Errors
    ///
    /// Returns an error if no sequence is loaded.
    pub fn sequence_id(&self) -> SequinResult<i64> {
        self.sequence
            .as_ref()
            .map(|s| s.id)
            .ok_or_else(|| RunError::new(RunErrorKind::NoSequence).into())
    }

    /// Blocks in execution order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Catalog snapshot.
    pub fn catalog(&self) -> &VariableCatalog {
        &self.catalog
    }

    /// Replace the catalog snapshot.
    pub fn set_catalog(&mut self, catalog: VariableCatalog) {
        self.catalog = catalog;
    }

    /// User overrides.
    pub fn overrides(&self) -> &InputOverrides {
        &self.overrides
    }

    /// Mutable user overrides.
    pub fn overrides_mut(&mut self) -> &mut InputOverrides {
        &mut self.overrides
    }

    /// Run state.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Mutable run state.
    pub fn state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }

    /// Look up a loaded block.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is not part of the loaded sequence.
    pub fn block(&self, block_id: i64) -> SequinResult<&Block> {
        self.blocks
            .iter()
            .find(|block| block.id == block_id)
            .ok_or_else(|| RunError::new(RunErrorKind::UnknownBlock(block_id)).into())
    }

    /// Ids of a block and every block that executes after it.
    pub fn blocks_from(&self, block_id: i64) -> SequinResult<Vec<i64>> {
        let start = self.block(block_id)?.position;
        Ok(self
            .blocks
            .iter()
            .filter(|block| block.position >= start)
            .map(|block| block.id)
            .collect())
    }

    /// Variables a block's prompt uses, in first-appearance order.
    pub fn used_variables(&self, block_id: i64) -> SequinResult<Vec<UsedVariable>> {
        let block = self.block(block_id)?;
        Ok(derive_used_variables::<&str>(&[], &block.prompt, &self.catalog))
    }

    /// Resolved value of every variable a block's prompt uses.
    pub fn block_inputs(&self, block_id: i64) -> SequinResult<BTreeMap<String, String>> {
        let block = self.block(block_id)?;
        let names = reference_names(&block.prompt);
        Ok(resolve_all(
            &names,
            &self.overrides,
            self.state.block_runs(),
            &self.catalog,
        ))
    }

    /// What a block currently displays.
    pub fn effective_response(&self, block_id: i64) -> Option<BlockResponse> {
        self.state.effective_response(block_id)
    }

    /// Persisted run, if any.
    pub fn persisted(&self) -> Option<&SequenceRunResult> {
        self.state.persisted()
    }

    /// Forget overrides and live results, keeping the persisted run.
    pub fn reset(&mut self) {
        self.overrides.clear();
        self.state.clear_live();
    }
}
