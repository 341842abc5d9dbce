//! Reconciliation of persisted and live block results.

use sequin_core::{BlockResponse, BlockRun, SequenceRunResult};
use std::collections::HashMap;
use tracing::debug;

/// Persisted run plus the provisional results of single-block runs.
///
/// The generation counter advances whenever live results are superseded
/// wholesale. A single-block result computed under an older generation is
/// stale and must not be recorded.
///
/// # Examples
///
/// ```
/// use sequin_core::{BlockResponse, BlockRun, RunStatus, SequenceRunResult};
/// use sequin_run::RunState;
///
/// let mut run = SequenceRunResult::new(9, RunStatus::Completed);
/// run.block_runs.push(BlockRun { block_id: 42, ..Default::default() });
///
/// let mut state = RunState::new();
/// state.commit_full_run(run);
/// state.record_live(42, BlockResponse::live(&BlockRun {
///     block_id: 42,
///     llm_output_text: Some("fresh".into()),
///     ..Default::default()
/// }));
///
/// let effective = state.effective_response(42).unwrap();
/// assert!(effective.is_live);
/// assert_eq!(effective.run_id, Some(9));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunState {
    persisted: Option<SequenceRunResult>,
    live: HashMap<i64, BlockResponse>,
    generation: u64,
}

impl RunState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Authoritative run, if any.
    pub fn persisted(&self) -> Option<&SequenceRunResult> {
        self.persisted.as_ref()
    }

    /// Persisted run id, if any.
    pub fn run_id(&self) -> Option<i64> {
        self.persisted.as_ref().map(|run| run.id)
    }

    /// Block runs of the persisted run in execution order.
    pub fn block_runs(&self) -> &[BlockRun] {
        self.persisted
            .as_ref()
            .map(|run| run.block_runs.as_slice())
            .unwrap_or_default()
    }

    /// Live response for a block, without reconciliation.
    pub fn live(&self, block_id: i64) -> Option<&BlockResponse> {
        self.live.get(&block_id)
    }

    /// Current generation of the live map.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live entries.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// What a block displays: its live entry if present, otherwise its
    /// persisted block run. The run id always comes from the persisted run.
    pub fn effective_response(&self, block_id: i64) -> Option<BlockResponse> {
        let run_id = self.run_id();
        if let Some(live) = self.live.get(&block_id) {
            let mut response = live.clone();
            response.run_id = run_id;
            return Some(response);
        }
        let run = self.persisted.as_ref()?;
        run.block_run(block_id)
            .map(|block_run| BlockResponse::persisted(block_run, run.id))
    }

    /// Apply a completed full sequence run: live results are superseded.
    pub fn commit_full_run(&mut self, run: SequenceRunResult) {
        debug!(
            run_id = run.id,
            superseded = self.live.len(),
            "Committing full sequence run"
        );
        self.live.clear();
        self.generation += 1;
        self.persisted = Some(run);
    }

    /// Record a single-block result. The persisted run is untouched.
    pub fn record_live(&mut self, block_id: i64, response: BlockResponse) {
        self.live.insert(block_id, response);
    }

    /// Record a single-block result started under `generation`.
    ///
    /// Returns false, leaving the state unchanged, when live results were
    /// superseded after the block run started.
    pub fn record_live_if_current(
        &mut self,
        generation: u64,
        block_id: i64,
        response: BlockResponse,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.record_live(block_id, response);
        true
    }

    /// Apply a rerun from some block: the run is replaced and the live
    /// entries of `stale` blocks are dropped. Single-block runs still in
    /// flight were started against the old run and are superseded.
    pub fn commit_rerun(&mut self, run: SequenceRunResult, stale: &[i64]) {
        debug!(run_id = run.id, cleared = stale.len(), "Committing rerun");
        self.clear_live_for(stale);
        self.generation += 1;
        self.persisted = Some(run);
    }

    /// Replace the persisted run, keeping live entries.
    pub fn replace_persisted(&mut self, run: SequenceRunResult) {
        self.persisted = Some(run);
    }

    /// Drop live entries for the given blocks.
    pub fn clear_live_for(&mut self, block_ids: &[i64]) {
        for block_id in block_ids {
            self.live.remove(block_id);
        }
    }

    /// Drop every live entry.
    pub fn clear_live(&mut self) {
        self.live.clear();
        self.generation += 1;
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.clear_live();
        self.persisted = None;
    }
}
