//! Run operations against the execution backend.

use crate::{OptimisticEdit, SequenceSession};
use derive_getters::Getters;
use sequin_core::{BlockResponse, OutputEdit, SequenceRunResult, UsedVariable};
use sequin_error::{RunError, RunErrorKind, SequinResult, ValidationRejected};
use sequin_interface::{
    BlockRunRequest, EditOutputRequest, ExecutionBackend, RerunRequest, RunSequenceRequest,
};
use sequin_validate::{OutputValidation, validate_output};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};
use typed_builder::TypedBuilder;

/// Default bound on a single backend call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Orchestrator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct OrchestratorConfig {
    /// Bound on each backend call; exceeding it fails the operation
    #[serde(default = "default_request_timeout", with = "duration_secs")]
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    request_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// Runs sequences, blocks and reruns, and applies results to a shared
/// [`SequenceSession`].
///
/// Full sequence runs and reruns are serialized; single-block runs are
/// not. Every operation takes a cancellation token and is bounded by the
/// configured timeout. A cancelled, timed-out or failed operation leaves
/// the session as it was.
#[derive(Debug)]
pub struct RunOrchestrator<B: ExecutionBackend> {
    backend: Arc<B>,
    session: Arc<RwLock<SequenceSession>>,
    run_lock: Mutex<()>,
    config: OrchestratorConfig,
}

impl<B: ExecutionBackend> RunOrchestrator<B> {
    /// Create an orchestrator with an empty session.
    pub fn new(backend: Arc<B>, config: OrchestratorConfig) -> Self {
        Self {
            backend,
            session: Arc::new(RwLock::new(SequenceSession::new())),
            run_lock: Mutex::new(()),
            config,
        }
    }

    /// Shared session state.
    pub fn session(&self) -> &Arc<RwLock<SequenceSession>> {
        &self.session
    }

    /// Backend collaborator.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Settings.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Await a backend call under the timeout, abandoning it on cancel.
    async fn guarded<T, F>(&self, token: &CancellationToken, call: F) -> SequinResult<T>
    where
        F: Future<Output = SequinResult<T>>,
    {
        let timeout = self.config.request_timeout;
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                return Err(RunError::new(RunErrorKind::Cancelled).into());
            }
            result = tokio::time::timeout(timeout, call) => result,
        };
        let value = result.map_err(|_| RunError::new(RunErrorKind::TimedOut(timeout)))??;
        if token.is_cancelled() {
            return Err(RunError::new(RunErrorKind::Cancelled).into());
        }
        Ok(value)
    }

    /// Fetch a sequence, its blocks and its variable catalog into the session.
    #[instrument(skip(self, token))]
    pub async fn load_sequence(
        &self,
        sequence_id: i64,
        token: &CancellationToken,
    ) -> SequinResult<()> {
        let (sequence, blocks, catalog) = self
            .guarded(token, async {
                tokio::try_join!(
                    self.backend.get_sequence(sequence_id),
                    self.backend.list_blocks(sequence_id),
                    self.backend.available_variables(sequence_id),
                )
            })
            .await?;
        info!(
            blocks = blocks.len(),
            variables = catalog.len(),
            "Loaded sequence"
        );
        self.session.write().await.load(sequence, blocks, catalog);
        Ok(())
    }

    /// Refresh the catalog snapshot.
    #[instrument(skip(self, token))]
    pub async fn refresh_catalog(&self, token: &CancellationToken) -> SequinResult<()> {
        let sequence_id = self.session.read().await.sequence_id()?;
        let catalog = self
            .guarded(token, self.backend.available_variables(sequence_id))
            .await?;
        self.session.write().await.set_catalog(catalog);
        Ok(())
    }

    /// Fetch a persisted run and make it the session's run.
    #[instrument(skip(self, token))]
    pub async fn fetch_run(
        &self,
        run_id: i64,
        token: &CancellationToken,
    ) -> SequinResult<SequenceRunResult> {
        let run = self.guarded(token, self.backend.get_run(run_id)).await?;
        self.session
            .write()
            .await
            .state_mut()
            .replace_persisted(run.clone());
        Ok(run)
    }

    /// Execute every block of the loaded sequence.
    ///
    /// On success all live results are superseded and the new run becomes
    /// the persisted run.
    #[instrument(skip(self, token))]
    pub async fn run_sequence(&self, token: &CancellationToken) -> SequinResult<SequenceRunResult> {
        let _guard = self.run_lock.lock().await;
        let request = {
            let session = self.session.read().await;
            RunSequenceRequest {
                sequence_id: session.sequence_id()?,
                input_overrides: session.overrides().snapshot(),
            }
        };

        let run = self
            .guarded(token, self.backend.run_sequence(&request))
            .await
            .inspect_err(|e| error!(error = %e, "Sequence run failed"))?;

        info!(
            run_id = run.id,
            status = %run.status,
            block_runs = run.block_runs.len(),
            "Sequence run completed"
        );
        self.session
            .write()
            .await
            .state_mut()
            .commit_full_run(run.clone());
        Ok(run)
    }

    /// Execute one block with its resolved inputs and record a live result.
    ///
    /// # Errors
    ///
    /// Returns [`RunErrorKind::Superseded`] without recording anything when
    /// a full run committed or the session was reset while the block ran.
    #[instrument(skip(self, token))]
    pub async fn run_block(
        &self,
        block_id: i64,
        token: &CancellationToken,
    ) -> SequinResult<BlockResponse> {
        let (request, generation) = {
            let session = self.session.read().await;
            let request = BlockRunRequest {
                inputs: session.block_inputs(block_id)?,
            };
            (request, session.state().generation())
        };
        debug!(inputs = request.inputs.len(), generation, "Running block");

        let block_run = self
            .guarded(token, self.backend.run_block(block_id, &request))
            .await
            .inspect_err(|e| error!(error = %e, "Block run failed"))?;

        let mut session = self.session.write().await;
        let recorded = session.state_mut().record_live_if_current(
            generation,
            block_id,
            BlockResponse::live(&block_run),
        );
        if !recorded {
            warn!(
                started = generation,
                current = session.state().generation(),
                "Discarding stale block result"
            );
            return Err(RunError::new(RunErrorKind::Superseded(block_id)).into());
        }
        session
            .effective_response(block_id)
            .ok_or_else(|| RunError::new(RunErrorKind::UnknownBlock(block_id)).into())
    }

    /// Re-execute the persisted run from a block onward.
    ///
    /// Live results for the block and every later block are discarded once
    /// the backend confirms, and single-block runs still in flight are
    /// superseded.
    ///
    /// # Errors
    ///
    /// Fails without calling the backend when there is no persisted run or
    /// the run has no block run for the block.
    #[instrument(skip(self, token))]
    pub async fn rerun_from_block(
        &self,
        block_id: i64,
        token: &CancellationToken,
    ) -> SequinResult<SequenceRunResult> {
        let _guard = self.run_lock.lock().await;
        let (run_id, request, stale) = {
            let session = self.session.read().await;
            let stale = session.blocks_from(block_id)?;
            let run = session
                .persisted()
                .ok_or_else(|| RunError::new(RunErrorKind::MissingRunContext(block_id)))?;
            if run.block_run(block_id).is_none() {
                return Err(RunError::new(RunErrorKind::MissingBlockRun {
                    run_id: run.id,
                    block_id,
                })
                .into());
            }
            let request = RerunRequest {
                input_overrides: session.overrides().snapshot(),
            };
            (run.id, request, stale)
        };

        let run = self
            .guarded(
                token,
                self.backend.rerun_from_block(run_id, block_id, &request),
            )
            .await
            .inspect_err(|e| error!(error = %e, "Rerun failed"))?;

        info!(run_id = run.id, cleared = stale.len(), "Rerun completed");
        let mut session = self.session.write().await;
        session.state_mut().commit_rerun(run.clone(), &stale);
        Ok(run)
    }

    /// Validate and save a manual edit of a block's persisted output.
    ///
    /// The edited values are written to the overrides before the backend
    /// confirms and rolled back if it does not. On success the run is
    /// refetched so the session converges on the backend's record.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the edit has blocking findings, a
    /// run error when there is no persisted block run to edit, and the
    /// backend's error when the save fails.
    #[instrument(skip(self, edit, token))]
    pub async fn edit_output(
        &self,
        block_id: i64,
        edit: OutputEdit,
        token: &CancellationToken,
    ) -> SequinResult<OutputValidation> {
        let (request, report, values) = {
            let session = self.session.read().await;
            let block = session.block(block_id)?;
            let report = validate_output(block.block_type(), &edit);
            if !report.is_valid() {
                warn!(errors = report.errors.len(), "Edit rejected by validator");
                return Err(
                    ValidationRejected::new(report.errors.len(), report.format_errors()).into(),
                );
            }
            let run = session
                .persisted()
                .ok_or_else(|| RunError::new(RunErrorKind::MissingRunContext(block_id)))?;
            let block_run_id = run
                .block_run(block_id)
                .and_then(|br| br.id)
                .ok_or_else(|| {
                    RunError::new(RunErrorKind::MissingBlockRun {
                        run_id: run.id,
                        block_id,
                    })
                })?;
            let values = edit.override_values(&block.config);
            let request = EditOutputRequest {
                run_id: run.id,
                block_run_id,
                edit,
            };
            (request, report, values)
        };

        let optimistic = OptimisticEdit::apply(self.session.write().await.overrides_mut(), values);

        if let Err(e) = self
            .guarded(token, self.backend.edit_block_output(&request))
            .await
        {
            error!(error = %e, "Edit failed, rolling back");
            optimistic.rollback(self.session.write().await.overrides_mut());
            return Err(e);
        }
        optimistic.confirm();

        match self
            .guarded(token, self.backend.get_run(request.run_id))
            .await
        {
            Ok(run) => {
                let mut session = self.session.write().await;
                session.state_mut().replace_persisted(run);
                session.state_mut().clear_live_for(&[block_id]);
            }
            Err(e) => warn!(error = %e, "Edit saved but refetching the run failed"),
        }
        Ok(report)
    }

    /// Set a variable override for the next run.
    pub async fn set_override(&self, name: impl Into<String>, value: impl Into<String>) {
        self.session.write().await.overrides_mut().set(name, value);
    }

    /// What a block currently displays.
    pub async fn effective_response(&self, block_id: i64) -> Option<BlockResponse> {
        self.session.read().await.effective_response(block_id)
    }

    /// Variables a block's prompt uses.
    pub async fn used_variables(&self, block_id: i64) -> SequinResult<Vec<UsedVariable>> {
        self.session.read().await.used_variables(block_id)
    }

    /// Resolved inputs for a block.
    pub async fn block_inputs(&self, block_id: i64) -> SequinResult<BTreeMap<String, String>> {
        self.session.read().await.block_inputs(block_id)
    }

    /// Forget overrides and live results.
    pub async fn reset_session(&self) {
        debug!("Resetting session");
        self.session.write().await.reset();
    }
}
