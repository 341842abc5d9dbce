//! Run-state reconciliation for multi-step prompt sequences.
//!
//! - [`resolve`] picks the value a variable takes for the next run.
//! - [`RunState`] merges the persisted run with provisional single-block
//!   results.
//! - [`SequenceSession`] holds one loaded sequence and its state.
//! - [`RunOrchestrator`] performs run operations against an
//!   [`ExecutionBackend`](sequin_interface::ExecutionBackend) and commits
//!   results to the session only when they succeed.

mod optimistic;
mod orchestrator;
mod resolver;
mod session;
mod state;

pub use optimistic::OptimisticEdit;
pub use orchestrator::{DEFAULT_REQUEST_TIMEOUT, OrchestratorConfig, RunOrchestrator};
pub use resolver::{resolve, resolve_all};
pub use session::SequenceSession;
pub use state::RunState;
