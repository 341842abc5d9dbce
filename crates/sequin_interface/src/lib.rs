//! Trait definitions for the Sequin prompt-sequence engine.
//!
//! The execution backend owns model calls, persistence and sequencing.
//! Everything in this workspace talks to it through [`ExecutionBackend`],
//! so the run orchestrator can be exercised against in-memory fakes.

mod backend;

pub use backend::{
    BlockRunRequest, EditOutputRequest, ExecutionBackend, RerunRequest, RunSequenceRequest,
};
