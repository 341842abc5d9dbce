//! Core data types for the Sequin prompt-sequence engine.
//!
//! This crate provides the data model shared by the template system, the
//! validators and the run orchestrator: variable references and the
//! variables a prompt uses, the variable catalog, blocks and their typed
//! configuration, persisted runs, and the unified block response.

mod block;
mod catalog;
mod edit;
mod json;
mod overrides;
mod reference;
mod response;
mod run;
mod variable;

pub use block::{Block, BlockConfig, BlockRecord, BlockType, DEFAULT_OUTPUT_NAME, Sequence};
pub use catalog::{CatalogEntry, CatalogKind, VariableCatalog};
pub use edit::OutputEdit;
pub use json::{decode_embedded_json, value_to_text};
pub use overrides::InputOverrides;
pub use reference::{IndexExpr, VariableKind, VariableReference};
pub use response::{BlockResponse, NO_OUTPUT};
pub use run::{BlockRun, MatrixOutput, RunStatus, SequenceRunResult};
pub use variable::{UsedVariable, UsedVariableBuilder, VariableType};
