//! Sequin: variable-reference templates and run-state reconciliation for
//! multi-step prompt sequences.
//!
//! A sequence is an ordered list of blocks. Each block's prompt references
//! variables with `<<name>>` tokens; the values come from user overrides,
//! earlier blocks' outputs or catalog defaults. This crate re-exports the
//! workspace:
//!
//! - `sequin_template`: reference parsing and variable ordering
//! - `sequin_validate`: output validators and edit sessions
//! - `sequin_run`: value resolution, run state and the run orchestrator
//! - `sequin_client`: the HTTP execution backend
//!
//! # Example
//!
//! ```
//! use sequin::{VariableOrder, parse_references};
//!
//! let refs = parse_references("Compare <<a>> and <<b>>.");
//! assert_eq!(refs.len(), 2);
//!
//! let mut order = VariableOrder::new("Compare <<a>> and <<b>>.");
//! order.reorder(&["b", "a"]).unwrap();
//! assert_eq!(order.template(), "Compare and . <<b>> <<a>>");
//! ```

pub use sequin_client::*;
pub use sequin_core::*;
pub use sequin_error::*;
pub use sequin_interface::*;
pub use sequin_run::*;
pub use sequin_template::*;
pub use sequin_validate::*;
