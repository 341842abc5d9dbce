//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the sequin binary.

mod commands;
mod run;
mod template;
mod validate;

pub use commands::{Cli, Commands, ValidationOutputFormat};
pub use run::{handle_inputs_command, handle_rerun_command, handle_run_command};
pub use template::{handle_refs_command, handle_reorder_command};
pub use validate::handle_validate_command;

/// Split `name=value` arguments into pairs.
pub(crate) fn parse_assignments(args: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(name, value)| (name.trim().to_string(), value.to_string()))
                .filter(|(name, _)| !name.is_empty())
                .ok_or_else(|| anyhow::anyhow!("Expected name=value, got '{}'", arg))
        })
        .collect()
}
