//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use sequin_core::BlockType;
use std::path::PathBuf;

/// Sequin - prompt sequence templates, validation and runs
#[derive(Parser, Debug)]
#[command(name = "sequin")]
#[command(about = "Inspect prompt templates, validate outputs and run prompt sequences")]
#[command(version)]
pub struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend config file with a [backend] table (defaults to environment)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the variable references in a template
    Refs {
        /// Template text
        template: String,
    },

    /// Move a template's variables to its tail in a new order
    Reorder {
        /// Template text
        template: String,

        /// New order, comma-separated (must name every variable once)
        #[arg(long, value_delimiter = ',', required = true)]
        order: Vec<String>,
    },

    /// Validate an edited block output
    Validate {
        /// Block type: standard, discretization, single_list or multi_list
        #[arg(long)]
        block_type: BlockType,

        /// Named output as name=value (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,

        /// List item (repeatable)
        #[arg(long = "item")]
        items: Vec<String>,

        /// Response text
        #[arg(long)]
        content: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: ValidationOutputFormat,
    },

    /// Run every block of a sequence
    Run {
        /// Sequence id
        #[arg(long)]
        sequence: i64,

        /// Variable override as name=value (repeatable)
        #[arg(long = "set")]
        overrides: Vec<String>,
    },

    /// Re-run a persisted run starting at a block
    Rerun {
        /// Sequence id
        #[arg(long)]
        sequence: i64,

        /// Persisted run id
        #[arg(long)]
        run: i64,

        /// Block to rerun from
        #[arg(long)]
        block: i64,

        /// Variable override as name=value (repeatable)
        #[arg(long = "set")]
        overrides: Vec<String>,
    },

    /// Print the resolved inputs for a block
    Inputs {
        /// Sequence id
        #[arg(long)]
        sequence: i64,

        /// Block id
        #[arg(long)]
        block: i64,

        /// Resolve against this persisted run's outputs
        #[arg(long)]
        run: Option<i64>,

        /// Variable override as name=value (repeatable)
        #[arg(long = "set")]
        overrides: Vec<String>,
    },
}

/// Output format for validation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValidationOutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
