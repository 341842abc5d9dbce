//! Sequin command-line entry point.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration from the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.json);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Refs { template } => cli::handle_refs_command(&template),
        Commands::Reorder { template, order } => cli::handle_reorder_command(&template, &order),
        Commands::Validate {
            block_type,
            fields,
            items,
            content,
            format,
        } => cli::handle_validate_command(block_type, &fields, &items, content, format),
        Commands::Run {
            sequence,
            overrides,
        } => cli::handle_run_command(config, sequence, &overrides).await,
        Commands::Rerun {
            sequence,
            run,
            block,
            overrides,
        } => cli::handle_rerun_command(config, sequence, run, block, &overrides).await,
        Commands::Inputs {
            sequence,
            block,
            run,
            overrides,
        } => cli::handle_inputs_command(config, sequence, block, run, &overrides).await,
    }
}

/// Install the fmt subscriber on stderr, filtered by `RUST_LOG` (default `info`).
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
