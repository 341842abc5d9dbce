//! Sequence run command handlers.

use super::parse_assignments;
use sequin_client::{BackendConfig, HttpBackend};
use sequin_run::{OrchestratorConfig, RunOrchestrator};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Load backend settings from a config file if given, else the environment.
fn load_backend_config(config: Option<&Path>) -> anyhow::Result<BackendConfig> {
    let config = match config {
        Some(path) => BackendConfig::from_file(path)?,
        None => BackendConfig::from_env()?,
    };
    Ok(config)
}

/// Build an orchestrator, load the sequence and apply overrides.
async fn prepare(
    config: Option<&Path>,
    sequence_id: i64,
    overrides: &[String],
    token: &CancellationToken,
) -> anyhow::Result<RunOrchestrator<HttpBackend>> {
    let backend_config = load_backend_config(config)?;
    let orchestrator_config = OrchestratorConfig::builder()
        .request_timeout(backend_config.request_timeout())
        .build();
    let backend = Arc::new(HttpBackend::new(backend_config)?);
    let orchestrator = RunOrchestrator::new(backend, orchestrator_config);

    orchestrator.load_sequence(sequence_id, token).await?;
    for (name, value) in parse_assignments(overrides)? {
        orchestrator.set_override(name, value).await;
    }
    Ok(orchestrator)
}

/// Cancellation token that fires on Ctrl-C.
fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            child.cancel();
        }
    });
    token
}

async fn print_responses(orchestrator: &RunOrchestrator<HttpBackend>) {
    let session = orchestrator.session().read().await;
    for block in session.blocks() {
        println!("== {} (block {}) ==", block.name, block.id);
        match session.effective_response(block.id) {
            Some(response) => {
                println!("{}", response.display_content());
                for (name, value) in response.outputs.iter().flatten() {
                    println!("  {} = {}", name, value);
                }
            }
            None => println!("(not run)"),
        }
        println!();
    }
}

/// Handles the run command.
#[tracing::instrument(skip(config, overrides))]
pub async fn handle_run_command(
    config: Option<&Path>,
    sequence: i64,
    overrides: &[String],
) -> anyhow::Result<()> {
    let token = interrupt_token();
    let orchestrator = prepare(config, sequence, overrides, &token).await?;

    let run = orchestrator.run_sequence(&token).await?;
    info!(run_id = run.id, status = %run.status, "Run finished");
    println!("Run {} ({})\n", run.id, run.status);
    print_responses(&orchestrator).await;
    Ok(())
}

/// Handles the rerun command.
#[tracing::instrument(skip(config, overrides))]
pub async fn handle_rerun_command(
    config: Option<&Path>,
    sequence: i64,
    run: i64,
    block: i64,
    overrides: &[String],
) -> anyhow::Result<()> {
    let token = interrupt_token();
    let orchestrator = prepare(config, sequence, overrides, &token).await?;

    orchestrator.fetch_run(run, &token).await?;
    let rerun = orchestrator.rerun_from_block(block, &token).await?;
    info!(run_id = rerun.id, status = %rerun.status, "Rerun finished");
    println!("Run {} ({})\n", rerun.id, rerun.status);
    print_responses(&orchestrator).await;
    Ok(())
}

/// Handles the inputs command.
#[tracing::instrument(skip(config, overrides))]
pub async fn handle_inputs_command(
    config: Option<&Path>,
    sequence: i64,
    block: i64,
    run: Option<i64>,
    overrides: &[String],
) -> anyhow::Result<()> {
    let token = interrupt_token();
    let orchestrator = prepare(config, sequence, overrides, &token).await?;
    if let Some(run) = run {
        orchestrator.fetch_run(run, &token).await?;
    }

    let variables = orchestrator.used_variables(block).await?;
    let inputs = orchestrator.block_inputs(block).await?;
    for variable in variables {
        let value = inputs
            .get(variable.name())
            .map(String::as_str)
            .unwrap_or_default();
        println!("{} ({}) = {}", variable.name(), variable.var_type(), value);
    }
    Ok(())
}
