use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use xvs_client::TowerClient;

mod cli;
mod config;
mod error;
mod loader;
mod logging;
mod report;
mod runner;

use config::SyncConfig;
use error::SyncError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(cli.verbosity);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<SyncError>() {
                Some(sync) => tracing::error!("{} error: {err:#}", sync.kind()),
                None => tracing::error!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &cli::Cli) -> anyhow::Result<()> {
    // Everything that can be checked locally is checked before the first request.
    let config = SyncConfig::from_cli(cli)?;
    let local = loader::load(&config.file)?;
    tracing::debug!(
        "configuration: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );

    let client = TowerClient::new(config.client.clone())
        .map_err(SyncError::from)
        .context("creating API client")?;
    let summary = runner::run_batch(&config, &client, &local).await?;
    report::print_summary(&summary, config.confirm);
    Ok(())
}
