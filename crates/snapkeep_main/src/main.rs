use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::Colorize;
use snapkeep_infra::{Ec2SnapshotProvider, InquireConfirm, StdoutConsole};
use snapkeep_main::{Cli, init_tracing, load_config};
use snapkeep_services::SnapshotConsole;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = init_tracing(log_directory())?;

    if let Err(err) = run(cli).await {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    let config = load_config(&config_path, &cli.profile)
        .with_context(|| format!("Failed to load profile '{}'", cli.profile))?;

    let region = cli
        .region
        .clone()
        .or_else(|| config.region.clone())
        .ok_or_else(|| anyhow!("No region configured; pass --region or set one in the config file"))?;

    let action = cli.action();
    let request = cli.to_request()?;
    tracing::info!(profile = %cli.profile, region = %region, ?action, "connecting to EC2");

    let provider = Ec2SnapshotProvider::connect(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        &region,
    )
    .await;

    let console = SnapshotConsole::new(
        Arc::new(provider),
        Arc::new(InquireConfirm::new()),
        Arc::new(StdoutConsole),
        request,
    );
    console.run(action).await
}

fn log_directory() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".snapkeep")
        .join("logs")
}
