use anyhow::Context;
use area_client::config::Config;
use area_client::stream::stream_numbers;
use area_client::{connect, run_unary_calls};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!("starting gRPC client");

    let config = Config::parse();
    config.validate().context("invalid configuration")?;
    let source = config.number_source()?;

    let mut client = connect(&config.addr)
        .await
        .with_context(|| format!("failed to connect to {}", config.addr))?;
    run_unary_calls(&mut client, &config.shapes).await?;

    let report = stream_numbers(&mut client, source, config.interval(), config.deadline()).await;
    info!(sent = report.sent, max = ?report.max, "stream finished");
    Ok(())
}
