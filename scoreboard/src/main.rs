use clap::Parser;
use metrics_exporter_statsd::StatsdBuilder;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use store::client::RedisConnector;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser)]
#[command(
    name = "scoreboard",
    about = "Leaderboard API over an ordered key-value store"
)]
struct Cli {
    /// Path to the YAML configuration file. Defaults plus VALKEY_*
    /// environment overrides are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = config::Config::load(cli.config.as_deref())?;

    if let Some(metrics_config) = &config.metrics {
        install_statsd(metrics_config)?;
    }
    shared::metrics_defs::describe(gateway::metrics_defs::ALL_METRICS);
    shared::metrics_defs::describe(store::metrics_defs::ALL_METRICS);

    tracing::info!(
        store_host = %config.store.host,
        store_port = config.store.port,
        "starting scoreboard service"
    );

    let connector = RedisConnector::new(config.store.clone());
    gateway::run(&config.listener, Arc::new(connector)).await?;
    Ok(())
}

fn install_statsd(config: &config::MetricsConfig) -> Result<(), Box<dyn Error>> {
    let recorder = StatsdBuilder::from(config.statsd_host.as_str(), config.statsd_port)
        .build(Some("scoreboard"))?;
    if metrics::set_global_recorder(recorder).is_err() {
        tracing::warn!("a metrics recorder was already installed");
        return Ok(());
    }
    tracing::info!(
        statsd_host = %config.statsd_host,
        statsd_port = config.statsd_port,
        "statsd metrics enabled"
    );
    Ok(())
}
