use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gsi_proto::Snapshot;
use gsi_server::{serve, ServerConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Dota 2 game state integration listener", long_about = None)]
struct Cli {
    /// Address to listen on, e.g. `:3000`, `localhost:3000/gsi` or `http://0.0.0.0:4000`.
    #[arg(long)]
    listen: Option<String>,
    /// JSON config file. Overrides `GSI_CONFIG_PATH`.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::load()?,
    };
    if let Some(listen) = cli.listen {
        config = config.with_listen(listen);
    }

    serve(&config, log_update).await?;
    Ok(())
}

fn log_update(snapshot: Snapshot) -> anyhow::Result<()> {
    let clock = snapshot
        .map
        .as_ref()
        .map(|map| map.clock_time.num_seconds());
    let game_state = snapshot.map.as_ref().map(|map| map.game_state.to_string());
    let hero = snapshot.hero.as_ref().map(|hero| hero.name.as_str());

    info!(
        target: "gsi::server",
        ?clock,
        ?game_state,
        ?hero,
        level = ?snapshot.hero_level(),
        gold_after_death = snapshot.gold_after_death(),
        can_buyback = snapshot.can_afford_buyback(),
        has_previous = snapshot.previous.is_some(),
        has_added = snapshot.added.is_some(),
        "update.received"
    );
    Ok(())
}
