use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use passforged::{cfg::Cfg, program};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Cfg::from_env();
    let deps = program::Deps::new(&cfg)?;

    let listener = TcpListener::bind((cfg.host.as_str(), cfg.port)).await?;
    info!("listening on {}:{}", cfg.host, cfg.port);

    program::run(deps, listener).await
}
