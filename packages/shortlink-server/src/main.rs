use anyhow::Context;
use clap::Parser;
use shortlink_core::ShortcutIndex;
use shortlink_server::config::Cli;
use shortlink_server::{serve, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve().context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    // No index, no service
    let index = match ShortcutIndex::open(&config.index_path, config.index_options()) {
        Ok(index) => index,
        Err(e) => {
            tracing::error!(path = %config.index_path.display(), error = %e, "Cannot open shortcut index");
            return Err(e).context("failed to open shortcut index");
        }
    };

    let state = AppState::new(index, &config)?;
    serve(state, &config.bind_addr()).await
}
