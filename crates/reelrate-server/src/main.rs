//! reelrate server binary.
//!
//! Reads `reelrate.toml` (or the path specified with `--config`), opens the
//! SQLite movie store, and serves the JSON API over HTTP.
//!
//! Existing data is kept across restarts. Pass `--reset` to wipe the movies
//! table first, and `--seed` to load the demo catalogue:
//!
//! ```text
//! cargo run -p reelrate-server -- --reset --seed
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use reelrate_server::{ServerConfig, app, expand_tilde, load_config, prepare_store};
use reelrate_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Movie rating API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "reelrate.toml")]
  config: PathBuf,

  /// Drop and recreate the movies table before serving. Destroys all data.
  #[arg(long)]
  reset: bool,

  /// Insert the demo movie catalogue before serving.
  #[arg(long)]
  seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg: ServerConfig =
    load_config(&cli.config).context("failed to load configuration")?;
  server_cfg.reset_on_startup |= cli.reset;
  server_cfg.seed_demo_data |= cli.seed;

  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  prepare_store(&store, &server_cfg)
    .await
    .context("failed to prepare store")?;

  let app = app(Arc::new(store.clone()));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  store.close().await.context("failed to close store")?;
  tracing::info!("shut down");

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
}
