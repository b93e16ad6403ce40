//! Server wiring for reelrate: configuration, store preparation, and the
//! top-level axum [`Router`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use reelrate_core::{movie::NewMovie, store::MovieStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `reelrate.toml` and
/// `REELRATE_*` environment variables. Every key is optional.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  /// Drop and recreate the movies table on startup. Destroys all data.
  pub reset_on_startup: bool,
  /// Insert the demo catalogue on startup.
  pub seed_demo_data:   bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:             "127.0.0.1".to_string(),
      port:             5000,
      store_path:       PathBuf::from("movie_rating.db"),
      reset_on_startup: false,
      seed_demo_data:   false,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Layer the optional TOML file at `path` under `REELRATE_*` environment
/// variables.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("REELRATE"))
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Store preparation ────────────────────────────────────────────────────────

/// The catalogue inserted by `seed_demo_data`.
pub fn demo_movies() -> Vec<NewMovie> {
  vec![
    NewMovie::new("Inception", vec![1, 2, 1]),
    NewMovie::new("The Matrix", vec![4, 5, 4]),
    NewMovie::new("Interstellar", vec![5, 5, 5]),
    NewMovie::new("The Godfather", vec![5, 4, 5]),
  ]
}

/// Apply the destructive reset and the demo seed, each only if enabled.
pub async fn prepare_store<S>(store: &S, config: &ServerConfig) -> Result<(), S::Error>
where
  S: MovieStore,
{
  if config.reset_on_startup {
    tracing::warn!("reset_on_startup is set; dropping all stored movies");
    store.initialize().await?;
  }

  if config.seed_demo_data {
    let movies = demo_movies();
    let count = movies.len();
    for movie in movies {
      store.add(movie).await?;
    }
    tracing::info!(count, "seeded demo movies");
  }

  Ok(())
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with HTTP request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: MovieStore + 'static,
{
  reelrate_api::api_router(store).layer(TraceLayer::new_for_http())
}
