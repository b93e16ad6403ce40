//! JSON REST API for reelrate.
//!
//! Exposes an axum [`Router`] backed by any
//! [`reelrate_core::store::MovieStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = reelrate_api::api_router(Arc::new(store));
//! ```

pub mod error;
pub mod extract;
pub mod movies;
pub mod stats;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use reelrate_core::store::MovieStore;
use serde_json::{Value, json};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: MovieStore + 'static,
{
  Router::new()
    .route("/", get(index))
    // CRUD
    .route("/movies", get(movies::list::<S>).post(movies::create::<S>))
    .route(
      "/movies/{id}",
      get(movies::get_one::<S>)
        .put(movies::update_one::<S>)
        .delete(movies::delete_one::<S>),
    )
    // Statistics
    .route("/movies/average_ratings", get(stats::averages::<S>))
    .route("/movies/filter", get(stats::filter::<S>))
    .route("/movies/filter/titles", get(stats::filter_titles::<S>))
    .route("/movies/overall_average", get(stats::overall::<S>))
    .route("/movies/sorted", get(stats::sorted::<S>))
    .route("/movies/{id}/highest_rating", get(stats::highest_one::<S>))
    .with_state(store)
}

/// `GET /`: every route this API serves, grouped by method.
async fn index() -> Json<Value> {
  Json(json!({
    "GET": [
      "/movies - Get all movies",
      "/movies/average_ratings - Get the average rating of every movie",
      "/movies/filter?min_rating=<value>&title=<value> - Filter movies by average rating and title",
      "/movies/filter/titles?min_rating=<value> - Titles above a rating, with their summed averages",
      "/movies/overall_average?min_rating=<count> - Overall average over movies with enough ratings",
      "/movies/sorted - Get movies sorted by average rating",
      "/movies/<id> - Get a movie by id",
      "/movies/<id>/highest_rating - Get the highest rating of a movie",
    ],
    "POST": ["/movies - Add a new movie"],
    "PUT": ["/movies/<id> - Update a movie"],
    "DELETE": ["/movies/<id> - Delete a movie"],
  }))
}

// ─── Integration tests ────────────────────────────────────────────────────────
