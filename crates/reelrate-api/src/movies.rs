//! Handlers for `/movies` CRUD endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/movies` | Every movie, store order |
//! | `POST`   | `/movies` | Body: `{"title":..,"ratings":[..]}`; 201 |
//! | `GET`    | `/movies/{id}` | Movie plus its average; 404 if not found |
//! | `PUT`    | `/movies/{id}` | Full replace; 404 if not found |
//! | `DELETE` | `/movies/{id}` | 404 if not found |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use reelrate_core::{
  movie::{Movie, MovieDraft, MovieId},
  ratings::average,
  store::MovieStore,
};
use serde::Serialize;

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiPath},
};

/// `{"message": "..."}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct Message {
  pub message: &'static str,
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /movies`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Movie>>, ApiError>
where
  S: MovieStore,
{
  let movies = store.get_all().await.map_err(ApiError::store)?;
  Ok(Json(movies))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MovieWithAverage {
  pub movie:          Movie,
  pub average_rating: Option<f64>,
}

/// `GET /movies/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<MovieId>,
) -> Result<Json<MovieWithAverage>, ApiError>
where
  S: MovieStore,
{
  let movie = store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;
  let average_rating = average(&movie.ratings);
  Ok(Json(MovieWithAverage { movie, average_rating }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Created {
  pub message: &'static str,
  pub id:      MovieId,
}

/// `POST /movies`: returns 201 + `{"message":"Movie created","id":..}`.
///
/// Any `id` in the body is ignored; the store assigns one.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<MovieDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MovieStore,
{
  let new_movie = body.validate()?;
  let id = store.add(new_movie).await.map_err(ApiError::store)?;
  tracing::info!(movie_id = id, "movie created");
  Ok((
    StatusCode::CREATED,
    Json(Created {
      message: "Movie created",
      id,
    }),
  ))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /movies/{id}`: replaces title and ratings.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<MovieId>,
  ApiJson(body): ApiJson<MovieDraft>,
) -> Result<Json<Message>, ApiError>
where
  S: MovieStore,
{
  let movie = Movie::from_new(id, body.validate()?);
  let updated = store.update(movie).await.map_err(ApiError::store)?;
  if !updated {
    return Err(ApiError::NotFound);
  }
  Ok(Json(Message {
    message: "Movie updated",
  }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /movies/{id}`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<MovieId>,
) -> Result<Json<Message>, ApiError>
where
  S: MovieStore,
{
  let deleted = store.delete(id).await.map_err(ApiError::store)?;
  if !deleted {
    return Err(ApiError::NotFound);
  }
  Ok(Json(Message {
    message: "Movie deleted",
  }))
}
