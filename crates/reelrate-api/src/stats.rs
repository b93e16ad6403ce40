//! Read-only statistics endpoints. Every value is computed from the current
//! store contents on each request.

use std::sync::Arc;

use axum::{Json, extract::State};
use reelrate_core::{
  movie::{Movie, MovieId},
  ratings::{
    RatingFilter, average_ratings, filtered_title_summary, highest,
    overall_average, sort_by_average_desc,
  },
  store::MovieStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  error::ApiError,
  extract::{ApiPath, ApiQuery},
};

fn default_threshold() -> f64 { 3.0 }

// ─── Averages ─────────────────────────────────────────────────────────────────

/// `GET /movies/average_ratings`: one entry per movie, `null` for unrated.
pub async fn averages<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Option<f64>>>, ApiError>
where
  S: MovieStore,
{
  let movies = store.get_all().await.map_err(ApiError::store)?;
  Ok(Json(average_ratings(&movies)))
}

// ─── Filter ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FilterParams {
  /// Average must be strictly greater. Default `0`.
  #[serde(default)]
  pub min_rating: f64,
  /// Case-insensitive title substring.
  pub title:      Option<String>,
}

impl From<FilterParams> for RatingFilter {
  fn from(p: FilterParams) -> Self {
    RatingFilter {
      min_rating: p.min_rating,
      title:      p.title,
    }
  }
}

/// `GET /movies/filter[?min_rating=..][&title=..]`
pub async fn filter<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<FilterParams>,
) -> Result<Json<Vec<Movie>>, ApiError>
where
  S: MovieStore,
{
  let movies = store.get_all().await.map_err(ApiError::store)?;
  Ok(Json(RatingFilter::from(params).apply(movies)))
}

#[derive(Debug, Deserialize)]
pub struct ThresholdParams {
  #[serde(default = "default_threshold")]
  pub min_rating: f64,
}

#[derive(Debug, Serialize)]
pub struct TitleSummary {
  pub titles:               Vec<String>,
  pub total_average_rating: f64,
}

/// `GET /movies/filter/titles[?min_rating=..]`, default threshold `3.0`.
pub async fn filter_titles<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<ThresholdParams>,
) -> Result<Json<TitleSummary>, ApiError>
where
  S: MovieStore,
{
  let movies = store.get_all().await.map_err(ApiError::store)?;
  let (titles, total_average_rating) =
    filtered_title_summary(&movies, params.min_rating);
  Ok(Json(TitleSummary {
    titles,
    total_average_rating,
  }))
}

// ─── Overall average ──────────────────────────────────────────────────────────

/// `GET /movies/overall_average[?min_rating=..]`
///
/// Here `min_rating` is the minimum *number* of ratings a movie needs to be
/// counted, not a rating value. Default `3`.
pub async fn overall<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<ThresholdParams>,
) -> Result<Json<f64>, ApiError>
where
  S: MovieStore,
{
  let movies = store.get_all().await.map_err(ApiError::store)?;
  Ok(Json(overall_average(&movies, params.min_rating)))
}

// ─── Sorted ───────────────────────────────────────────────────────────────────

/// `GET /movies/sorted`, highest average first.
pub async fn sorted<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Movie>>, ApiError>
where
  S: MovieStore,
{
  let movies = store.get_all().await.map_err(ApiError::store)?;
  Ok(Json(sort_by_average_desc(movies)))
}

// ─── Highest ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HighestRating {
  pub title:          String,
  pub highest_rating: Option<i64>,
}

/// `GET /movies/{id}/highest_rating`
pub async fn highest_one<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<MovieId>,
) -> Result<Json<HighestRating>, ApiError>
where
  S: MovieStore,
{
  let movie = store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(HighestRating {
    highest_rating: highest(movie.ratings.iter().copied()),
    title:          movie.title,
  }))
}
