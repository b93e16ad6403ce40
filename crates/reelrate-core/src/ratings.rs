//! Rating statistics computed on demand from a movie's ratings list.
//!
//! Everything here is pure. "No value" is expressed as `None`; an empty
//! ratings list never causes a division by zero.

use std::cmp::Ordering;

use crate::movie::Movie;

// ─── Per-movie ───────────────────────────────────────────────────────────────

/// Arithmetic mean rounded to two decimal places, or `None` when `ratings` is
/// empty.
pub fn average(ratings: &[i64]) -> Option<f64> {
  if ratings.is_empty() {
    return None;
  }
  let sum: i128 = ratings.iter().map(|&r| i128::from(r)).sum();
  let mean = sum as f64 / ratings.len() as f64;
  Some(round2(mean))
}

/// Highest rating after discarding `None` entries.
///
/// Accepts plain `i64` items as well as `Option<i64>`, so both a stored
/// ratings list and a list with missing entries can be passed directly.
pub fn highest<I>(ratings: I) -> Option<i64>
where
  I: IntoIterator,
  I::Item: Into<Option<i64>>,
{
  ratings.into_iter().filter_map(Into::into).max()
}

fn round2(value: f64) -> f64 { (value * 100.0).round() / 100.0 }

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Threshold filter over movies, with an optional title substring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingFilter {
  /// A movie matches only if its average is strictly greater than this.
  pub min_rating: f64,
  /// Case-insensitive substring the title must contain, if set.
  pub title:      Option<String>,
}

impl RatingFilter {
  pub fn new(min_rating: f64) -> Self {
    Self {
      min_rating,
      title: None,
    }
  }

  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn matches(&self, movie: &Movie) -> bool {
    if !matches_min_rating(movie, self.min_rating) {
      return false;
    }
    match &self.title {
      Some(needle) => movie
        .title
        .to_lowercase()
        .contains(&needle.to_lowercase()),
      None => true,
    }
  }

  /// Keep the movies that match, preserving their order.
  pub fn apply(&self, movies: Vec<Movie>) -> Vec<Movie> {
    movies.into_iter().filter(|m| self.matches(m)).collect()
  }
}

/// `true` iff the movie's average strictly exceeds `threshold`. A movie with
/// no ratings has no average and never matches.
pub fn matches_min_rating(movie: &Movie, threshold: f64) -> bool {
  average(&movie.ratings).is_some_and(|avg| avg > threshold)
}

/// Titles of the movies whose average exceeds `min_rating`, together with the
/// sum of those movies' averages.
pub fn filtered_title_summary(
  movies: &[Movie],
  min_rating: f64,
) -> (Vec<String>, f64) {
  movies
    .iter()
    .filter(|m| matches_min_rating(m, min_rating))
    .fold((Vec::new(), 0.0), |(mut titles, total), movie| {
      let avg = average(&movie.ratings).unwrap_or_default();
      titles.push(movie.title.clone());
      (titles, total + avg)
    })
}

// ─── Collections ─────────────────────────────────────────────────────────────

/// The average of every movie, in input order.
pub fn average_ratings(movies: &[Movie]) -> Vec<Option<f64>> {
  movies.iter().map(|m| average(&m.ratings)).collect()
}

/// Stable sort by descending average. Unrated movies go last; ties keep their
/// input order.
pub fn sort_by_average_desc(mut movies: Vec<Movie>) -> Vec<Movie> {
  movies.sort_by(compare_averages_desc);
  movies
}

fn compare_averages_desc(a: &Movie, b: &Movie) -> Ordering {
  let key = |m: &Movie| average(&m.ratings).unwrap_or(f64::NEG_INFINITY);
  key(b).total_cmp(&key(a))
}

/// Mean of the per-movie averages over movies that have at least `min_count`
/// ratings. Note that `min_count` is a ratings *count*, not a rating value.
///
/// Returns `0.0` when no movie qualifies.
pub fn overall_average(movies: &[Movie], min_count: f64) -> f64 {
  let averages: Vec<f64> = movies
    .iter()
    .filter(|m| m.ratings.len() as f64 >= min_count)
    .filter_map(|m| average(&m.ratings))
    .collect();

  if averages.is_empty() {
    0.0
  } else {
    averages.iter().sum::<f64>() / averages.len() as f64
  }
}
