//! Encoding and decoding between [`Movie`] and the plain-text columns stored
//! in SQLite.
//!
//! Ratings are stored as comma-joined integers (`4,5,5`). The empty list is
//! stored as the empty string.

use reelrate_core::movie::{Movie, MovieId};

// ─── Ratings ─────────────────────────────────────────────────────────────────

pub fn encode_ratings(ratings: &[i64]) -> String {
  ratings
    .iter()
    .map(i64::to_string)
    .collect::<Vec<_>>()
    .join(",")
}

/// Result of decoding a `ratings` column.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DecodedRatings {
  pub ratings:   Vec<i64>,
  /// Number of tokens that were not valid integers and were dropped.
  pub discarded: usize,
}

/// Decode a `ratings` column. Never fails: tokens that do not parse as
/// integers are dropped and counted in [`DecodedRatings::discarded`].
pub fn decode_ratings(s: &str) -> DecodedRatings {
  // Splitting "" yields one empty token; treat it as no ratings instead.
  if s.trim().is_empty() {
    return DecodedRatings::default();
  }

  let mut decoded = DecodedRatings::default();
  for token in s.split(',') {
    match token.trim().parse::<i64>() {
      Ok(r) => decoded.ratings.push(r),
      Err(_) => decoded.discarded += 1,
    }
  }
  decoded
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `movies` row. Both text columns are
/// nullable in the schema.
pub struct RawMovie {
  pub id:      MovieId,
  pub title:   Option<String>,
  pub ratings: Option<String>,
}

impl RawMovie {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:      row.get(0)?,
      title:   row.get(1)?,
      ratings: row.get(2)?,
    })
  }

  pub fn into_movie(self) -> Movie {
    let decoded = decode_ratings(self.ratings.as_deref().unwrap_or_default());
    if decoded.discarded > 0 {
      tracing::warn!(
        movie_id = self.id,
        discarded = decoded.discarded,
        "dropped unparseable tokens from stored ratings"
      );
    }

    Movie {
      id:      self.id,
      title:   self.title.unwrap_or_default(),
      ratings: decoded.ratings,
    }
  }
}
