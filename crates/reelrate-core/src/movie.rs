//! Movie records, the only entity in the store.
//!
//! A movie owns an ordered list of integer ratings. Ratings carry no declared
//! range; callers may submit negative values or values above five.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Store-assigned primary key.
pub type MovieId = i64;

// ─── Movie ───────────────────────────────────────────────────────────────────

/// A persisted movie. `id` never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
  pub id:      MovieId,
  pub title:   String,
  /// Order as received; duplicates allowed.
  pub ratings: Vec<i64>,
}

impl Movie {
  /// Attach a store-assigned id to a not-yet-persisted movie.
  pub fn from_new(id: MovieId, new: NewMovie) -> Self {
    Self {
      id,
      title: new.title,
      ratings: new.ratings,
    }
  }
}

// ─── NewMovie ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::MovieStore::add`]. The id is always assigned by
/// the store and cannot be supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
  pub title:   String,
  pub ratings: Vec<i64>,
}

impl NewMovie {
  pub fn new(title: impl Into<String>, ratings: Vec<i64>) -> Self {
    Self {
      title: title.into(),
      ratings,
    }
  }
}

// ─── MovieDraft ──────────────────────────────────────────────────────────────

/// A movie body as received from a client, before validation.
///
/// Both fields are required; an absent or `null` field is reported as
/// [`Error::MissingField`] instead of a deserialisation failure so the caller
/// can tell which field was missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieDraft {
  pub title:   Option<String>,
  pub ratings: Option<Vec<i64>>,
}

impl MovieDraft {
  pub fn validate(self) -> Result<NewMovie> {
    let title = self.title.ok_or(Error::MissingField("title"))?;
    let ratings = self.ratings.ok_or(Error::MissingField("ratings"))?;
    Ok(NewMovie { title, ratings })
  }
}
