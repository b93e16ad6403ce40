//! Error types for `reelrate-core`.

use thiserror::Error;

/// Validation failures for caller-supplied movie data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("missing required field: {0}")]
  MissingField(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
