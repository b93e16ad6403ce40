//! The `MovieStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `reelrate-store-sqlite`). The API layer depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::movie::{Movie, MovieId, NewMovie};

/// Abstraction over a reelrate movie store backend.
///
/// Each mutating call commits on its own; there are no multi-call
/// transactions.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait MovieStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Drop and recreate the backing table, destroying every stored movie.
  ///
  /// Never called implicitly. Calling it twice in a row is harmless.
  fn initialize(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Persist a new movie and return the id the store assigned to it.
  fn add(
    &self,
    movie: NewMovie,
  ) -> impl Future<Output = Result<MovieId, Self::Error>> + Send + '_;

  /// Retrieve a movie by id. Returns `None` if not found.
  fn get(
    &self,
    id: MovieId,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send + '_;

  /// List every movie in store iteration order.
  fn get_all(&self) -> impl Future<Output = Result<Vec<Movie>, Self::Error>> + Send + '_;

  /// Replace the title and ratings of the movie with `movie.id`.
  ///
  /// Returns `false` if no such movie exists.
  fn update(
    &self,
    movie: Movie,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove a movie. Returns `false` if no such movie exists.
  fn delete(
    &self,
    id: MovieId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
