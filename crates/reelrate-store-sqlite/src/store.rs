//! [`SqliteStore`], the SQLite implementation of [`MovieStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::debug;

use reelrate_core::{
  movie::{Movie, MovieId, NewMovie},
  store::MovieStore,
};

use crate::{
  encode::{encode_ratings, RawMovie},
  schema::{CREATE_MOVIES, DROP_MOVIES, PRAGMAS},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A movie store backed by a single SQLite file.
///
/// Cloning is cheap. Every clone shares one connection, and every statement
/// runs on that connection's background thread, so concurrent callers are
/// serialised there.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`. Existing data is kept; the `movies`
  /// table is only created if missing.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(PRAGMAS)?;
        conn.execute_batch(CREATE_MOVIES)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Close the underlying connection. Any later call on this store or one of
  /// its clones returns [`Error::Database`].
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    debug!("store connection closed");
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn conn_for_tests(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

// ─── MovieStore impl ─────────────────────────────────────────────────────────

impl MovieStore for SqliteStore {
  type Error = Error;

  async fn initialize(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(DROP_MOVIES)?;
        conn.execute_batch(CREATE_MOVIES)?;
        Ok(())
      })
      .await?;
    debug!("movies table recreated");
    Ok(())
  }

  async fn add(&self, movie: NewMovie) -> Result<MovieId> {
    let ratings_str = encode_ratings(&movie.ratings);
    let title = movie.title;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO movies (title, ratings) VALUES (?1, ?2)",
          rusqlite::params![title, ratings_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    debug!(movie_id = id, "movie added");
    Ok(id)
  }

  async fn get(&self, id: MovieId) -> Result<Option<Movie>> {
    let raw: Option<RawMovie> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, title, ratings FROM movies WHERE id = ?1",
              rusqlite::params![id],
              RawMovie::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawMovie::into_movie))
  }

  async fn get_all(&self) -> Result<Vec<Movie>> {
    let raws: Vec<RawMovie> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, title, ratings FROM movies ORDER BY id")?;
        let rows = stmt
          .query_map([], RawMovie::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawMovie::into_movie).collect())
  }

  async fn update(&self, movie: Movie) -> Result<bool> {
    let ratings_str = encode_ratings(&movie.ratings);
    let Movie { id, title, .. } = movie;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE movies SET title = ?1, ratings = ?2 WHERE id = ?3",
          rusqlite::params![title, ratings_str, id],
        )?)
      })
      .await?;

    debug!(movie_id = id, changed, "movie update");
    Ok(changed > 0)
  }

  async fn delete(&self, id: MovieId) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM movies WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    debug!(movie_id = id, removed, "movie delete");
    Ok(removed > 0)
  }
}
