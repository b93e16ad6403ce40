//! Integration tests for `SqliteStore` against an in-memory database.

use reelrate_core::{
  movie::{Movie, NewMovie},
  store::MovieStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// Write a raw `ratings` column, bypassing the encoder.
async fn insert_raw(s: &SqliteStore, title: &str, ratings: Option<&str>) -> i64 {
  let title = title.to_string();
  let ratings = ratings.map(str::to_string);
  s.conn_for_tests()
    .call(move |conn| {
      conn.execute(
        "INSERT INTO movies (title, ratings) VALUES (?1, ?2)",
        rusqlite::params![title, ratings],
      )?;
      Ok(conn.last_insert_rowid())
    })
    .await
    .unwrap()
}

// ─── Create / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_movie() {
  let s = store().await;

  let id = s.add(NewMovie::new("Dune", vec![4, 5, 5])).await.unwrap();
  let fetched = s.get(id).await.unwrap().expect("movie exists");

  assert_eq!(fetched.id, id);
  assert_eq!(fetched.title, "Dune");
  assert_eq!(fetched.ratings, [4, 5, 5]);
}

#[tokio::test]
async fn add_assigns_distinct_ids() {
  let s = store().await;
  let a = s.add(NewMovie::new("A", vec![1])).await.unwrap();
  let b = s.add(NewMovie::new("A", vec![1])).await.unwrap();
  assert_ne!(a, b);
}

#[tokio::test]
async fn empty_ratings_round_trip() {
  let s = store().await;
  let id = s.add(NewMovie::new("Unrated", vec![])).await.unwrap();
  let fetched = s.get(id).await.unwrap().unwrap();
  assert!(fetched.ratings.is_empty());
}

#[tokio::test]
async fn out_of_range_ratings_are_stored_verbatim() {
  let s = store().await;
  let id = s.add(NewMovie::new("Odd", vec![-2, 0, 11, 11])).await.unwrap();
  let fetched = s.get(id).await.unwrap().unwrap();
  assert_eq!(fetched.ratings, [-2, 0, 11, 11]);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn get_all_returns_insertion_order() {
  let s = store().await;
  s.add(NewMovie::new("Inception", vec![1, 2, 1])).await.unwrap();
  s.add(NewMovie::new("The Matrix", vec![4, 5, 4])).await.unwrap();
  s.add(NewMovie::new("Interstellar", vec![])).await.unwrap();

  let all = s.get_all().await.unwrap();
  let titles: Vec<&str> = all.iter().map(|m| m.title.as_str()).collect();
  assert_eq!(titles, ["Inception", "The Matrix", "Interstellar"]);
  assert_eq!(all[1].ratings, [4, 5, 4]);
  assert!(all[2].ratings.is_empty());
}

// ─── Corrupt rows ────────────────────────────────────────────────────────────

#[tokio::test]
async fn corrupt_ratings_fall_back_to_valid_tokens() {
  let s = store().await;
  let id = insert_raw(&s, "Broken", Some("3,abc,4")).await;
  let fetched = s.get(id).await.unwrap().unwrap();
  assert_eq!(fetched.ratings, [3, 4]);
}

#[tokio::test]
async fn null_columns_read_as_empty() {
  let s = store().await;
  let id = insert_raw(&s, "Nothing", None).await;
  let all = s.get_all().await.unwrap();
  let movie = all.into_iter().find(|m| m.id == id).unwrap();
  assert!(movie.ratings.is_empty());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_title_and_ratings() {
  let s = store().await;
  let id = s.add(NewMovie::new("Draft", vec![1])).await.unwrap();

  let changed = s
    .update(Movie {
      id,
      title: "Final".into(),
      ratings: vec![5, 4],
    })
    .await
    .unwrap();
  assert!(changed);

  let fetched = s.get(id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "Final");
  assert_eq!(fetched.ratings, [5, 4]);
}

#[tokio::test]
async fn update_missing_returns_false() {
  let s = store().await;
  let changed = s
    .update(Movie {
      id:      99,
      title:   "Ghost".into(),
      ratings: vec![],
    })
    .await
    .unwrap();
  assert!(!changed);
  assert!(s.get_all().await.unwrap().is_empty());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_row() {
  let s = store().await;
  let id = s.add(NewMovie::new("Gone", vec![2])).await.unwrap();

  assert!(s.delete(id).await.unwrap());
  assert!(s.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete(12345).await.unwrap());
}

#[tokio::test]
async fn delete_twice_second_is_false() {
  let s = store().await;
  let id = s.add(NewMovie::new("Once", vec![])).await.unwrap();
  assert!(s.delete(id).await.unwrap());
  assert!(!s.delete(id).await.unwrap());
}

// ─── Initialize / close ──────────────────────────────────────────────────────

#[tokio::test]
async fn initialize_wipes_existing_rows() {
  let s = store().await;
  s.add(NewMovie::new("Old", vec![3])).await.unwrap();

  s.initialize().await.unwrap();
  assert!(s.get_all().await.unwrap().is_empty());

  // Idempotent.
  s.initialize().await.unwrap();
  let id = s.add(NewMovie::new("New", vec![4])).await.unwrap();
  assert_eq!(s.get(id).await.unwrap().unwrap().title, "New");
}

#[tokio::test]
async fn reopening_a_file_keeps_data() {
  let dir = std::env::temp_dir().join(format!(
    "reelrate-store-test-{}-{}",
    std::process::id(),
    line!()
  ));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("movies.db");
  let _ = std::fs::remove_file(&path);

  let first = SqliteStore::open(&path).await.unwrap();
  let id = first.add(NewMovie::new("Persisted", vec![5])).await.unwrap();
  first.close().await.unwrap();

  let second = SqliteStore::open(&path).await.unwrap();
  let fetched = second.get(id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "Persisted");
  second.close().await.unwrap();

  let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn operations_after_close_fail() {
  let s = store().await;
  let clone = s.clone();
  s.close().await.unwrap();

  let err = clone.get_all().await.unwrap_err();
  assert!(matches!(err, Error::Database(_)));
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_adds_from_clones() {
  let s = store().await;

  let handles: Vec<_> = (0..16_i64)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move {
        s.add(NewMovie::new(format!("Movie {i}"), vec![i])).await.unwrap()
      })
    })
    .collect();

  for h in handles {
    h.await.unwrap();
  }

  assert_eq!(s.get_all().await.unwrap().len(), 16);
}
