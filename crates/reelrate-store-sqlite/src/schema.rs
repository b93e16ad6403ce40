//! SQL schema for the reelrate SQLite store.

/// Connection-level settings applied once on open.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
";

/// Non-destructive table creation, run on every open.
///
/// `ratings` holds comma-joined integers with no whitespace or brackets, e.g.
/// `4,5,5`. An empty string means no ratings.
pub const CREATE_MOVIES: &str = "
CREATE TABLE IF NOT EXISTS movies (
    id      INTEGER PRIMARY KEY,
    title   TEXT,
    ratings TEXT
);
";

/// Destructive reset used by `MovieStore::initialize`.
pub const DROP_MOVIES: &str = "DROP TABLE IF EXISTS movies;";
