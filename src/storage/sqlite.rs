//! SQLite storage implementation
//!
//! `MovieStore` owns the storage path, not a connection. Every operation opens a
//! fresh connection, runs its statement (or batch), and closes the connection
//! again on both the success and the failure path.

use std::fmt;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use super::schema;
use crate::movie::{MovieRecord, NewMovie};
use crate::seed;
use crate::{Error, Result};

/// How a bulk import behaves when one insert fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ImportPolicy {
    /// One transaction for the whole batch; a failure leaves the store untouched
    #[default]
    Atomic,
    /// Rows commit one at a time; the first failure stops the batch and
    /// earlier rows stay committed
    BestEffort,
}

impl ImportPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportPolicy::Atomic => "atomic",
            ImportPolicy::BestEffort => "best-effort",
        }
    }
}

impl fmt::Display for ImportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of `initialize_schema`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// The storage file was missing and has been created with the schema
    Created,
    /// The storage file already existed, nothing was done
    AlreadyPresent,
}

/// Summary of a bulk import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    /// Malformed seed rows dropped before reaching the store
    pub skipped: usize,
}

/// SQLite-backed storage for the movie catalog
#[derive(Debug, Clone)]
pub struct MovieStore {
    path: PathBuf,
    policy: ImportPolicy,
}

impl MovieStore {
    /// Create a store handle for `path`. Does not touch the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: ImportPolicy::default(),
        }
    }

    /// Create a store handle and make sure the schema exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.initialize_schema()?;
        Ok(store)
    }

    /// Builder: choose the bulk-import policy
    pub fn with_policy(mut self, policy: ImportPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> ImportPolicy {
        self.policy
    }

    /// Whether the storage file is present on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    // ========== Schema & Connection Lifecycle ==========

    /// Create the storage file and the movies table if the file does not exist.
    ///
    /// A no-op when the file is already present. If the schema statement
    /// fails, the freshly created file is removed again so a later call can
    /// retry instead of finding an empty database.
    pub fn initialize_schema(&self) -> Result<SchemaStatus> {
        if self.exists() {
            return Ok(SchemaStatus::AlreadyPresent);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        self.create_schema(schema::CREATE_MOVIES_TABLE)
    }

    /// Create the storage file and run `ddl` on it; the file is removed again if `ddl` fails.
    fn create_schema(&self, ddl: &str) -> Result<SchemaStatus> {
        let conn = Connection::open(&self.path)?;
        let created = conn.execute(ddl, []);
        release(conn);

        match created {
            Ok(_) => {
                tracing::info!("Created movie store at {}", self.path.display());
                Ok(SchemaStatus::Created)
            }
            Err(e) => {
                tracing::error!("Could not create movies table: {}", e);
                if let Err(io) = std::fs::remove_file(&self.path) {
                    tracing::warn!("Could not remove {}: {}", self.path.display(), io);
                }
                Err(e.into())
            }
        }
    }

    /// Whether the movies table is present in the storage file
    pub fn has_schema(&self) -> Result<bool> {
        self.with_connection(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [schema::MOVIES_TABLE],
                |row| row.get(0),
            )?;
            Ok(count == 1)
        })
    }

    /// Run `op` on a fresh connection and close it afterwards, whatever `op` returned.
    fn with_connection<T>(&self, op: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        if !self.exists() {
            self.initialize_schema()?;
        }

        let mut conn = self.acquire()?;
        let result = op(&mut conn);
        release(conn);
        result
    }

    fn acquire(&self) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&self.path, flags)?;
        tracing::debug!("Opened connection to {}", self.path.display());
        Ok(conn)
    }

    // ========== Bulk Import ==========

    /// Parse seed rows and insert every well-formed one.
    ///
    /// Malformed rows are skipped and counted; they never fail the import.
    pub fn import_seed<I, S>(&self, rows: I) -> Result<ImportReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let batch = seed::parse_rows(rows);
        let inserted = self.insert_batch(&batch.movies)?;
        tracing::info!(
            "Imported {} movies ({} malformed rows skipped, policy: {})",
            inserted,
            batch.skipped,
            self.policy()
        );
        Ok(ImportReport {
            inserted,
            skipped: batch.skipped,
        })
    }

    /// Import a tab-delimited seed file
    pub fn import_seed_file(&self, path: &Path) -> Result<ImportReport> {
        let contents = std::fs::read_to_string(path)?;
        self.import_seed(contents.lines())
    }

    /// Insert a batch of movies with one prepared statement, honouring the import policy.
    ///
    /// On failure the error carries the number of rows that stayed committed.
    pub fn insert_batch(&self, movies: &[NewMovie]) -> Result<usize> {
        let policy = self.policy;
        let result = self.with_connection(|conn| match policy {
            _ if movies.is_empty() => Ok(0),
            ImportPolicy::Atomic => {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare(schema::INSERT_MOVIE)?;
                    for movie in movies {
                        insert_movie(&mut stmt, movie)
                            .map_err(|source| Error::Import { committed: 0, source })?;
                    }
                }
                tx.commit()?;
                Ok(movies.len())
            }
            ImportPolicy::BestEffort => {
                let mut stmt = conn.prepare(schema::INSERT_MOVIE)?;
                for (committed, movie) in movies.iter().enumerate() {
                    insert_movie(&mut stmt, movie)
                        .map_err(|source| Error::Import { committed, source })?;
                }
                Ok(movies.len())
            }
        });

        if let Err(Error::Import { committed, source }) = &result {
            tracing::error!(
                "Failed to insert seed data ({} rows committed): {}",
                committed,
                source
            );
        }
        result
    }

    // ========== Read Operations ==========

    /// Load every movie, oldest year first. Equal years keep id (insertion) order.
    pub fn load_all(&self) -> Result<Vec<MovieRecord>> {
        self.with_connection(|conn| {
            let sql = format!(
                "SELECT {} FROM movies ORDER BY year ASC, movieID ASC",
                schema::SELECT_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let movies = stmt
                .query_map([], row_to_movie)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(movies)
        })
    }

    /// Load a movie by id. A missing id is `Ok(None)`, not an error.
    pub fn load_movie(&self, id: i64) -> Result<Option<MovieRecord>> {
        self.with_connection(|conn| {
            let sql = format!("SELECT {} FROM movies WHERE movieID = ?1", schema::SELECT_COLUMNS);
            conn.query_row(&sql, [id], row_to_movie)
                .optional()
                .map_err(Into::into)
        })
    }

    /// Callback form of `load_movie`: `on_loaded` receives the record or `None`.
    /// Storage errors are returned and the callback is not invoked.
    pub fn load_movie_with<F>(&self, id: i64, on_loaded: F) -> Result<()>
    where
        F: FnOnce(Option<MovieRecord>),
    {
        let movie = self.load_movie(id)?;
        on_loaded(movie);
        Ok(())
    }

    /// Count all movies
    pub fn count(&self) -> Result<usize> {
        self.with_connection(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }

    /// Get catalog statistics
    pub fn stats(&self) -> Result<StoreStats> {
        self.with_connection(|conn| {
            conn.query_row(
                "SELECT COUNT(*), COALESCE(SUM(watched), 0), COALESCE(SUM(likes), 0) FROM movies",
                [],
                |row| {
                    let movies: i64 = row.get(0)?;
                    let watched: i64 = row.get(1)?;
                    Ok(StoreStats {
                        movies: movies as usize,
                        watched: watched as usize,
                        total_likes: row.get(2)?,
                    })
                },
            )
            .map_err(Into::into)
        })
    }

    // ========== Mutation Operations ==========

    /// Set the watch state and like count of a movie.
    ///
    /// Returns the number of rows changed; an unknown id changes nothing and is not an error.
    pub fn update_movie(&self, id: i64, watched: bool, likes: i64) -> Result<usize> {
        self.with_connection(|conn| {
            let changed = conn.execute(schema::UPDATE_MOVIE, params![watched, likes, id])?;
            tracing::debug!("Updated movie {} ({} rows)", id, changed);
            Ok(changed)
        })
    }

    /// Delete a movie by id.
    ///
    /// `Ok` means the statement ran, even when no row matched. The returned
    /// count tells whether a movie was actually removed.
    pub fn delete_movie(&self, id: i64) -> Result<usize> {
        self.with_connection(|conn| {
            let removed = conn.execute(schema::DELETE_MOVIE, [id])?;
            tracing::debug!("Deleted movie {} ({} rows)", id, removed);
            Ok(removed)
        })
    }
}

fn insert_movie(stmt: &mut rusqlite::Statement<'_>, movie: &NewMovie) -> rusqlite::Result<()> {
    stmt.execute(params![
        movie.title,
        movie.category,
        movie.year,
        movie.movie_url,
        movie.cover_url,
    ])?;
    Ok(())
}

/// Close a connection explicitly; a failed close is logged, never raised.
fn release(conn: Connection) {
    match conn.close() {
        Ok(()) => tracing::debug!("Closed connection"),
        Err((_conn, e)) => tracing::warn!("Failed to close connection: {}", e),
    }
}

/// Helper to convert a row to a MovieRecord
fn row_to_movie(row: &rusqlite::Row) -> rusqlite::Result<MovieRecord> {
    Ok(MovieRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        year: row.get(3)?,
        movie_url: row.get(4)?,
        cover_url: row.get(5)?,
        watched: row.get(6)?,
        likes: row.get(7)?,
    })
}

/// Catalog statistics
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub movies: usize,
    pub watched: usize,
    pub total_likes: i64,
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Catalog Statistics:")?;
        writeln!(f, "  Movies: {}", self.movies)?;
        writeln!(f, "  Watched: {}", self.watched)?;
        writeln!(f, "  Likes: {}", self.total_likes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store(dir: &TempDir) -> MovieStore {
        MovieStore::new(dir.path().join(schema::DATABASE_FILE_NAME))
    }

    fn row(title: &str, year: i64) -> String {
        format!("{}\tDrama\t{}\thttps://example.com/{}\tcover-{}.jpg", title, year, year, year)
    }

    /// Valid, empty-title (rejected by the CHECK constraint), valid
    fn failing_batch() -> Vec<NewMovie> {
        vec![
            NewMovie::new("Good", "Drama", 2001, "c"),
            NewMovie::new("", "Drama", 2002, "c"),
            NewMovie::new("Later", "Drama", 2003, "c"),
        ]
    }

    /// Descriptors of this process that point at `path`
    #[cfg(target_os = "linux")]
    fn open_handles(path: &Path) -> usize {
        let target = path.canonicalize().unwrap();
        std::fs::read_dir("/proc/self/fd")
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| std::fs::read_link(entry.path()).ok())
            .filter(|link| *link == target)
            .count()
    }

    #[test]
    fn test_initialize_schema_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        assert_eq!(store.initialize_schema().unwrap(), SchemaStatus::Created);
        assert_eq!(store.initialize_schema().unwrap(), SchemaStatus::AlreadyPresent);
        assert!(store.has_schema().unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_schema_created_lazily() {
        let dir = TempDir::new().unwrap();
        let store = MovieStore::new(dir.path().join("nested").join("kofuf.sqlite"));

        assert!(!store.exists());
        assert!(store.load_all().unwrap().is_empty());
        assert!(store.exists());
        assert!(store.has_schema().unwrap());
    }

    #[test]
    fn test_open_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = MovieStore::new(blocker.join("kofuf.sqlite"));
        assert!(store.initialize_schema().is_err());
        assert!(store.load_all().is_err());
    }

    #[test]
    fn test_import_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        let report = store.import_seed(["Inception\tSciFi\t2010\tu1\tc1"]).unwrap();
        assert_eq!(report, ImportReport { inserted: 1, skipped: 0 });

        let movies = store.load_all().unwrap();
        assert_eq!(movies.len(), 1);
        let movie = &movies[0];
        assert!(movie.id > 0);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.category, "SciFi");
        assert_eq!(movie.year, 2010);
        assert_eq!(movie.movie_url.as_deref(), Some("u1"));
        assert_eq!(movie.cover_url, "c1");
        assert!(!movie.watched);
        assert_eq!(movie.likes, 0);
    }

    #[test]
    fn test_load_all_orders_by_year() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        store
            .import_seed([row("B", 2015), row("A", 2001), row("C", 2020)])
            .unwrap();

        let years: Vec<i64> = store.load_all().unwrap().iter().map(|m| m.year).collect();
        assert_eq!(years, vec![2001, 2015, 2020]);
    }

    #[test]
    fn test_equal_years_keep_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        store
            .import_seed([row("First", 1999), row("Second", 1999), row("Early", 1980)])
            .unwrap();

        let titles: Vec<String> = store.load_all().unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["Early", "First", "Second"]);
    }

    #[test]
    fn test_malformed_row_skipped() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        let rows = vec![
            row("Kept", 2001),
            "Short\tDrama\t2002".to_string(),
            row("Also Kept", 2003),
        ];
        let report = store.import_seed(rows).unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped, 1);
        let titles: Vec<String> = store.load_all().unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["Kept", "Also Kept"]);
    }

    #[test]
    fn test_seed_text_is_not_interpreted_as_sql() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        let title = "x'); DROP TABLE movies; --";
        store
            .import_seed([format!("{}\tDrama\t2000\tu\tc", title)])
            .unwrap();

        let movies = store.load_all().unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, title);
    }

    #[test]
    fn test_ids_are_assigned_once() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        store.import_seed([row("A", 2001), row("B", 2002)]).unwrap();
        let first = store.load_all().unwrap();
        store.delete_movie(first[1].id).unwrap();
        store.import_seed([row("C", 2003)]).unwrap();

        let ids: Vec<i64> = store.load_all().unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], first[0].id);
        assert!(ids[1] > first[1].id);
    }

    #[test]
    fn test_atomic_import_rolls_back_on_failure() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir).with_policy(ImportPolicy::Atomic);

        let err = store.insert_batch(&failing_batch()).unwrap_err();

        assert!(matches!(err, Error::Import { committed: 0, .. }));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_best_effort_import_keeps_earlier_rows() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir).with_policy(ImportPolicy::BestEffort);

        let err = store.insert_batch(&failing_batch()).unwrap_err();

        assert!(matches!(err, Error::Import { committed: 1, .. }));
        let titles: Vec<String> = store.load_all().unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["Good"]);
    }

    #[test]
    fn test_import_seed_file() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        let seed_path = dir.path().join("movies.tsv");
        std::fs::write(&seed_path, "A\tDrama\t2001\t\tc\r\nB\tDrama\t2002\tu\tc\r\n").unwrap();

        let report = store.import_seed_file(&seed_path).unwrap();
        assert_eq!(report.inserted, 2);

        let movies = store.load_all().unwrap();
        assert!(movies[0].movie_url.is_none());
        assert_eq!(movies[1].movie_url.as_deref(), Some("u"));
    }

    #[test]
    fn test_update_changes_only_watch_state() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.import_seed(["Inception\tSciFi\t2010\tu1\tc1"]).unwrap();
        let before = store.load_all().unwrap().remove(0);

        let changed = store.update_movie(before.id, true, 5).unwrap();
        assert_eq!(changed, 1);

        let after = store.load_movie(before.id).unwrap().unwrap();
        assert!(after.watched);
        assert_eq!(after.likes, 5);
        assert_eq!(after.title, before.title);
        assert_eq!(after.category, before.category);
        assert_eq!(after.year, before.year);
        assert_eq!(after.movie_url, before.movie_url);
        assert_eq!(after.cover_url, before.cover_url);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.import_seed([row("A", 2001)]).unwrap();

        assert_eq!(store.update_movie(9999, true, 3).unwrap(), 0);
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.load_movie(9999).unwrap().is_none());
    }

    #[test]
    fn test_delete_movie() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.import_seed([row("A", 2001), row("B", 2002)]).unwrap();
        let movies = store.load_all().unwrap();

        assert_eq!(store.delete_movie(movies[0].id).unwrap(), 1);

        let remaining = store.load_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, movies[1].id);
    }

    #[test]
    fn test_delete_unknown_id_succeeds() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.import_seed([row("A", 2001)]).unwrap();

        assert_eq!(store.delete_movie(424242).unwrap(), 0);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_load_missing_movie_via_callback() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.import_seed([row("A", 2001)]).unwrap();
        let id = store.load_all().unwrap()[0].id;

        let mut delivered = None;
        store.load_movie_with(id, |m| delivered = Some(m)).unwrap();
        assert_eq!(delivered.unwrap().unwrap().title, "A");

        let mut delivered = None;
        store.load_movie_with(id + 100, |m| delivered = Some(m)).unwrap();
        assert_eq!(delivered, Some(None));
    }

    #[test]
    fn test_records_persist_across_handles() {
        let dir = TempDir::new().unwrap();
        temp_store(&dir).import_seed([row("A", 2001)]).unwrap();

        let reopened = MovieStore::open(dir.path().join(schema::DATABASE_FILE_NAME)).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }

    #[test]
    fn test_stats() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.import_seed([row("A", 2001), row("B", 2002)]).unwrap();
        let id = store.load_all().unwrap()[0].id;
        store.update_movie(id, true, 7).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.movies, 2);
        assert_eq!(stats.watched, 1);
        assert_eq!(stats.total_likes, 7);
    }

    #[test]
    fn test_import_policy_values() {
        use clap::ValueEnum;

        assert_eq!(ImportPolicy::from_str("atomic", false).unwrap(), ImportPolicy::Atomic);
        assert_eq!(ImportPolicy::from_str("best-effort", false).unwrap(), ImportPolicy::BestEffort);
        assert!(ImportPolicy::from_str("sometimes", false).is_err());
    }

    #[test]
    fn test_empty_required_field_does_not_abort_import() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        let report = store
            .import_seed(["A\tDrama\t2001\tu\tc", "B\tDrama\t2002\tu\t", "C\tDrama\t2003\tu\tc"])
            .unwrap();

        assert_eq!(report, ImportReport { inserted: 2, skipped: 1 });
        let titles: Vec<String> = store.load_all().unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_import_without_valid_rows_creates_store() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        let report = store.import_seed(["only\tthree\tfields"]).unwrap();

        assert_eq!(report, ImportReport { inserted: 0, skipped: 1 });
        assert!(store.exists());
        assert!(store.has_schema().unwrap());
    }

    #[test]
    fn test_failed_schema_statement_removes_file() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        assert!(store.create_schema("CREATE TABLE movies (").is_err());
        assert!(!store.exists());

        assert_eq!(store.initialize_schema().unwrap(), SchemaStatus::Created);
        assert!(store.has_schema().unwrap());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_connections_closed_on_every_path() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.initialize_schema().unwrap();

        store
            .with_connection(|_| {
                assert_eq!(open_handles(store.path()), 1);
                Ok(())
            })
            .unwrap();
        assert_eq!(open_handles(store.path()), 0);

        for policy in [ImportPolicy::Atomic, ImportPolicy::BestEffort] {
            let store = store.clone().with_policy(policy);
            for _ in 0..10 {
                assert!(store.insert_batch(&failing_batch()).is_err());
            }
        }
        assert_eq!(open_handles(store.path()), 0);

        let garbage = MovieStore::new(dir.path().join("garbage.sqlite"));
        std::fs::write(garbage.path(), "this is not a database file at all").unwrap();
        for _ in 0..10 {
            assert!(garbage.load_all().is_err());
        }
        assert_eq!(open_handles(garbage.path()), 0);
    }
}
