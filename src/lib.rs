//! # Moviestore - Local movie catalog persistence
//!
//! Keeps a catalog of movie records in a single SQLite file on disk.
//!
//! Moviestore provides:
//! - One-time schema creation at a fixed storage path
//! - Bulk import of tab-delimited seed data
//! - Load-all, load-by-id, watch/like updates and deletes keyed by movie id
//! - A fresh connection per operation, closed on every path

pub mod movie;
pub mod seed;
pub mod storage;
pub mod output;
pub mod config;
pub mod ui;


// Re-exports for convenient access
pub use movie::{MovieRecord, NewMovie};
pub use storage::{ImportPolicy, ImportReport, MovieStore, SchemaStatus};

/// Result type alias for Moviestore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Moviestore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Import failed after {committed} committed rows: {source}")]
    Import {
        committed: usize,
        #[source]
        source: rusqlite::Error,
    },
}
