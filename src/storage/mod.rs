//! Storage Layer - SQLite-backed persistence
//!
//! One storage file holding a single table:
//! - movies(movieID, title, category, year, movieURL, coverURL, watched, likes)

pub mod schema;
pub mod sqlite;

pub use sqlite::{ImportPolicy, ImportReport, MovieStore, SchemaStatus, StoreStats};
