//! Movie types
//!
//! `MovieRecord` is a row as stored, `NewMovie` is the insert payload.
//! The id is only ever assigned by the store.

use serde::{Deserialize, Serialize};

/// A movie as persisted in the catalog.
///
/// `title`, `category`, `year` and the URLs are fixed at import time.
/// Only `watched` and `likes` change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Store-assigned identifier
    pub id: i64,
    pub title: String,
    pub category: String,
    pub year: i64,
    /// Trailer or stream link, absent when the seed row left it empty
    pub movie_url: Option<String>,
    pub cover_url: String,
    pub watched: bool,
    pub likes: i64,
}

impl MovieRecord {
    /// Label used in listings, e.g. `Inception (2010)`
    pub fn display_title(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}

/// Fields supplied on insert. `watched` and `likes` always start at false/0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub category: String,
    pub year: i64,
    pub movie_url: Option<String>,
    pub cover_url: String,
}

impl NewMovie {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        year: i64,
        cover_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            year,
            movie_url: None,
            cover_url: cover_url.into(),
        }
    }

    /// Builder: attach a movie URL. Empty strings are treated as absent.
    pub fn with_movie_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.movie_url = if url.is_empty() { None } else { Some(url) };
        self
    }
}
