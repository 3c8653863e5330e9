//! Database schema definitions

/// Default storage file name
pub const DATABASE_FILE_NAME: &str = "kofuf.sqlite";

pub const MOVIES_TABLE: &str = "movies";

/// SQL to create the movies table.
/// Empty title/category/coverURL are rejected by CHECK constraints.
pub const CREATE_MOVIES_TABLE: &str = r#"
CREATE TABLE movies (
    movieID INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    title TEXT NOT NULL CHECK (length(title) > 0),
    category TEXT NOT NULL CHECK (length(category) > 0),
    year INTEGER NOT NULL,
    movieURL TEXT,
    coverURL TEXT NOT NULL CHECK (length(coverURL) > 0),
    watched BOOLEAN NOT NULL DEFAULT 0,
    likes INTEGER NOT NULL DEFAULT 0
)
"#;

/// Column list shared by every SELECT, in `row_to_movie` order
pub const SELECT_COLUMNS: &str =
    "movieID, title, category, year, movieURL, coverURL, watched, likes";

/// Parameterized insert; `watched`/`likes` come from column defaults
pub const INSERT_MOVIE: &str = r#"
INSERT INTO movies (title, category, year, movieURL, coverURL)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const UPDATE_MOVIE: &str = "UPDATE movies SET watched = ?1, likes = ?2 WHERE movieID = ?3";

pub const DELETE_MOVIE: &str = "DELETE FROM movies WHERE movieID = ?1";
