//! Seed data parsing
//!
//! Seed files are tab-delimited, one movie per row:
//! `title\tcategory\tyear\tmovieURL\tcoverURL`
//!
//! Rows are separated by CRLF; bare LF is accepted too. Rows that do not have
//! exactly five fields, whose year is not an integer, or whose title, category
//! or cover URL is empty are dropped.

use crate::movie::NewMovie;

/// Number of tab-separated fields in a well-formed row
pub const SEED_FIELDS: usize = 5;

/// Outcome of parsing a batch of seed rows
#[derive(Debug, Clone, Default)]
pub struct SeedBatch {
    pub movies: Vec<NewMovie>,
    /// Malformed rows that were dropped (blank rows are not counted)
    pub skipped: usize,
}

/// Parse a single row. Returns `None` for malformed rows.
pub fn parse_row(row: &str) -> Option<NewMovie> {
    let row = row.strip_suffix('\r').unwrap_or(row);
    let parts: Vec<&str> = row.split('\t').collect();
    if parts.len() != SEED_FIELDS {
        return None;
    }

    let year = parts[2].trim().parse::<i64>().ok()?;
    if parts[0].is_empty() || parts[1].is_empty() || parts[4].is_empty() {
        return None;
    }

    Some(
        NewMovie::new(parts[0], parts[1], year, parts[4])
            .with_movie_url(parts[3]),
    )
}

/// Parse a lazy sequence of rows into insert payloads, counting what was dropped.
pub fn parse_rows<I, S>(rows: I) -> SeedBatch
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut batch = SeedBatch::default();

    for (idx, row) in rows.into_iter().enumerate() {
        let row = row.as_ref();
        if row.trim().is_empty() {
            continue;
        }
        match parse_row(row) {
            Some(movie) => batch.movies.push(movie),
            None => {
                tracing::warn!("Skipping malformed seed row {}", idx + 1);
                batch.skipped += 1;
            }
        }
    }

    batch
}
