use tabled::{settings::Style, Table, Tabled};

use crate::movie::MovieRecord;

#[derive(Tabled)]
struct MovieRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Year")]
    year: i64,
    #[tabled(rename = "Watched")]
    watched: &'static str,
    #[tabled(rename = "Likes")]
    likes: i64,
}

impl From<&MovieRecord> for MovieRow {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            category: movie.category.clone(),
            year: movie.year,
            watched: if movie.watched { "yes" } else { "no" },
            likes: movie.likes,
        }
    }
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Render movies as a rounded table; empty input renders as an empty string
pub fn movies_table(movies: &[MovieRecord]) -> String {
    if movies.is_empty() {
        return String::new();
    }
    let rows: Vec<MovieRow> = movies.iter().map(MovieRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn stats_table(stats: &[(&str, String)]) -> String {
    if stats.is_empty() {
        return String::new();
    }
    let rows: Vec<StatRow> = stats
        .iter()
        .map(|(label, value)| StatRow {
            metric: label.to_string(),
            value: value.clone(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
