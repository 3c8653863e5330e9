use crate::movie::MovieRecord;
use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::FILM, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    if is_quiet() {
        return;
    }
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// Detailed, multi-line view of one movie
pub fn movie_line(movie: &MovieRecord) {
    let seen = if movie.watched {
        format!("{} watched", Icons::EYE).style(theme().watched.clone()).to_string()
    } else {
        "not watched".style(theme().dim.clone()).to_string()
    };
    println!(
        "{} [{}] {} · {}",
        Icons::FILM,
        movie.id,
        movie.display_title().style(theme().header.clone()),
        movie.category
    );
    summary_row("Status:", &seen);
    summary_row("Likes:", &format!("{} {}", Icons::HEART, movie.likes));
    summary_row("Cover:", &movie.cover_url);
    if let Some(url) = &movie.movie_url {
        summary_row("Link:", url);
    }
}
