use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MovieError, Result};
use crate::model::{Collection, Movie};

pub const REPORT_FILE_NAME: &str = "index.html";

pub struct HtmlReport {}

impl HtmlReport {
    pub fn render(movies: &Collection) -> String {
        let movie_list = movies
            .iter()
            .map(HtmlReport::render_movie)
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>My Movie App</title>
    <link rel="stylesheet" href="style.css"/>
</head>
<body>
<div class="list-movies-title">
    <h1>My Movie App</h1>
</div>
<div>
    <ol class="movie-grid">
{}
    </ol>
</div>
</body>
</html>
"#,
            movie_list
        )
    }

    /// Writes `index.html` into `dir` and returns its path.
    pub fn write_to_dir(dir: &Path, movies: &Collection) -> Result<PathBuf> {
        let path = dir.join(REPORT_FILE_NAME);
        fs::write(&path, HtmlReport::render(movies)).map_err(|source| MovieError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("Wrote report for {} movies to {}", movies.len(), path.display());
        Ok(path)
    }

    fn render_movie(movie: &Movie) -> String {
        let title = escape_html(&movie.title);
        let poster = escape_html(movie.poster.as_deref().unwrap_or(""));
        format!(
            r#"        <li class="movie">
            <img src="{poster}" alt="{title} poster"/>
            <h2>{title} ({year})</h2>
            <p>Rating: {rating}</p>
        </li>"#,
            poster = poster,
            title = title,
            year = movie.year,
            rating = movie.display_rating(),
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
