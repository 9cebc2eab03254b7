use serde::Deserialize;

use crate::{
    error::{MovieError, Result},
    model::MovieMetadata,
};

const NOT_FOUND_MESSAGE: &str = "Movie not found!";
const MISSING_VALUE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug)]
pub struct MetadataExtractor {}

impl MetadataExtractor {
    /// `Ok(None)` when OMDb reports that it has no such movie.
    pub fn extract_metadata_from_json(body: &str, title: &str) -> Result<Option<MovieMetadata>> {
        let resp: OmdbResponse = serde_json::from_str(body).map_err(|e| {
            MovieError::Lookup(format!("Unreadable response for title {}: {}", title, e))
        })?;

        if resp.response != "True" {
            return match resp.error.as_deref() {
                None | Some(NOT_FOUND_MESSAGE) => Ok(None),
                Some(e) => Err(MovieError::Lookup(format!(
                    "OMDb refused lookup for {}: {}",
                    title, e
                ))),
            };
        }

        let year = resp
            .year
            .as_deref()
            .and_then(MetadataExtractor::extract_year)
            .ok_or_else(|| {
                MovieError::Lookup(format!("Could not extract year for title: {}", title))
            })?;

        Ok(Some(MovieMetadata {
            title: resp.title.unwrap_or_else(|| title.to_string()),
            year,
            rating: resp.imdb_rating.as_deref().and_then(MetadataExtractor::extract_rating),
            poster_url: resp.poster.filter(|p| p != MISSING_VALUE && !p.is_empty()),
        }))
    }

    /// Series report ranges such as "2019–2022"; the leading year is kept.
    fn extract_year(year: &str) -> Option<i32> {
        let digits: String = year
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse::<i32>().ok()
    }

    fn extract_rating(rating: &str) -> Option<f64> {
        rating
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_found_movie() {
        let body = r#"{"Title":"The Matrix","Year":"1999","imdbRating":"8.7",
            "Poster":"https://img/matrix.jpg","Response":"True"}"#;

        let metadata = MetadataExtractor::extract_metadata_from_json(body, "matrix")
            .unwrap()
            .unwrap();

        assert_eq!(
            metadata,
            MovieMetadata {
                title: "The Matrix".to_string(),
                year: 1999,
                rating: Some(8.7),
                poster_url: Some("https://img/matrix.jpg".to_string()),
            }
        );
    }

    #[test]
    fn missing_rating_and_poster_become_none() {
        let body = r#"{"Title":"Tenet","Year":"2020","imdbRating":"N/A","Poster":"N/A","Response":"True"}"#;

        let metadata = MetadataExtractor::extract_metadata_from_json(body, "Tenet")
            .unwrap()
            .unwrap();

        assert_eq!(metadata.rating, None);
        assert_eq!(metadata.poster_url, None);
    }

    #[test]
    fn ranged_year_keeps_start() {
        let body = r#"{"Title":"Dark","Year":"2017–2020","imdbRating":"8.7","Response":"True"}"#;

        let metadata = MetadataExtractor::extract_metadata_from_json(body, "Dark")
            .unwrap()
            .unwrap();

        assert_eq!(metadata.year, 2017);
    }

    #[test]
    fn not_found_is_none() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;

        assert_eq!(
            MetadataExtractor::extract_metadata_from_json(body, "zzz").unwrap(),
            None
        );
    }

    #[test]
    fn api_errors_fail_the_lookup() {
        let body = r#"{"Response":"False","Error":"Invalid API key!"}"#;

        assert!(matches!(
            MetadataExtractor::extract_metadata_from_json(body, "Heat"),
            Err(MovieError::Lookup(_))
        ));
    }

    #[test]
    fn year_without_digits_fails() {
        let body = r#"{"Title":"Heat","Year":"N/A","Response":"True"}"#;

        assert!(MetadataExtractor::extract_metadata_from_json(body, "Heat").is_err());
    }
}
