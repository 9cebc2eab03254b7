use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{MovieError, Result};
use crate::model::{Collection, Movie, MovieMetadata};
use crate::persisters::MovieStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    pub average: f64,
    pub median: f64,
    pub best_rating: f64,
    pub best: Vec<String>,
    pub worst_rating: f64,
    pub worst: Vec<String>,
}

/// Every movie in collection order, numbered from 1 for display.
#[derive(Debug, Clone)]
pub struct Listing {
    movies: Vec<Movie>,
}

impl Listing {
    pub fn total(&self) -> usize {
        self.movies.len()
    }

    pub fn indexed(&self) -> impl Iterator<Item = (usize, &Movie)> {
        self.movies.iter().enumerate().map(|(i, m)| (i + 1, m))
    }
}

pub struct MovieService<S> {
    storage: S,
}

impl<S: MovieStorage> MovieService<S> {
    pub fn new(storage: S) -> Self {
        MovieService { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn movies(&self) -> Result<Collection> {
        self.storage.load()
    }

    pub fn list(&self) -> Result<Listing> {
        let movies = self.storage.load()?;
        Ok(Listing {
            movies: movies.into_iter().collect(),
        })
    }

    /// First movie, in collection order, whose title contains `query` ignoring case.
    pub fn search(&self, query: &str) -> Result<Option<Movie>> {
        let needle = query.to_lowercase();
        let movies = self.storage.load()?;
        Ok(movies
            .into_iter()
            .find(|m| m.title.to_lowercase().contains(&needle)))
    }

    /// Stable sort by rating. Unrated movies always come last.
    pub fn sorted_by_rating(&self, order: SortOrder) -> Result<Vec<Movie>> {
        let mut movies: Vec<Movie> = self.storage.load()?.into_iter().collect();
        movies.sort_by(|a, b| compare_ratings(a.rating, b.rating, order));
        Ok(movies)
    }

    /// `None` when no movie has a rating.
    pub fn statistics(&self) -> Result<Option<RatingStats>> {
        let movies = self.storage.load()?;
        Ok(rating_stats(&movies))
    }

    pub fn random_pick(&self) -> Result<Option<Movie>> {
        self.random_pick_with(&mut rand::thread_rng())
    }

    pub fn random_pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<Movie>> {
        let movies = self.storage.load()?;
        Ok(movies.as_slice().choose(rng).cloned())
    }

    pub fn add_movie(
        &self,
        title: &str,
        year: i32,
        rating: Option<f64>,
        poster: Option<String>,
    ) -> Result<Movie> {
        let title = validate_title(title)?;
        if let Some(r) = rating {
            validate_rating(r)?;
        }

        let movie = Movie::new(title, year, rating, poster);
        self.storage.add_movie(movie.clone())?;
        log::info!("Added movie {}", movie.title);
        Ok(movie)
    }

    pub fn add_from_metadata(&self, metadata: MovieMetadata) -> Result<Movie> {
        self.add_movie(
            &metadata.title,
            metadata.year,
            metadata.rating,
            metadata.poster_url,
        )
    }

    pub fn delete_movie(&self, title: &str) -> Result<()> {
        if !self.storage.delete_movie(title)? {
            return Err(MovieError::NotFound(title.to_string()));
        }
        log::info!("Deleted movie {}", title);
        Ok(())
    }

    pub fn update_movie(&self, title: &str, rating: f64) -> Result<()> {
        validate_rating(rating)?;
        if !self.storage.update_movie(title, rating)? {
            return Err(MovieError::NotFound(title.to_string()));
        }
        log::info!("Updated rating of {} to {}", title, rating);
        Ok(())
    }
}

pub fn parse_year(input: &str) -> Result<i32> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|_| MovieError::InvalidInput(format!("'{}' is not a valid year", input.trim())))
}

pub fn parse_rating(input: &str) -> Result<f64> {
    let rating = input
        .trim()
        .parse::<f64>()
        .map_err(|_| MovieError::InvalidInput(format!("'{}' is not a valid rating", input.trim())))?;
    validate_rating(rating)?;
    Ok(rating)
}

fn validate_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(MovieError::InvalidInput(
            "Movie title cannot be empty".to_string(),
        ));
    }
    Ok(title)
}

fn validate_rating(rating: f64) -> Result<()> {
    if !rating.is_finite() {
        return Err(MovieError::InvalidInput(format!(
            "{} is not a valid rating",
            rating
        )));
    }
    Ok(())
}

fn compare_ratings(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match order {
            SortOrder::Ascending => x.total_cmp(&y),
            SortOrder::Descending => y.total_cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn rating_stats(movies: &Collection) -> Option<RatingStats> {
    let rated: Vec<(&str, f64)> = movies
        .iter()
        .filter_map(|m| m.rating.map(|r| (m.title.as_str(), r)))
        .collect();
    if rated.is_empty() {
        return None;
    }

    let mut ratings: Vec<f64> = rated.iter().map(|(_, r)| *r).collect();
    ratings.sort_by(f64::total_cmp);

    let n = ratings.len();
    let average = ratings.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (ratings[n / 2 - 1] + ratings[n / 2]) / 2.0
    } else {
        ratings[n / 2]
    };
    let worst_rating = ratings[0];
    let best_rating = ratings[n - 1];

    let titles_rated = |target: f64| -> Vec<String> {
        rated
            .iter()
            .filter(|(_, r)| *r == target)
            .map(|(t, _)| t.to_string())
            .collect()
    };

    Some(RatingStats {
        average,
        median,
        best_rating,
        best: titles_rated(best_rating),
        worst_rating,
        worst: titles_rated(worst_rating),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persisters::memory::InMemoryStorage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn service_with(movies: Vec<Movie>) -> MovieService<InMemoryStorage> {
        MovieService::new(InMemoryStorage::with_movies(movies))
    }

    fn rated(title: &str, rating: f64) -> Movie {
        Movie::new(title, 2000, Some(rating), None)
    }

    #[test]
    fn statistics_summarize_ratings() {
        let service = service_with(vec![
            rated("Pulp Fiction", 9.5),
            rated("Heat", 8.8),
            rated("Cats", 3.6),
        ]);

        let stats = service.statistics().unwrap().unwrap();

        assert!((stats.average - 7.3).abs() < 1e-9);
        assert_eq!(stats.median, 8.8);
        assert_eq!(stats.best, vec!["Pulp Fiction"]);
        assert_eq!(stats.best_rating, 9.5);
        assert_eq!(stats.worst, vec!["Cats"]);
        assert_eq!(stats.worst_rating, 3.6);
    }

    #[test]
    fn statistics_list_ties_together() {
        let service = service_with(vec![
            rated("Alien", 9.0),
            rated("Cats", 2.0),
            rated("Aliens", 9.0),
            rated("Dogs", 2.0),
        ]);

        let stats = service.statistics().unwrap().unwrap();

        assert_eq!(stats.best, vec!["Alien", "Aliens"]);
        assert_eq!(stats.worst, vec!["Cats", "Dogs"]);
        assert_eq!(stats.median, 5.5);
    }

    #[test]
    fn statistics_ignore_unrated_movies() {
        let service = service_with(vec![rated("Heat", 8.0), Movie::new("Tenet", 2020, None, None)]);

        let stats = service.statistics().unwrap().unwrap();
        assert_eq!(stats.average, 8.0);
        assert_eq!(stats.worst, vec!["Heat"]);
    }

    #[test]
    fn empty_collection_has_no_statistics_or_pick() {
        let service = service_with(vec![]);

        assert_eq!(service.statistics().unwrap(), None);
        assert_eq!(service.random_pick().unwrap(), None);
    }

    #[test]
    fn random_pick_returns_a_stored_movie() {
        let service = service_with(vec![rated("Heat", 8.0), rated("Ronin", 7.0)]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            let movie = service.random_pick_with(&mut rng).unwrap().unwrap();
            assert!(movie.title == "Heat" || movie.title == "Ronin");
        }
    }

    #[test]
    fn search_returns_first_match_only() {
        let service = service_with(vec![
            rated("The Godfather", 9.2),
            rated("The Godfather: Part II", 9.0),
        ]);

        let found = service.search("god").unwrap().unwrap();
        assert_eq!(found.title, "The Godfather");
        assert_eq!(service.search("matrix").unwrap(), None);
    }

    #[test]
    fn descending_sort_is_stable() {
        let service = service_with(vec![
            rated("A", 7.0),
            Movie::new("Unrated", 2001, None, None),
            rated("B", 9.0),
            rated("C", 7.0),
            rated("D", 9.0),
        ]);

        let titles: Vec<String> = service
            .sorted_by_rating(SortOrder::default())
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();

        assert_eq!(titles, vec!["B", "D", "A", "C", "Unrated"]);
    }

    #[test]
    fn ascending_sort_keeps_unrated_last() {
        let service = service_with(vec![Movie::new("Unrated", 2001, None, None), rated("B", 9.0), rated("A", 7.0)]);

        let titles: Vec<String> = service
            .sorted_by_rating(SortOrder::Ascending)
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();

        assert_eq!(titles, vec!["A", "B", "Unrated"]);
    }

    #[test]
    fn list_numbers_from_one() {
        let service = service_with(vec![rated("Heat", 8.0), rated("Ronin", 7.0)]);

        let listing = service.list().unwrap();
        let indexed: Vec<(usize, &str)> = listing.indexed().map(|(i, m)| (i, m.title.as_str())).collect();

        assert_eq!(listing.total(), 2);
        assert_eq!(indexed, vec![(1, "Heat"), (2, "Ronin")]);
    }

    #[test]
    fn add_rejects_empty_title() {
        let service = service_with(vec![]);

        let result = service.add_movie("   ", 1999, Some(7.0), None);

        assert!(matches!(result, Err(MovieError::InvalidInput(_))));
        assert_eq!(service.storage().save_count(), 0);
    }

    #[test]
    fn add_from_metadata_keeps_missing_rating() {
        let service = service_with(vec![]);

        let movie = service
            .add_from_metadata(MovieMetadata {
                title: "Tenet".to_string(),
                year: 2020,
                rating: None,
                poster_url: Some("http://img/tenet.jpg".to_string()),
            })
            .unwrap();

        assert_eq!(movie.rating, None);
        assert_eq!(service.movies().unwrap().get("Tenet"), Some(&movie));
    }

    #[test]
    fn delete_and_update_report_missing_titles_without_saving() {
        let service = service_with(vec![rated("Heat", 8.0)]);

        assert!(matches!(service.delete_movie("Ronin"), Err(MovieError::NotFound(_))));
        assert!(matches!(service.update_movie("Ronin", 5.0), Err(MovieError::NotFound(_))));
        assert_eq!(service.storage().save_count(), 0);

        service.update_movie("Heat", 9.1).unwrap();
        service.delete_movie("Heat").unwrap();
        assert_eq!(service.storage().save_count(), 2);
        assert!(service.movies().unwrap().is_empty());
    }

    #[test]
    fn parse_helpers_reject_non_numbers() {
        assert_eq!(parse_year(" 1999 ").unwrap(), 1999);
        assert!(matches!(parse_year("nineteen"), Err(MovieError::InvalidInput(_))));
        assert_eq!(parse_rating("8.5").unwrap(), 8.5);
        assert!(matches!(parse_rating("great"), Err(MovieError::InvalidInput(_))));
        assert!(matches!(parse_rating("NaN"), Err(MovieError::InvalidInput(_))));
    }
}
