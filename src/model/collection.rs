use super::movie::Movie;

/// Movies keyed by title, kept in insertion order.
///
/// Titles are unique and compared case-sensitively. Inserting a title that is
/// already present replaces the existing record in place. An empty poster is
/// stored as no poster, so both file formats read back what was saved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    movies: Vec<Movie>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    pub fn as_slice(&self) -> &[Movie] {
        &self.movies
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn get(&self, title: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.title == title)
    }

    /// Returns the replaced record when the title was already present.
    pub fn insert(&mut self, mut movie: Movie) -> Option<Movie> {
        movie.poster = movie.poster.filter(|p| !p.is_empty());
        match self.position(&movie.title) {
            Some(idx) => Some(std::mem::replace(&mut self.movies[idx], movie)),
            None => {
                self.movies.push(movie);
                None
            }
        }
    }

    pub fn remove(&mut self, title: &str) -> Option<Movie> {
        self.position(title).map(|idx| self.movies.remove(idx))
    }

    /// Replaces the rating of `title`, leaving year and poster untouched.
    pub fn set_rating(&mut self, title: &str, rating: f64) -> bool {
        match self.movies.iter_mut().find(|m| m.title == title) {
            Some(movie) => {
                movie.rating = Some(rating);
                true
            }
            None => false,
        }
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.title == title)
    }
}

impl FromIterator<Movie> for Collection {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for movie in iter {
            collection.insert(movie);
        }
        collection
    }
}

impl IntoIterator for Collection {
    type Item = Movie;
    type IntoIter = std::vec::IntoIter<Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut collection: Collection = vec![
            Movie::new("Alien", 1979, Some(8.5), None),
            Movie::new("Heat", 1995, Some(8.3), None),
        ]
        .into_iter()
        .collect();

        let replaced = collection.insert(Movie::new("Alien", 1986, Some(8.4), None));

        assert_eq!(replaced.map(|m| m.year), Some(1979));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.as_slice()[0].year, 1986);
        assert_eq!(collection.as_slice()[1].title, "Heat");
    }

    #[test]
    fn insert_drops_empty_poster() {
        let mut collection = Collection::new();
        collection.insert(Movie {
            title: "Heat".to_string(),
            year: 1995,
            rating: Some(8.3),
            poster: Some(String::new()),
        });

        assert_eq!(collection.get("Heat").unwrap().poster, None);
    }

    #[test]
    fn titles_are_case_sensitive() {
        let mut collection = Collection::new();
        collection.insert(Movie::new("alien", 1979, None, None));
        collection.insert(Movie::new("Alien", 1979, None, None));

        assert_eq!(collection.len(), 2);
        assert!(collection.remove("ALIEN").is_none());
    }

    #[test]
    fn set_rating_touches_only_rating() {
        let mut collection = Collection::new();
        collection.insert(Movie::new("Heat", 1995, Some(8.3), Some("p.jpg".to_string())));

        assert!(collection.set_rating("Heat", 9.0));
        assert!(!collection.set_rating("Ronin", 9.0));

        let heat = collection.get("Heat").unwrap();
        assert_eq!(heat.rating, Some(9.0));
        assert_eq!(heat.year, 1995);
        assert_eq!(heat.poster.as_deref(), Some("p.jpg"));
    }
}
