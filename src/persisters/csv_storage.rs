use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::{Reader, StringRecord, Writer};

use super::MovieStorage;
use crate::error::{MovieError, Result};
use crate::model::{Collection, Movie};

#[derive(Debug, Clone)]
pub struct CsvStorage {
    file_name: PathBuf,
}

struct ColumnIndexes {
    title: usize,
    year: usize,
    rating: usize,
    poster: usize,
}

impl CsvStorage {
    pub fn new(file_name: impl AsRef<Path>) -> Self {
        CsvStorage {
            file_name: file_name.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_name
    }

    fn csv_error(&self, source: csv::Error) -> MovieError {
        MovieError::Csv {
            path: self.file_name.clone(),
            source,
        }
    }

    fn malformed(&self, line: u64, reason: String) -> MovieError {
        MovieError::Malformed {
            path: self.file_name.clone(),
            line,
            reason,
        }
    }

    fn column_indexes(&self, headers: &StringRecord) -> Result<ColumnIndexes> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| self.malformed(1, format!("missing '{}' column in header", name)))
        };

        Ok(ColumnIndexes {
            title: find("Title")?,
            year: find("Year")?,
            rating: find("Rating")?,
            poster: find("Poster")?,
        })
    }

    fn movie_from_record(&self, record: &StringRecord, columns: &ColumnIndexes) -> Result<Movie> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let title = field(columns.title).to_string();
        if title.is_empty() {
            return Err(self.malformed(line, "empty title".to_string()));
        }

        let year_field = field(columns.year).trim();
        let year = year_field
            .parse::<i32>()
            .map_err(|_| self.malformed(line, format!("year '{}' is not an integer", year_field)))?;

        let rating_field = field(columns.rating).trim();
        let rating = if rating_field.is_empty() {
            None
        } else {
            let rating = rating_field.parse::<f64>().map_err(|_| {
                self.malformed(line, format!("rating '{}' is not a number", rating_field))
            })?;
            if !rating.is_finite() {
                return Err(self.malformed(line, format!("rating '{}' is not finite", rating_field)));
            }
            Some(rating)
        };

        let poster = Some(field(columns.poster).to_string());

        Ok(Movie::new(title, year, rating, poster))
    }
}

impl MovieStorage for CsvStorage {
    fn load(&self) -> Result<Collection> {
        let file = match File::open(&self.file_name) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} does not exist yet, starting empty", self.file_name.display());
                return Ok(Collection::new());
            }
            Err(source) => {
                return Err(MovieError::Io {
                    path: self.file_name.clone(),
                    source,
                })
            }
        };

        let mut rdr = Reader::from_reader(file);
        let headers = rdr.headers().map_err(|e| self.csv_error(e))?.clone();
        if headers.is_empty() {
            log::debug!("{} is empty, starting empty", self.file_name.display());
            return Ok(Collection::new());
        }
        let columns = self.column_indexes(&headers)?;

        let mut movies = Collection::new();
        for result in rdr.records() {
            let record = result.map_err(|e| self.csv_error(e))?;
            movies.insert(self.movie_from_record(&record, &columns)?);
        }

        log::debug!("Loaded {} movies from {}", movies.len(), self.file_name.display());
        Ok(movies)
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        let mut wrt = Writer::from_path(&self.file_name).map_err(|e| self.csv_error(e))?;
        wrt.write_record(Movie::csv_titles())
            .map_err(|e| self.csv_error(e))?;
        for movie in collection {
            wrt.write_record(movie.to_csvable_array())
                .map_err(|e| self.csv_error(e))?;
        }

        wrt.flush().map_err(|source| MovieError::Io {
            path: self.file_name.clone(),
            source,
        })?;

        log::debug!("Saved {} movies to {}", collection.len(), self.file_name.display());
        Ok(())
    }
}
