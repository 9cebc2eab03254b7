use std::path::Path;

use crate::config::StorageFormat;
use crate::error::Result;
use crate::model::{Collection, Movie};

pub mod csv_storage;
pub mod json_storage;
#[cfg(test)]
pub mod memory;

pub use csv_storage::CsvStorage;
pub use json_storage::JsonStorage;

/// Whole-file persistence of a movie collection.
///
/// Backends only implement `load` and `save`. The mutating operations reload
/// the collection, apply a single change and write everything back, so the
/// file always matches the last successful save.
pub trait MovieStorage {
    /// Reads the full collection. A missing file is an empty collection.
    fn load(&self) -> Result<Collection>;

    /// Replaces the file contents with `collection`.
    fn save(&self, collection: &Collection) -> Result<()>;

    /// Inserts `movie`, overwriting any record with the same title.
    fn add_movie(&self, movie: Movie) -> Result<()> {
        let mut movies = self.load()?;
        if movies.insert(movie).is_some() {
            log::debug!("Overwrote existing movie entry");
        }
        self.save(&movies)
    }

    /// Returns whether a record was removed. The file is only rewritten on removal.
    fn delete_movie(&self, title: &str) -> Result<bool> {
        let mut movies = self.load()?;
        if movies.remove(title).is_none() {
            return Ok(false);
        }
        self.save(&movies)?;
        Ok(true)
    }

    /// Returns whether a record was updated. Only the rating changes.
    fn update_movie(&self, title: &str, rating: f64) -> Result<bool> {
        let mut movies = self.load()?;
        if !movies.set_rating(title, rating) {
            return Ok(false);
        }
        self.save(&movies)?;
        Ok(true)
    }
}

impl<T: MovieStorage + ?Sized> MovieStorage for Box<T> {
    fn load(&self) -> Result<Collection> {
        (**self).load()
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        (**self).save(collection)
    }
}

pub fn open_storage(path: &Path, format: StorageFormat) -> Box<dyn MovieStorage> {
    match format {
        StorageFormat::Csv => Box::new(CsvStorage::new(path)),
        StorageFormat::Json => Box::new(JsonStorage::new(path)),
    }
}
