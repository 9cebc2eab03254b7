use std::cell::{Cell, RefCell};

use super::MovieStorage;
use crate::error::Result;
use crate::model::{Collection, Movie};

/// In-memory storage for service tests. Counts saves so tests can check
/// that no-op mutations never rewrite the collection.
#[derive(Default)]
pub struct InMemoryStorage {
    movies: RefCell<Collection>,
    saves: Cell<usize>,
}

impl InMemoryStorage {
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: RefCell::new(movies.into_iter().collect()),
            saves: Cell::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl MovieStorage for InMemoryStorage {
    fn load(&self) -> Result<Collection> {
        Ok(self.movies.borrow().clone())
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        *self.movies.borrow_mut() = collection.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
