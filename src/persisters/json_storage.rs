use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::ser::PrettyFormatter;

use super::MovieStorage;
use crate::error::{MovieError, Result};
use crate::model::{Collection, Movie};

/// One value of the title-keyed JSON object.
#[derive(Debug, Serialize, Deserialize)]
struct MovieEntry {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Rating")]
    rating: Option<f64>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

/// Serializes a collection as a JSON object, keys in collection order.
struct JsonDocument<'a>(&'a Collection);

impl Serialize for JsonDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for movie in self.0 {
            let entry = MovieEntry {
                year: movie.year,
                rating: movie.rating,
                poster: movie.poster.clone(),
            };
            map.serialize_entry(&movie.title, &entry)?;
        }
        map.end()
    }
}

/// Deserializes a JSON object into a collection, keeping document order.
struct LoadedDocument(Collection);

impl<'de> Deserialize<'de> for LoadedDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = LoadedDocument;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping movie titles to their details")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut movies = Collection::new();
                while let Some((title, entry)) = access.next_entry::<String, MovieEntry>()? {
                    if title.is_empty() {
                        return Err(de::Error::custom("empty movie title"));
                    }
                    movies.insert(Movie::new(title, entry.year, entry.rating, entry.poster));
                }
                Ok(LoadedDocument(movies))
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

#[derive(Debug, Clone)]
pub struct JsonStorage {
    file_name: PathBuf,
}

impl JsonStorage {
    pub fn new(file_name: impl AsRef<Path>) -> Self {
        JsonStorage {
            file_name: file_name.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_name
    }

    fn json_error(&self, source: serde_json::Error) -> MovieError {
        MovieError::Json {
            path: self.file_name.clone(),
            source,
        }
    }

    fn io_error(&self, source: std::io::Error) -> MovieError {
        MovieError::Io {
            path: self.file_name.clone(),
            source,
        }
    }
}

impl MovieStorage for JsonStorage {
    fn load(&self) -> Result<Collection> {
        let content = match fs::read_to_string(&self.file_name) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} does not exist yet, starting empty", self.file_name.display());
                return Ok(Collection::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            log::debug!("{} is empty, starting empty", self.file_name.display());
            return Ok(Collection::new());
        }

        let LoadedDocument(movies) =
            serde_json::from_str(&content).map_err(|e| self.json_error(e))?;

        log::debug!("Loaded {} movies from {}", movies.len(), self.file_name.display());
        Ok(movies)
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        JsonDocument(collection)
            .serialize(&mut ser)
            .map_err(|e| self.json_error(e))?;

        fs::write(&self.file_name, buf).map_err(|e| self.io_error(e))?;

        log::debug!("Saved {} movies to {}", collection.len(), self.file_name.display());
        Ok(())
    }
}
