use async_trait::async_trait;

use crate::error::Result;
use crate::model::MovieMetadata;

pub mod omdb_client;

pub use omdb_client::OmdbClient;

/// External source of movie details, used only when adding a movie.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// `Ok(None)` when the source does not know the title.
    async fn lookup(&self, title: &str) -> Result<Option<MovieMetadata>>;
}
