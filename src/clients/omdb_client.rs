use async_trait::async_trait;
use reqwest::{header, Client};

use super::MetadataLookup;
use crate::{
    error::{MovieError, Result},
    extractors::metadata_extractor::MetadataExtractor,
    model::MovieMetadata,
};

pub const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com/";

#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let user_agent = header::HeaderValue::from_static(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| MovieError::Lookup(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    async fn get_json_for_title(&self, title: &str) -> Result<String> {
        let resp = self
            .client
            .get(self.base_url.as_str())
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                MovieError::Lookup(format!(
                    "Failed to reach {} for title {}. Received error: {}",
                    self.base_url, title, e
                ))
            })?;

        if !resp.status().is_success() {
            return Err(MovieError::Lookup(format!(
                "{} answered with status {} for title {}",
                self.base_url,
                resp.status(),
                title
            )));
        }

        resp.text().await.map_err(|e| {
            MovieError::Lookup(format!(
                "Failed to read response body for title {}. Error was {}",
                title, e
            ))
        })
    }
}

#[async_trait]
impl MetadataLookup for OmdbClient {
    async fn lookup(&self, title: &str) -> Result<Option<MovieMetadata>> {
        log::debug!("Looking up {} on {}", title, self.base_url);
        let body = self.get_json_for_title(title).await?;
        MetadataExtractor::extract_metadata_from_json(&body, title)
    }
}
