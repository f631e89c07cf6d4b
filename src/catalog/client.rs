//! iTunes Search API HTTP client
//!
//! Handles communication with the public iTunes Search API.
//! See: https://performance-partners.apple.com/search-api
//!
//! No API key is required. Apple throttles at roughly 20 requests per minute,
//! which is why the search controller debounces input before calling here.

use std::time::Duration;

use super::{CatalogError, adapter, dto};
use crate::config::SearchConfig;
use crate::model::{Track, TrackId};

/// Default catalog endpoint
pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

/// iTunes Search API client
pub struct ItunesClient {
    http_client: reqwest::Client,
    base_url: String,
    page_size: u32,
    country: Option<String>,
}

impl ItunesClient {
    /// Create a new client from the search settings.
    ///
    /// The client accepts gzip-compressed responses and applies the configured
    /// request timeout to every call.
    pub fn new(config: &SearchConfig) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
            country: config.country.clone(),
        })
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            page_size: 10,
            country: None,
        }
    }

    /// Search songs matching a free-text term.
    ///
    /// Returns at most one page of results, in the order the API ranks them.
    pub async fn search(&self, term: &str) -> Result<Vec<Track>, CatalogError> {
        let url = self.search_url(term);
        tracing::debug!(term, "Searching catalog");
        let response = self.send(&url).await?;
        Ok(adapter::to_tracks(response))
    }

    /// Fetch a single song by its track ID.
    pub async fn lookup(&self, track_id: TrackId) -> Result<Option<Track>, CatalogError> {
        let url = self.lookup_url(track_id);
        tracing::debug!(track_id, "Looking up track");
        let response = self.send(&url).await?;
        Ok(adapter::to_tracks(response)
            .into_iter()
            .find(|track| track.track_id == track_id))
    }

    /// Build the search URL. Paging is fixed to the first page.
    pub fn search_url(&self, term: &str) -> String {
        let mut url = format!(
            "{}/search?entity=song&limit={}&offset=0&term={}",
            self.base_url,
            self.page_size,
            urlencoding::encode(term)
        );
        if let Some(country) = &self.country {
            url.push_str("&country=");
            url.push_str(&urlencoding::encode(country));
        }
        url
    }

    /// Build the lookup URL for a track ID.
    pub fn lookup_url(&self, track_id: TrackId) -> String {
        let mut url = format!("{}/lookup?id={}&entity=song", self.base_url, track_id);
        if let Some(country) = &self.country {
            url.push_str("&country=");
            url.push_str(&urlencoding::encode(country));
        }
        url
    }

    /// Send the HTTP request and parse the response
    async fn send(&self, url: &str) -> Result<dto::SearchResponse, CatalogError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(CatalogError::from_transport)?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        // The API answers with text/javascript, so decode the body ourselves
        // instead of relying on the content type.
        let body = response
            .bytes()
            .await
            .map_err(CatalogError::from_transport)?;

        serde_json::from_slice::<dto::SearchResponse>(&body)
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}
