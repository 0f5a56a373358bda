use async_trait::async_trait;
use universeex_atoms::photos::{self, FetchError, PhotoRecord, PhotoSource};
use universeex_atoms::query::FilterState;
use url::Url;

use crate::cache::ResponseCache;
use crate::config::Config;

/// Mars Rover Photos API client with a read-through response cache.
///
/// No request timeout is configured and nothing is retried: a failed or
/// hung request is the caller's to deal with.
pub struct NasaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    cache: ResponseCache,
}

impl NasaClient {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http_client(http, config))
    }

    pub fn with_http_client(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.api_base.clone(),
            api_key: config.api_key.clone(),
            cache: ResponseCache::new(config.cache_capacity, config.cache_ttl),
        }
    }

    pub fn request_url(&self, filter: &FilterState) -> Result<Url, FetchError> {
        photos::build_photos_url(&self.base_url, filter, &self.api_key)
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    async fn fetch_body(&self, url: Url) -> Result<String, FetchError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                // Canonical reason for the code; reqwest does not expose the sent phrase
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            });
        }

        resp.text()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))
    }
}

#[async_trait]
impl PhotoSource for NasaClient {
    async fn fetch_page(&self, filter: &FilterState) -> Result<Vec<PhotoRecord>, FetchError> {
        let url = self.request_url(filter)?;
        // Full URI, api_key included, so different credentials never share entries
        let key = url.to_string();

        if let Some(body) = self.cache.get(&key) {
            tracing::debug!(
                "Photo cache hit - rover: {} date: {} page: {}",
                filter.rover(),
                filter.date(),
                filter.page()
            );
            return photos::parse_photos(&body);
        }

        tracing::info!(
            "Fetching photos - rover: {} camera: {:?} date: {} page: {}",
            filter.rover(),
            filter.camera(),
            filter.date(),
            filter.page()
        );

        let body = match self.fetch_body(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Photo fetch failed: {}", e);
                return Err(e);
            }
        };

        let records = photos::parse_photos(&body)?;
        self.cache.put(key, body);
        Ok(records)
    }
}
