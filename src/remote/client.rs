/// HTTP client for the data provider
///
/// Records for a category live at `GET {base_url}/data/{category}` and come
/// back as a JSON array. Every failure (transport, status, body) is reported
/// as a `FetchError`; callers turn it into the message shown to the user.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::Config;
use crate::state::data::{AnimalRecord, Category};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider answered {0}")]
    Status(StatusCode),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Cheap to clone; clones share one connection pool
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    config: Config,
}

impl ProviderClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config: config.clone(),
        })
    }

    /// Fetch the record list for one category
    pub async fn fetch_records(&self, category: Category) -> Result<Vec<AnimalRecord>, FetchError> {
        let url = self.config.data_url(category);
        tracing::debug!(%url, "fetching records");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Download raw bytes, used for record images
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
