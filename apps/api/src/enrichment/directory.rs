//! University directory search (Hipolabs-compatible `/search` endpoint).

use async_trait::async_trait;
use reqwest::Client;

use super::models::DirectoryCandidate;
use super::{fetch_json, ProviderError};

#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Returns every institution the directory lists under `name`, in the
    /// directory's own order. An empty list is a successful "no match".
    async fn search(&self, name: &str) -> Result<Vec<DirectoryCandidate>, ProviderError>;
}

#[derive(Clone)]
pub struct HipolabsClient {
    client: Client,
    base_url: String,
    country: String,
}

impl HipolabsClient {
    pub fn new(client: Client, base_url: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            country: country.into(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl DirectoryProvider for HipolabsClient {
    async fn search(&self, name: &str) -> Result<Vec<DirectoryCandidate>, ProviderError> {
        let request = self
            .client
            .get(self.search_url())
            .query(&[("country", self.country.as_str()), ("name", name)]);
        fetch_json(request).await
    }
}
