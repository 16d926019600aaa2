//! Encyclopedia page summaries (Wikipedia REST `page/summary/{title}`).

use async_trait::async_trait;
use reqwest::Client;

use super::models::PageSummary;
use super::{fetch_json, ProviderError};
use crate::models::college::CollegeRow;

#[async_trait]
pub trait SummaryProvider: Send + Sync {
    async fn summary(&self, title: &str) -> Result<PageSummary, ProviderError>;
}

/// Lookup title for a college: name, city and state joined with single spaces,
/// then trimmed. Missing parts contribute an empty string.
pub fn lookup_title(college: &CollegeRow) -> String {
    format!(
        "{} {} {}",
        college.name,
        college.city.as_deref().unwrap_or(""),
        college.state.as_deref().unwrap_or("")
    )
    .trim()
    .to_string()
}

#[derive(Clone)]
pub struct WikipediaClient {
    client: Client,
    base_url: String,
}

impl WikipediaClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// The title travels as one percent-encoded path segment.
    fn summary_url(&self, title: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(title)
        )
    }
}

#[async_trait]
impl SummaryProvider for WikipediaClient {
    async fn summary(&self, title: &str) -> Result<PageSummary, ProviderError> {
        fetch_json(self.client.get(self.summary_url(title))).await
    }
}
