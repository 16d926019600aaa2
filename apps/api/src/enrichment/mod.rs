//! College enrichment combines a university-directory search and an
//! encyclopedia page summary into one best-effort view of a stored college.
//!
//! Provider failures never escape this module: each outbound call resolves to a
//! `Result<_, ProviderError>` which the aggregator folds into `null` fields and
//! `false` source flags.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod aggregator;
pub mod directory;
pub mod matching;
pub mod models;
pub mod summary;

const USER_AGENT: &str = concat!("college-enrichment-api/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}")]
    Status { status: u16 },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no response within {after_ms}ms")]
    Timeout { after_ms: u64 },
}

/// Builds the shared outbound client. The request timeout mirrors the
/// aggregator's per-provider bound so a hung socket is also torn down.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Sends a GET and decodes a JSON body. Any non-2xx status is an error.
async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ProviderError> {
    let response = request.header("accept", "application/json").send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
