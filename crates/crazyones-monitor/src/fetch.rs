// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page fetching behind a trait so the pipeline is testable without a
//! network.

use std::time::Duration;

use async_trait::async_trait;
use crazyones_core::CrazyOnesError;

/// Desktop User-Agent; Apple's CDN serves a reduced page to unknown clients.
const USER_AGENT_STRING: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetch deadline per page.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches one page body by URL.
///
/// The production implementation is [`HttpFetcher`]; tests substitute a
/// fixture-backed mock.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, CrazyOnesError>;
}

/// HTTP fetcher with a desktop User-Agent and a 30-second deadline.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, CrazyOnesError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT_STRING)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| CrazyOnesError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrazyOnesError> {
        let network = |e: reqwest::Error| {
            if e.is_timeout() {
                CrazyOnesError::Timeout {
                    url: url.to_string(),
                    duration: FETCH_TIMEOUT,
                }
            } else {
                CrazyOnesError::Network {
                    url: url.to_string(),
                    source: Box::new(e),
                }
            }
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        let response = response.error_for_status().map_err(network)?;
        response.text().await.map_err(network)
    }
}
