// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture-backed page fetcher for deterministic monitor tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use crazyones_core::CrazyOnesError;
use crazyones_monitor::PageFetcher;

/// A [`PageFetcher`] serving canned pages by URL.
///
/// Unregistered URLs and URLs marked with [`set_failure`](Self::set_failure)
/// return network errors. Fetches are counted per URL for assertions.
#[derive(Default)]
pub struct MockFetcher {
    pages: Mutex<HashMap<String, Option<String>>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `html` for `url`.
    pub fn set_page(&self, url: &str, html: impl Into<String>) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Some(html.into()));
    }

    /// Makes `url` fail with a network error.
    pub fn set_failure(&self, url: &str) {
        self.pages.lock().unwrap().insert(url.to_string(), None);
    }

    /// How many times `url` was fetched.
    pub fn fetch_count(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrazyOnesError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        match self.pages.lock().unwrap().get(url) {
            Some(Some(html)) => Ok(html.clone()),
            _ => Err(CrazyOnesError::Network {
                url: url.to_string(),
                source: Box::new(std::io::Error::other("no fixture for URL")),
            }),
        }
    }
}
