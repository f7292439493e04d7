// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-locale scrape step: fetch, fingerprint, parse.
//!
//! The page body's SHA-256 digest is compared against the fingerprint from
//! the previous tick; unchanged pages are not parsed at all. Errors come
//! back as values: a network error means "retry next tick", a parse error
//! means "leave the locale and its fingerprint untouched".

use crazyones_core::{CrazyOnesError, Locale};
use sha2::{Digest, Sha256};

use crate::fetch::PageFetcher;
use crate::table::{self, ParsedUpdate};

/// Outcome of scraping one locale page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// The page body matches the prior fingerprint; nothing was parsed.
    Unchanged,
    /// The page changed; the new fingerprint and the parsed rows.
    Fetched {
        fingerprint: String,
        records: Vec<ParsedUpdate>,
    },
}

/// Hex-encoded SHA-256 digest of a page body.
pub fn sha256_hex(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Fetches and parses one locale page.
pub async fn scrape_locale(
    fetcher: &dyn PageFetcher,
    locale: &Locale,
    url: &str,
    prior_fingerprint: Option<&str>,
) -> Result<ScrapeOutcome, CrazyOnesError> {
    let body = fetcher.fetch(url).await?;
    let fingerprint = sha256_hex(&body);

    if prior_fingerprint == Some(fingerprint.as_str()) {
        return Ok(ScrapeOutcome::Unchanged);
    }

    let records = table::extract_security_updates(&body, url, locale)?;
    Ok(ScrapeOutcome::Fetched {
        fingerprint,
        records,
    })
}
