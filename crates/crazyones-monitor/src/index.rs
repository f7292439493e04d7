// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locale-index reconciliation.
//!
//! Apple publishes the security-releases page under every locale it supports
//! and lists them as `<link rel="alternate" hreflang="xx-yy">` tags in the
//! page head. Each tick extracts that set and reconciles it against the
//! stored catalog, classifying every locale as added, removed, updated, or
//! unchanged. Reconciliation is pure and idempotent; the caller persists the
//! new catalog only after it succeeds.

use std::collections::BTreeSet;

use crazyones_core::{CrazyOnesError, Locale, LocaleCatalog};
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Result of reconciling a freshly extracted locale set against the stored
/// catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDiff {
    /// The new catalog to persist.
    pub catalog: LocaleCatalog,
    pub added: BTreeSet<Locale>,
    pub removed: BTreeSet<Locale>,
    pub updated: BTreeSet<Locale>,
    pub unchanged: BTreeSet<Locale>,
}

impl IndexDiff {
    /// Whether the catalog differs from the prior one.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || !self.updated.is_empty()
    }
}

/// Extracts the locale-to-URL mapping from the index page head.
///
/// `hreflang` values that are not `xx-yy` tags (e.g. `x-default`) are
/// skipped. Relative hrefs resolve against `base_url`. If the page declares
/// the same locale twice with different URLs, the last occurrence wins and a
/// warning is logged.
pub fn extract_locale_links(html: &str, base_url: &str) -> Result<LocaleCatalog, CrazyOnesError> {
    let base = Url::parse(base_url).map_err(|e| CrazyOnesError::Parse {
        url: base_url.to_string(),
        message: format!("invalid base URL: {e}"),
    })?;

    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"link[rel="alternate"]"#).expect("static selector");

    let mut catalog = LocaleCatalog::new();
    for element in document.select(&selector) {
        let (Some(hreflang), Some(href)) = (
            element.value().attr("hreflang"),
            element.value().attr("href"),
        ) else {
            continue;
        };

        let Ok(locale) = Locale::new(&hreflang.to_ascii_lowercase()) else {
            debug!(hreflang, "skipping non-locale alternate link");
            continue;
        };

        let resolved = match base.join(href) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!(locale = %locale, href, error = %e, "unresolvable alternate href");
                continue;
            }
        };

        if let Some(previous) = catalog.insert(locale.clone(), resolved.clone()) {
            if previous != resolved {
                warn!(
                    locale = %locale,
                    previous,
                    current = resolved,
                    "index declares locale twice, last occurrence wins"
                );
            }
        }
    }

    Ok(catalog)
}

/// Fallback catalog when the index page yields no alternate links: the index
/// URL itself, under the locale embedded in its path.
pub fn fallback_catalog(base_url: &str) -> LocaleCatalog {
    let mut catalog = LocaleCatalog::new();
    let segments: Vec<&str> = base_url.split('/').filter(|s| !s.is_empty()).collect();
    let tag = segments
        .iter()
        .rev()
        .find_map(|segment| Locale::new(&segment.to_ascii_lowercase()).ok())
        .unwrap_or_else(|| Locale::new("en-us").expect("static locale"));
    catalog.insert(tag, base_url.to_string());
    catalog
}

/// Classifies every locale in `catalog` against the `prior` catalog.
///
/// On first run (`prior` empty), every entry is classified as added. Running
/// on identical input yields an identical diff.
pub fn reconcile(catalog: LocaleCatalog, prior: &LocaleCatalog) -> IndexDiff {
    let mut added = BTreeSet::new();
    let mut updated = BTreeSet::new();
    let mut unchanged = BTreeSet::new();

    for (locale, url) in &catalog {
        match prior.get(locale) {
            None => {
                added.insert(locale.clone());
            }
            Some(prior_url) if prior_url != url => {
                updated.insert(locale.clone());
            }
            Some(_) => {
                unchanged.insert(locale.clone());
            }
        }
    }

    let removed: BTreeSet<Locale> = prior
        .keys()
        .filter(|locale| !catalog.contains_key(*locale))
        .cloned()
        .collect();

    IndexDiff {
        catalog,
        added,
        removed,
        updated,
        unchanged,
    }
}
