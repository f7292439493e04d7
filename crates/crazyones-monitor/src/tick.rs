// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One full monitor pass: reconcile the index, scrape changed locales,
//! assign ids, persist stores, and announce novelty.
//!
//! Per-locale fetches run with bounded concurrency to respect Apple's
//! origin; id assignment and the trigger write run serially after every
//! fetch has completed, so no two writers ever touch the same locale file.

use futures::stream::{self, StreamExt};
use tracing::{error, info, warn};

use crazyones_core::fsio;
use crazyones_core::{CrazyOnesError, DataDir, FingerprintLedger, LocaleCatalog, TriggerDoc};

use crate::fetch::PageFetcher;
use crate::index;
use crate::names;
use crate::scrape::{self, ScrapeOutcome};
use crate::store;
use crate::trigger;

/// Summary of one tick, for logging and exit-code mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub locales_total: usize,
    pub locales_changed: usize,
    pub locales_unchanged: usize,
    pub network_failures: usize,
    pub parse_failures: usize,
    pub new_ids: usize,
    pub trigger_written: bool,
}

impl TickOutcome {
    /// Whether every failure this tick was a network failure.
    pub fn network_only_failure(&self) -> bool {
        self.network_failures > 0 && self.parse_failures == 0 && self.locales_changed == 0
    }
}

/// Runs one monitor tick against the given index URL.
///
/// A failing index fetch aborts the tick with a network error (retried next
/// tick). Individual locale failures are counted and logged but do not stop
/// the others. A failed store write aborts the tick before any trigger is
/// written.
pub async fn run_tick(
    fetcher: &dyn PageFetcher,
    data: &DataDir,
    index_url: &str,
    concurrency: usize,
) -> Result<TickOutcome, CrazyOnesError> {
    data.ensure()?;

    // Stage one: locale-catalog change detection.
    let index_html = fetcher.fetch(index_url).await?;
    let mut extracted = index::extract_locale_links(&index_html, index_url)?;
    if extracted.is_empty() {
        warn!(url = index_url, "no alternate-locale links found, falling back to index locale");
        extracted = index::fallback_catalog(index_url);
    }

    let prior: LocaleCatalog = fsio::read_json_or_default(&data.locale_catalog())?;
    let diff = index::reconcile(extracted, &prior);
    if diff.has_changes() {
        info!(
            added = diff.added.len(),
            removed = diff.removed.len(),
            updated = diff.updated.len(),
            unchanged = diff.unchanged.len(),
            "locale catalog reconciled"
        );
        fsio::write_json_atomic(&data.locale_catalog(), &diff.catalog)?;
    } else if !data.locale_catalog().exists() {
        fsio::write_json_atomic(&data.locale_catalog(), &diff.catalog)?;
    }
    names::update_locale_names(data, &diff.catalog)?;

    // Stage two: per-locale scrape with bounded concurrency.
    let mut fingerprints: FingerprintLedger = fsio::read_json_or_default(&data.fingerprints())?;

    let jobs: Vec<_> = diff
        .catalog
        .iter()
        .map(|(locale, url)| {
            (
                locale.clone(),
                url.clone(),
                fingerprints.get(url).cloned(),
            )
        })
        .collect();

    let mut results: Vec<_> = stream::iter(jobs)
        .map(|(locale, url, prior_fp)| async move {
            let outcome = scrape::scrape_locale(fetcher, &locale, &url, prior_fp.as_deref()).await;
            (locale, url, outcome)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;
    results.sort_by(|a, b| a.0.cmp(&b.0));

    // All fetches are done; everything below is serial.
    let mut outcome = TickOutcome {
        locales_total: results.len(),
        ..TickOutcome::default()
    };
    let mut novelties = TriggerDoc::new();

    for (locale, url, result) in results {
        match result {
            Ok(ScrapeOutcome::Unchanged) => {
                outcome.locales_unchanged += 1;
            }
            Ok(ScrapeOutcome::Fetched {
                fingerprint,
                records,
            }) => {
                let existing = store::load_locale_store(data, &locale)?;
                let assigned = store::assign_ids(&existing, &records, false);
                if let Err(e) = store::save_locale_store(data, &locale, &assigned.store) {
                    error!(locale = %locale, error = %e, "store write failed, aborting tick");
                    return Err(e);
                }
                fingerprints.insert(url, fingerprint);
                outcome.locales_changed += 1;
                outcome.new_ids += assigned.novelty.len();
                if !assigned.novelty.is_empty() {
                    info!(
                        locale = %locale,
                        new = assigned.novelty.len(),
                        "new security updates observed"
                    );
                    novelties.insert(locale, assigned.novelty);
                }
            }
            Err(e @ (CrazyOnesError::Network { .. } | CrazyOnesError::Timeout { .. })) => {
                warn!(locale = %locale, error = %e, "locale fetch failed, will retry next tick");
                outcome.network_failures += 1;
            }
            Err(e) => {
                // Parse failure: the fingerprint stays stale so the next
                // tick parses this page again.
                warn!(locale = %locale, url, error = %e, "locale parse failed");
                outcome.parse_failures += 1;
            }
        }
    }

    fsio::write_json_atomic(&data.fingerprints(), &fingerprints)?;
    outcome.trigger_written = trigger::write_trigger(data, &novelties)?;

    info!(
        locales = outcome.locales_total,
        changed = outcome.locales_changed,
        unchanged = outcome.locales_unchanged,
        new_ids = outcome.new_ids,
        trigger = outcome.trigger_written,
        "tick complete"
    );
    Ok(outcome)
}
