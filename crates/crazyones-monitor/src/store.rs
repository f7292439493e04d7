// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Id assignment and locale-store persistence.
//!
//! Ids are the contract with subscribers: `(locale, id)` identifies an
//! update forever. A parsed row matching a stored content identity keeps its
//! id; everything else gets `max(existing) + 1`. Stored entries absent from
//! the latest fetch are retained: Apple's list occasionally truncates and
//! entries that reappear must keep their id.

use std::collections::{HashMap, HashSet};

use crazyones_core::fsio;
use crazyones_core::{
    ContentKey, CrazyOnesError, DataDir, Locale, SecurityUpdate, SENTINEL_DATE,
};

use crate::table::ParsedUpdate;

/// The new store content for one locale plus the ids allocated this tick.
#[derive(Debug, Clone)]
pub struct AssignResult {
    pub store: Vec<SecurityUpdate>,
    /// Newly allocated ids, ascending.
    pub novelty: Vec<u64>,
}

/// Merges freshly parsed rows into the existing store.
///
/// Matching: full content identity `(name, target, date)` first; a stored
/// entry with the sentinel date also matches on `(name, target)` so a later
/// successful date parse refreshes it in place. Matched entries keep their
/// id and take the fetched URL when one is now present. Unmatched parsed
/// rows are allocated ascending new ids in source order.
///
/// The result is the current fetch in source order, followed by
/// preserved-but-absent entries in their prior relative order (dropped
/// entirely when `full_rewrite` is set).
pub fn assign_ids(
    existing: &[SecurityUpdate],
    parsed: &[ParsedUpdate],
    full_rewrite: bool,
) -> AssignResult {
    let mut next_id = existing.iter().map(|u| u.id).max().unwrap_or(0) + 1;

    let mut by_key: HashMap<ContentKey, usize> = HashMap::new();
    let mut sentinel_by_name_target: HashMap<(&str, &str), usize> = HashMap::new();
    for (idx, update) in existing.iter().enumerate() {
        by_key.entry(update.content_key()).or_insert(idx);
        if update.has_sentinel_date() {
            sentinel_by_name_target
                .entry((update.name.as_str(), update.target.as_str()))
                .or_insert(idx);
        }
    }

    let mut matched: HashSet<usize> = HashSet::new();
    let mut novelty = Vec::new();
    let mut store = Vec::with_capacity(existing.len() + parsed.len());

    for row in parsed {
        let key = ContentKey {
            name: row.name.clone(),
            target: row.target.clone(),
            date: row.date.clone(),
        };

        let hit = match by_key.get(&key) {
            Some(&idx) if !matched.contains(&idx) => Some(idx),
            _ if row.date != SENTINEL_DATE => {
                // Sentinel-date rematch: the stored entry never got a
                // parseable date; refresh it instead of duplicating.
                match sentinel_by_name_target.get(&(row.name.as_str(), row.target.as_str())) {
                    Some(&idx) if !matched.contains(&idx) => Some(idx),
                    _ => None,
                }
            }
            _ => None,
        };

        match hit {
            Some(idx) => {
                matched.insert(idx);
                let prior = &existing[idx];
                store.push(SecurityUpdate {
                    id: prior.id,
                    name: row.name.clone(),
                    url: row.url.clone().or_else(|| prior.url.clone()),
                    target: row.target.clone(),
                    date: row.date.clone(),
                });
            }
            None => {
                let id = next_id;
                next_id += 1;
                novelty.push(id);
                store.push(SecurityUpdate {
                    id,
                    name: row.name.clone(),
                    url: row.url.clone(),
                    target: row.target.clone(),
                    date: row.date.clone(),
                });
            }
        }
    }

    if !full_rewrite {
        for (idx, update) in existing.iter().enumerate() {
            if !matched.contains(&idx) {
                store.push(update.clone());
            }
        }
    }

    AssignResult { store, novelty }
}

/// Loads one locale's store; a missing file is an empty store.
pub fn load_locale_store(
    data: &DataDir,
    locale: &Locale,
) -> Result<Vec<SecurityUpdate>, CrazyOnesError> {
    fsio::read_json_or_default(&data.locale_store(locale))
}

/// Persists one locale's store atomically.
pub fn save_locale_store(
    data: &DataDir,
    locale: &Locale,
    store: &[SecurityUpdate],
) -> Result<(), CrazyOnesError> {
    fsio::write_json_atomic(&data.locale_store(locale), &store)
}
