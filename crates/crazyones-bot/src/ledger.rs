// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The delivery ledger: which update ids each subscriber has already
//! received.
//!
//! Append-only and flushed after every successful send, so a crash between
//! a send and the next flush can at worst repeat the single in-flight
//! message. Every id recorded here is never sent again, across restarts
//! and across duplicate triggers.

use std::collections::BTreeMap;
use std::collections::HashSet;

use crazyones_core::fsio;
use crazyones_core::{CrazyOnesError, DataDir, Locale};

/// `{chat_id: {locale: [id, …]}}`, ids kept sorted ascending.
type LedgerMap = BTreeMap<String, BTreeMap<Locale, Vec<u64>>>;

#[derive(Debug)]
pub struct DeliveryLedger {
    path: std::path::PathBuf,
    entries: LedgerMap,
}

impl DeliveryLedger {
    pub fn load(data: &DataDir) -> Result<Self, CrazyOnesError> {
        Ok(Self {
            path: data.delivery_ledger(),
            entries: fsio::read_json_or_default(&data.delivery_ledger())?,
        })
    }

    /// Whether this `(subscriber, locale, id)` tuple was already delivered.
    pub fn is_delivered(&self, chat_id: i64, locale: &Locale, id: u64) -> bool {
        self.entries
            .get(&chat_id.to_string())
            .and_then(|locales| locales.get(locale))
            .is_some_and(|ids| ids.binary_search(&id).is_ok())
    }

    /// The set of ids already delivered to a subscriber for one locale.
    pub fn delivered(&self, chat_id: i64, locale: &Locale) -> HashSet<u64> {
        self.entries
            .get(&chat_id.to_string())
            .and_then(|locales| locales.get(locale))
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Records a delivery and flushes the ledger to disk.
    pub fn record(&mut self, chat_id: i64, locale: &Locale, id: u64) -> Result<(), CrazyOnesError> {
        let ids = self
            .entries
            .entry(chat_id.to_string())
            .or_default()
            .entry(locale.clone())
            .or_default();
        if let Err(pos) = ids.binary_search(&id) {
            ids.insert(pos, id);
            fsio::write_json_atomic(&self.path, &self.entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> (tempfile::TempDir, DeliveryLedger) {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        data.ensure().unwrap();
        let ledger = DeliveryLedger::load(&data).unwrap();
        (dir, ledger)
    }

    fn locale(tag: &str) -> Locale {
        Locale::new(tag).unwrap()
    }

    #[test]
    fn record_and_lookup() {
        let (_dir, mut ledger) = ledger();
        assert!(!ledger.is_delivered(42, &locale("en-us"), 6));
        ledger.record(42, &locale("en-us"), 6).unwrap();
        assert!(ledger.is_delivered(42, &locale("en-us"), 6));
        assert!(!ledger.is_delivered(42, &locale("es-es"), 6));
        assert!(!ledger.is_delivered(7, &locale("en-us"), 6));
    }

    #[test]
    fn ids_stay_sorted() {
        let (_dir, mut ledger) = ledger();
        for id in [5, 1, 3] {
            ledger.record(42, &locale("en-us"), id).unwrap();
        }
        let delivered = ledger.delivered(42, &locale("en-us"));
        assert_eq!(delivered.len(), 3);
        assert!(delivered.contains(&1) && delivered.contains(&3) && delivered.contains(&5));
    }

    #[test]
    fn duplicate_record_is_a_noop() {
        let (_dir, mut ledger) = ledger();
        ledger.record(42, &locale("en-us"), 6).unwrap();
        ledger.record(42, &locale("en-us"), 6).unwrap();
        assert_eq!(ledger.delivered(42, &locale("en-us")).len(), 1);
    }

    #[test]
    fn ledger_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        data.ensure().unwrap();

        {
            let mut ledger = DeliveryLedger::load(&data).unwrap();
            ledger.record(42, &locale("en-us"), 6).unwrap();
        }

        let reloaded = DeliveryLedger::load(&data).unwrap();
        assert!(reloaded.is_delivered(42, &locale("en-us"), 6));
    }
}
