// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-user subscription store.
//!
//! Persisted as a JSON array sorted by chat id. Deactivation (by `/stop`,
//! a membership-loss event, or a blocked send) keeps the entry and its
//! locale preference so `/start` restores the previous choice. Every
//! mutation saves atomically before the caller acknowledges the user.

use std::collections::BTreeMap;

use chrono::Utc;
use crazyones_core::fsio;
use crazyones_core::{CrazyOnesError, DataDir, Locale};
use serde::{Deserialize, Serialize};

/// One Telegram chat's subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub chat_id: i64,
    /// Locale whose updates this chat receives.
    pub locale: Locale,
    /// UI language; defaults to `locale`.
    pub ui_lang: Locale,
    pub active: bool,
    /// Subscription timestamp, RFC 3339.
    pub since: String,
}

/// All subscriptions, keyed by chat id in memory, persisted as an array.
#[derive(Debug)]
pub struct SubscriberStore {
    path: std::path::PathBuf,
    entries: BTreeMap<i64, Subscriber>,
}

impl SubscriberStore {
    pub fn load(data: &DataDir) -> Result<Self, CrazyOnesError> {
        let list: Vec<Subscriber> = fsio::read_json_or_default(&data.subscribers())?;
        let entries = list.into_iter().map(|s| (s.chat_id, s)).collect();
        Ok(Self {
            path: data.subscribers(),
            entries,
        })
    }

    pub fn get(&self, chat_id: i64) -> Option<&Subscriber> {
        self.entries.get(&chat_id)
    }

    /// Whether the chat has an active subscription.
    pub fn is_active(&self, chat_id: i64) -> bool {
        self.entries.get(&chat_id).is_some_and(|s| s.active)
    }

    /// Creates a subscription or reactivates an existing one, keeping any
    /// stored locale preference. Returns the subscriber after saving, plus
    /// whether the entry was newly created (a first-time subscriber).
    pub fn upsert_active(
        &mut self,
        chat_id: i64,
        default_locale: &Locale,
    ) -> Result<(Subscriber, bool), CrazyOnesError> {
        let created = !self.entries.contains_key(&chat_id);
        let entry = self.entries.entry(chat_id).or_insert_with(|| Subscriber {
            chat_id,
            locale: default_locale.clone(),
            ui_lang: default_locale.clone(),
            active: true,
            since: Utc::now().to_rfc3339(),
        });
        entry.active = true;
        let snapshot = entry.clone();
        self.save()?;
        Ok((snapshot, created))
    }

    /// Stores a chat's chosen locale (and UI language). No-op for unknown
    /// chats.
    pub fn set_locale(&mut self, chat_id: i64, locale: &Locale) -> Result<(), CrazyOnesError> {
        if let Some(entry) = self.entries.get_mut(&chat_id) {
            entry.locale = locale.clone();
            entry.ui_lang = locale.clone();
            self.save()?;
        }
        Ok(())
    }

    /// Deactivates a subscription; returns whether one existed.
    pub fn deactivate(&mut self, chat_id: i64) -> Result<bool, CrazyOnesError> {
        match self.entries.get_mut(&chat_id) {
            Some(entry) => {
                entry.active = false;
                self.save()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Snapshot of active subscribers for one locale, ordered by chat id.
    pub fn active_for_locale(&self, locale: &Locale) -> Vec<Subscriber> {
        self.entries
            .values()
            .filter(|s| s.active && &s.locale == locale)
            .cloned()
            .collect()
    }

    fn save(&self) -> Result<(), CrazyOnesError> {
        let list: Vec<&Subscriber> = self.entries.values().collect();
        fsio::write_json_atomic(&self.path, &list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SubscriberStore) {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        data.ensure().unwrap();
        let store = SubscriberStore::load(&data).unwrap();
        (dir, store)
    }

    fn locale(tag: &str) -> Locale {
        Locale::new(tag).unwrap()
    }

    #[test]
    fn new_subscriber_gets_default_locale() {
        let (_dir, mut store) = store();
        let (sub, created) = store.upsert_active(42, &locale("en-us")).unwrap();
        assert!(created);
        assert!(sub.active);
        assert_eq!(sub.locale, locale("en-us"));
        assert_eq!(sub.ui_lang, locale("en-us"));
    }

    #[test]
    fn reactivation_keeps_locale_preference() {
        let (_dir, mut store) = store();
        store.upsert_active(42, &locale("en-us")).unwrap();
        store.set_locale(42, &locale("es-cl")).unwrap();
        store.deactivate(42).unwrap();
        assert!(!store.is_active(42));

        let (sub, created) = store.upsert_active(42, &locale("en-us")).unwrap();
        assert!(!created, "reactivation is not a new subscription");
        assert!(sub.active);
        assert_eq!(sub.locale, locale("es-cl"));
    }

    #[test]
    fn deactivate_unknown_chat_reports_false() {
        let (_dir, mut store) = store();
        assert!(!store.deactivate(7).unwrap());
    }

    #[test]
    fn active_for_locale_skips_inactive_and_other_locales() {
        let (_dir, mut store) = store();
        store.upsert_active(1, &locale("en-us")).unwrap();
        store.upsert_active(2, &locale("en-us")).unwrap();
        store.upsert_active(3, &locale("es-es")).unwrap();
        store.deactivate(2).unwrap();

        let active = store.active_for_locale(&locale("en-us"));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].chat_id, 1);
    }

    #[test]
    fn store_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        data.ensure().unwrap();

        {
            let mut store = SubscriberStore::load(&data).unwrap();
            store.upsert_active(42, &locale("en-us")).unwrap();
            store.set_locale(42, &locale("ja-jp")).unwrap();
        }

        let reloaded = SubscriberStore::load(&data).unwrap();
        let sub = reloaded.get(42).unwrap();
        assert_eq!(sub.locale, locale("ja-jp"));
        assert!(sub.active);
    }
}
