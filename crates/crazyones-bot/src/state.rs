// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared bot state: the stores the two bot tasks mutate, plus read-only
//! views of the monitor's files.
//!
//! The dispatcher and the trigger watcher share one `BotState` behind a
//! single mutex (one writer at a time); monitor-owned files are re-read on
//! demand and never written from here.

use crazyones_core::fsio;
use crazyones_core::{CrazyOnesError, DataDir, Locale, LocaleCatalog, LocaleNames, SecurityUpdate};

use crate::i18n::Translations;
use crate::ledger::DeliveryLedger;
use crate::subscribers::SubscriberStore;

/// Default locale for new subscribers and for UI fallback.
pub const DEFAULT_LOCALE: &str = "en-us";

pub struct BotState {
    pub data: DataDir,
    pub translations: Translations,
    pub subscribers: SubscriberStore,
    pub ledger: DeliveryLedger,
}

impl BotState {
    pub fn load(data: DataDir, translations: Translations) -> Result<Self, CrazyOnesError> {
        data.ensure()?;
        let subscribers = SubscriberStore::load(&data)?;
        let ledger = DeliveryLedger::load(&data)?;
        Ok(Self {
            data,
            translations,
            subscribers,
            ledger,
        })
    }

    pub fn default_locale() -> Locale {
        Locale::new(DEFAULT_LOCALE).expect("static locale")
    }

    /// UI language for a chat: the subscriber's, or the default.
    pub fn ui_lang(&self, chat_id: i64) -> Locale {
        self.subscribers
            .get(chat_id)
            .map(|s| s.ui_lang.clone())
            .unwrap_or_else(Self::default_locale)
    }

    /// The locale whose updates a chat sees: the subscriber's, or the
    /// default.
    pub fn chat_locale(&self, chat_id: i64) -> Locale {
        self.subscribers
            .get(chat_id)
            .map(|s| s.locale.clone())
            .unwrap_or_else(Self::default_locale)
    }

    /// The monitor's locale catalog (read-only, re-read per call).
    pub fn catalog(&self) -> Result<LocaleCatalog, CrazyOnesError> {
        fsio::read_json_or_default(&self.data.locale_catalog())
    }

    /// Display name for a locale, from the monitor's name map when present.
    pub fn display_name(&self, locale: &Locale) -> String {
        let names: LocaleNames =
            fsio::read_json_or_default(&self.data.locale_names()).unwrap_or_default();
        names
            .get(locale)
            .cloned()
            .unwrap_or_else(|| locale.derived_display_name())
    }

    /// One locale's store (read-only; missing file is an empty store).
    pub fn store_for(&self, locale: &Locale) -> Result<Vec<SecurityUpdate>, CrazyOnesError> {
        fsio::read_json_or_default(&self.data.locale_store(locale))
    }
}
