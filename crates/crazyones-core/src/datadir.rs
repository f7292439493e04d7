// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layout of the shared data directory.
//!
//! The directory is the only coupling surface between the monitor and the
//! bot. The monitor writes the catalog, name map, fingerprint ledger, locale
//! stores, and the trigger document; the bot writes the subscriber store and
//! delivery ledger. Paths are fixed; they form the contract with operators.

use std::path::{Path, PathBuf};

use crate::error::CrazyOnesError;
use crate::types::Locale;

/// Resolves the fixed file layout under one data directory root.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the directory tree (root and `updates/`).
    pub fn ensure(&self) -> Result<(), CrazyOnesError> {
        std::fs::create_dir_all(self.updates_dir()).map_err(CrazyOnesError::storage)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `language_urls.json`: the locale catalog, `{locale: url}`.
    pub fn locale_catalog(&self) -> PathBuf {
        self.root.join("language_urls.json")
    }

    /// `language_names.json`: `{locale: display-name}`.
    pub fn locale_names(&self) -> PathBuf {
        self.root.join("language_names.json")
    }

    /// `updates_tracking.json`: `{url: sha256-hex}`.
    pub fn fingerprints(&self) -> PathBuf {
        self.root.join("updates_tracking.json")
    }

    /// `new_updates_trigger.json`: the transient trigger document.
    pub fn trigger(&self) -> PathBuf {
        self.root.join("new_updates_trigger.json")
    }

    /// `updates/`: one store file per locale.
    pub fn updates_dir(&self) -> PathBuf {
        self.root.join("updates")
    }

    /// `updates/<locale>.json`: one locale's ordered security updates.
    pub fn locale_store(&self, locale: &Locale) -> PathBuf {
        self.updates_dir().join(format!("{locale}.json"))
    }

    /// `subscribers.json`: the bot's subscriber store.
    pub fn subscribers(&self) -> PathBuf {
        self.root.join("subscribers.json")
    }

    /// `delivery_ledger.json`: `{chat_id: {locale: [id, ...]}}`.
    pub fn delivery_ledger(&self) -> PathBuf {
        self.root.join("delivery_ledger.json")
    }

    /// `crazyones.lock`: the monitor's single-instance PID lock.
    pub fn instance_lock(&self) -> PathBuf {
        self.root.join("crazyones.lock")
    }

    /// `crazyones.lock.stop`: stop request for the lock holder.
    pub fn stop_request(&self) -> PathBuf {
        self.root.join("crazyones.lock.stop")
    }

    /// `crazyones.log`: mirrored log lines for `--log`.
    pub fn log_file(&self) -> PathBuf {
        self.root.join("crazyones.log")
    }
}
