// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! UI translation catalogs.
//!
//! One flat JSON document per UI language, loaded once at startup from a
//! read-only directory and immutable afterwards. Lookup falls back along
//! chosen language → same-language sibling → `en-us` → the raw key (logged).
//! Placeholders are positional `{0}`, `{1}`, …; formatting substitutes in
//! order and never evaluates expressions.

use std::collections::HashMap;
use std::path::Path;

use crazyones_core::{CrazyOnesError, Locale};
use tracing::{info, warn};

/// Built-in English strings; the directory may override them.
const BUILTIN_EN_US: &str = include_str!("strings/en-us.json");
/// Built-in Spanish strings.
const BUILTIN_ES_ES: &str = include_str!("strings/es-es.json");

/// All loaded translation catalogs, keyed by locale tag.
#[derive(Debug, Clone)]
pub struct Translations {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl Translations {
    /// The compiled-in catalogs only (English and Spanish).
    pub fn builtin() -> Self {
        let mut catalogs = HashMap::new();
        for (tag, raw) in [("en-us", BUILTIN_EN_US), ("es-es", BUILTIN_ES_ES)] {
            let parsed: HashMap<String, String> =
                serde_json::from_str(raw).expect("built-in strings are valid JSON");
            catalogs.insert(tag.to_string(), parsed);
        }
        Self { catalogs }
    }

    /// Loads `<locale>.json` documents from a directory over the built-in
    /// catalogs. A missing directory leaves the built-ins in place; a file
    /// that fails to parse is skipped with a warning.
    pub fn load_dir(dir: &Path) -> Result<Self, CrazyOnesError> {
        let mut translations = Self::builtin();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(dir = %dir.display(), "no translations directory, using built-in strings");
                return Ok(translations);
            }
            Err(e) => return Err(CrazyOnesError::storage(e)),
        };

        let mut loaded = 0usize;
        for entry in entries {
            let entry = entry.map_err(CrazyOnesError::storage)?;
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Ok(locale) = Locale::new(stem) else {
                continue; // strings.json and friends are templates, not catalogs
            };

            match std::fs::read_to_string(&path)
                .map_err(CrazyOnesError::storage)
                .and_then(|raw| {
                    serde_json::from_str::<HashMap<String, String>>(&raw).map_err(|e| {
                        CrazyOnesError::Storage {
                            source: Box::new(e),
                        }
                    })
                }) {
                Ok(catalog) => {
                    translations
                        .catalogs
                        .entry(locale.as_str().to_string())
                        .or_default()
                        .extend(catalog);
                    loaded += 1;
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unreadable translation file");
                }
            }
        }

        info!(loaded, "translation catalogs loaded");
        Ok(translations)
    }

    /// Whether a catalog exists for the exact locale tag.
    pub fn has_language(&self, lang: &Locale) -> bool {
        self.catalogs.contains_key(lang.as_str())
    }

    /// Looks up a message, walking the fallback chain.
    pub fn get(&self, lang: &Locale, key: &str) -> String {
        if let Some(text) = self.catalogs.get(lang.as_str()).and_then(|c| c.get(key)) {
            return text.clone();
        }

        // Same-language sibling, e.g. es-cl falls back to es-es.
        let language = lang.language();
        if let Some(text) = self
            .catalogs
            .iter()
            .find(|(tag, catalog)| {
                tag.split('-').next() == Some(language) && catalog.contains_key(key)
            })
            .and_then(|(_, catalog)| catalog.get(key))
        {
            return text.clone();
        }

        if let Some(text) = self.catalogs.get("en-us").and_then(|c| c.get(key)) {
            return text.clone();
        }

        warn!(key, lang = %lang, "missing translation key, returning raw key");
        key.to_string()
    }

    /// Looks up a message and substitutes positional placeholders.
    pub fn format(&self, lang: &Locale, key: &str, args: &[&str]) -> String {
        let mut text = self.get(lang, key);
        for (idx, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{idx}}}"), arg);
        }
        text
    }
}
