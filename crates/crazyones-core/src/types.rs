// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the monitor and the bot.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CrazyOnesError;

/// Sentinel stored in place of a date that could not be parsed.
///
/// Later fetches may refresh the record with a real ISO date once the
/// locale's grammar recognizes it.
pub const SENTINEL_DATE: &str = "0000-00-00";

fn locale_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z]{2,3}-[a-z]{2}$").expect("static regex"))
}

/// A validated Apple locale tag of the form `xx-yy` (language-region).
///
/// Ordered so catalogs and trigger documents serialize in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Parses and validates a locale tag.
    pub fn new(tag: &str) -> Result<Self, CrazyOnesError> {
        if locale_pattern().is_match(tag) {
            Ok(Locale(tag.to_string()))
        } else {
            Err(CrazyOnesError::Internal(format!(
                "invalid locale tag: {tag}"
            )))
        }
    }

    /// The full tag, e.g. `en-us`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The language subtag, e.g. `en` for `en-us`.
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Derives a `Language/REGION` display name for tags without a known
    /// human-readable name, e.g. `gd-gb` becomes `Gd/GB`.
    pub fn derived_display_name(&self) -> String {
        match self.0.split_once('-') {
            Some((lang, region)) => {
                let mut chars = lang.chars();
                let lang_cap = match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                };
                format!("{lang_cap}/{}", region.to_uppercase())
            }
            None => self.0.to_uppercase(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = CrazyOnesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::new(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = CrazyOnesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Locale::new(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

/// One row of a locale's security-releases table.
///
/// `id` is unique and ascending within the locale, assigned on first
/// observation and never reused. `(name, target, date)` is the content
/// identity used to recognize a re-observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityUpdate {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub target: String,
    pub date: String,
}

impl SecurityUpdate {
    /// The content identity of this record.
    pub fn content_key(&self) -> ContentKey {
        ContentKey {
            name: self.name.clone(),
            target: self.target.clone(),
            date: self.date.clone(),
        }
    }

    /// Whether the stored date is the unparseable-date sentinel.
    pub fn has_sentinel_date(&self) -> bool {
        self.date == SENTINEL_DATE
    }
}

/// Content identity `(name, target, date)` of a security update.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
    pub name: String,
    pub target: String,
    pub date: String,
}

/// Mapping from locale to its canonical page URL (`language_urls.json`).
pub type LocaleCatalog = BTreeMap<Locale, String>;

/// Mapping from locale to human-readable display name (`language_names.json`).
pub type LocaleNames = BTreeMap<Locale, String>;

/// Mapping from page URL to the SHA-256 digest of its last-processed body
/// (`updates_tracking.json`).
pub type FingerprintLedger = BTreeMap<String, String>;

/// The transient trigger document: locale to newly observed update ids,
/// sorted ascending (`new_updates_trigger.json`).
pub type TriggerDoc = BTreeMap<Locale, Vec<u64>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_accepts_two_and_three_letter_languages() {
        assert!(Locale::new("en-us").is_ok());
        assert!(Locale::new("fil-ph").is_ok());
        assert!(Locale::new("zh-tw").is_ok());
    }

    #[test]
    fn locale_rejects_malformed_tags() {
        for tag in ["", "en", "en-USA", "EN-us", "en_us", "x-default", "1n-us"] {
            assert!(Locale::new(tag).is_err(), "should reject {tag}");
        }
    }

    #[test]
    fn locale_serde_round_trip() {
        let locale = Locale::new("es-cl").unwrap();
        let json = serde_json::to_string(&locale).unwrap();
        assert_eq!(json, "\"es-cl\"");
        let back: Locale = serde_json::from_str(&json).unwrap();
        assert_eq!(back, locale);
    }

    #[test]
    fn locale_deserialization_rejects_invalid() {
        assert!(serde_json::from_str::<Locale>("\"not a locale\"").is_err());
    }

    #[test]
    fn derived_display_name_capitalizes() {
        assert_eq!(
            Locale::new("gd-gb").unwrap().derived_display_name(),
            "Gd/GB"
        );
    }

    #[test]
    fn security_update_omits_missing_url() {
        let update = SecurityUpdate {
            id: 1,
            name: "iOS 17.3".into(),
            url: None,
            target: "iPhone XS and later".into(),
            date: "2024-01-22".into(),
        };
        let json = serde_json::to_string(&update).unwrap();
        assert!(!json.contains("url"));
    }

    #[test]
    fn content_key_ignores_id_and_url() {
        let a = SecurityUpdate {
            id: 1,
            name: "iOS 17.3".into(),
            url: None,
            target: "iPhone XS and later".into(),
            date: "2024-01-22".into(),
        };
        let mut b = a.clone();
        b.id = 99;
        b.url = Some("https://support.apple.com/kb/HT214056".into());
        assert_eq!(a.content_key(), b.content_key());
    }

    #[test]
    fn trigger_doc_serializes_sorted() {
        let mut doc = TriggerDoc::new();
        doc.insert(Locale::new("es-es").unwrap(), vec![287]);
        doc.insert(Locale::new("en-us").unwrap(), vec![412, 413]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"en-us":[412,413],"es-es":[287]}"#);
    }
}
