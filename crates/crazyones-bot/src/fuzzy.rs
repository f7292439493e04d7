// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fuzzy matching for mistyped commands, OS tags, and locale codes.
//!
//! The candidate sets are small and bounded, so a deterministic
//! edit-distance ratio (normalized Levenshtein) keeps suggestions stable.

use crazyones_core::SecurityUpdate;
use regex::Regex;
use strsim::normalized_levenshtein;

/// Verbs the dispatcher understands.
pub const COMMAND_VERBS: &[&str] = &["start", "stop", "updates", "language", "about", "help"];

/// Canonical OS tokens recognized in release names.
pub const OS_TOKENS: &[&str] = &["ios", "ipados", "macos", "watchos", "tvos", "visionos"];

/// Minimum similarity for verb suggestions.
const VERB_CUTOFF: f64 = 0.6;

/// Minimum similarity for OS-tag suggestions.
const TAG_CUTOFF: f64 = 0.5;

/// Best candidate above `cutoff`, or `None`. Ties resolve to the earlier
/// candidate so suggestions are deterministic.
fn closest<'a>(input: &str, candidates: &[&'a str], cutoff: f64) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;
    for candidate in candidates {
        let score = normalized_levenshtein(input, candidate);
        if score >= cutoff && best.is_none_or(|(_, b)| score > b) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Suggests a known verb for an unrecognized one.
pub fn suggest_verb(input: &str) -> Option<&'static str> {
    closest(input, COMMAND_VERBS, VERB_CUTOFF)
}

/// Suggests a known locale code for an unrecognized one.
pub fn suggest_locale<'a>(input: &str, known: &[&'a str]) -> Option<&'a str> {
    closest(input, known, VERB_CUTOFF)
}

/// The canonical OS tokens actually present (word-bounded) in a store's
/// release names.
pub fn candidate_os_tokens(store: &[SecurityUpdate]) -> Vec<&'static str> {
    OS_TOKENS
        .iter()
        .filter(|token| {
            store
                .iter()
                .any(|update| word_bounded_contains(&update.name, token))
        })
        .copied()
        .collect()
}

/// Suggests an OS token for a tag that matched nothing.
pub fn suggest_tag(input: &str, candidates: &[&'static str]) -> Option<&'static str> {
    closest(input, candidates, TAG_CUTOFF)
}

/// Case-insensitive word-boundary containment test.
pub fn word_bounded_contains(haystack: &str, token: &str) -> bool {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(token));
    Regex::new(&pattern)
        .map(|re| re.is_match(haystack))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(name: &str) -> SecurityUpdate {
        SecurityUpdate {
            id: 1,
            name: name.into(),
            url: None,
            target: "t".into(),
            date: "2024-01-22".into(),
        }
    }

    #[test]
    fn close_verb_is_suggested() {
        assert_eq!(suggest_verb("updat"), Some("updates"));
        assert_eq!(suggest_verb("strat"), Some("start"));
        assert_eq!(suggest_verb("languge"), Some("language"));
    }

    #[test]
    fn distant_verb_is_not_suggested() {
        assert_eq!(suggest_verb("frobnicate"), None);
        assert_eq!(suggest_verb("x"), None);
    }

    #[test]
    fn word_boundaries_are_respected() {
        assert!(word_bounded_contains("iOS 17.3", "ios"));
        assert!(word_bounded_contains("watchOS 10.3", "watchos"));
        // "ios" inside "visionos"... there is no word boundary split there.
        assert!(!word_bounded_contains("visionOS 1.1", "ios"));
    }

    #[test]
    fn candidates_come_from_store_names() {
        let store = vec![
            update("iOS 17.3 and iPadOS 17.3"),
            update("macOS Sonoma 14.3"),
        ];
        let candidates = candidate_os_tokens(&store);
        assert!(candidates.contains(&"ios"));
        assert!(candidates.contains(&"ipados"));
        assert!(candidates.contains(&"macos"));
        assert!(!candidates.contains(&"watchos"));
    }

    #[test]
    fn tag_suggestion_uses_lower_cutoff() {
        let candidates = vec!["ios", "macos"];
        assert_eq!(suggest_tag("io", &candidates), Some("ios"));
        assert_eq!(suggest_tag("macso", &candidates), Some("macos"));
        assert_eq!(suggest_tag("zzzzzz", &candidates), None);
    }

    #[test]
    fn locale_suggestion() {
        let known = vec!["en-us", "es-es", "fr-fr"];
        assert_eq!(suggest_locale("en-uss", &known), Some("en-us"));
        assert_eq!(suggest_locale("qqqqq", &known), None);
    }
}
