// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-locale date grammars.
//!
//! Apple renders release dates in each locale's human format. Stored dates
//! are always ISO 8601 (`YYYY-MM-DD`); a date no grammar recognizes is stored
//! as the sentinel `0000-00-00` and may be refreshed by a later fetch.
//!
//! Recognized shapes:
//! - ISO passthrough: `2024-01-22`
//! - CJK: `2024年1月22日` (Japanese and Chinese)
//! - Month-name grammars for en, es, fr, de, it, pt, nl, in both
//!   day-month-year and month-day-year orders (`22 January 2024`,
//!   `January 22, 2024`, `22 de enero de 2024`, `22. Januar 2024`).

use std::sync::OnceLock;

use chrono::NaiveDate;
use crazyones_core::Locale;
use regex::Regex;

const MONTHS_EN: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];
const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];
const MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];
const MONTHS_DE: [&str; 12] = [
    "januar", "februar", "märz", "april", "mai", "juni", "juli", "august", "september",
    "oktober", "november", "dezember",
];
const MONTHS_IT: [&str; 12] = [
    "gennaio", "febbraio", "marzo", "aprile", "maggio", "giugno", "luglio", "agosto",
    "settembre", "ottobre", "novembre", "dicembre",
];
const MONTHS_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];
const MONTHS_NL: [&str; 12] = [
    "januari", "februari", "maart", "april", "mei", "juni", "juli", "augustus", "september",
    "oktober", "november", "december",
];

fn month_table(language: &str) -> Option<&'static [&'static str; 12]> {
    match language {
        "en" => Some(&MONTHS_EN),
        "es" => Some(&MONTHS_ES),
        "fr" => Some(&MONTHS_FR),
        "de" => Some(&MONTHS_DE),
        "it" => Some(&MONTHS_IT),
        "pt" => Some(&MONTHS_PT),
        "nl" => Some(&MONTHS_NL),
        _ => None,
    }
}

fn iso_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("static regex"))
}

fn cjk_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{4})\s*年\s*(\d{1,2})\s*月\s*(\d{1,2})\s*日").expect("static regex"))
}

/// Parses a locale-rendered date into ISO 8601.
///
/// Returns `None` when no grammar recognizes the input; the caller stores
/// the sentinel and logs.
pub fn parse_locale_date(locale: &Locale, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = iso_pattern().captures(trimmed) {
        return checked_iso(&caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = cjk_pattern().captures(trimmed) {
        return checked_iso(&caps[1], &caps[2], &caps[3]);
    }

    parse_month_name(locale.language(), trimmed)
}

fn checked_iso(year: &str, month: &str, day: &str) -> Option<String> {
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?;
    Some(format!("{year:04}-{month:02}-{day:02}"))
}

/// Month-name grammar: finds a year, a day, and a month name among the
/// tokens, ignoring connective words like Spanish "de".
fn parse_month_name(language: &str, raw: &str) -> Option<String> {
    let table = month_table(language)?;

    let normalized: String = raw
        .chars()
        .map(|c| if c == ',' || c == '.' { ' ' } else { c })
        .collect();

    let mut year: Option<i32> = None;
    let mut day: Option<u32> = None;
    let mut month: Option<u32> = None;

    for token in normalized.split_whitespace() {
        let lowered = token.to_lowercase();
        if lowered.chars().all(|c| c.is_ascii_digit()) {
            match lowered.len() {
                4 if year.is_none() => year = lowered.parse().ok(),
                1 | 2 if day.is_none() => day = lowered.parse().ok(),
                _ => {}
            }
        } else if month.is_none() {
            month = lookup_month(table, &lowered);
        }
    }

    let year = year?;
    let month = month?;
    let day = day?;
    NaiveDate::from_ymd_opt(year, month, day)?;
    Some(format!("{year:04}-{month:02}-{day:02}"))
}

/// Exact month-name match, or an abbreviation of at least three characters.
fn lookup_month(table: &[&str; 12], token: &str) -> Option<u32> {
    for (idx, name) in table.iter().enumerate() {
        if *name == token || (token.len() >= 3 && name.starts_with(token)) {
            return Some(idx as u32 + 1);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::new(tag).unwrap()
    }

    #[test]
    fn english_day_first() {
        assert_eq!(
            parse_locale_date(&locale("en-gb"), "22 January 2024").as_deref(),
            Some("2024-01-22")
        );
    }

    #[test]
    fn english_month_first_with_comma() {
        assert_eq!(
            parse_locale_date(&locale("en-us"), "January 22, 2024").as_deref(),
            Some("2024-01-22")
        );
    }

    #[test]
    fn english_abbreviated_month() {
        assert_eq!(
            parse_locale_date(&locale("en-us"), "Jan 22, 2024").as_deref(),
            Some("2024-01-22")
        );
    }

    #[test]
    fn spanish_with_connectives() {
        assert_eq!(
            parse_locale_date(&locale("es-cl"), "22 de enero de 2024").as_deref(),
            Some("2024-01-22")
        );
    }

    #[test]
    fn french() {
        assert_eq!(
            parse_locale_date(&locale("fr-fr"), "22 janvier 2024").as_deref(),
            Some("2024-01-22")
        );
        assert_eq!(
            parse_locale_date(&locale("fr-fr"), "1 août 2024").as_deref(),
            Some("2024-08-01")
        );
    }

    #[test]
    fn german_with_ordinal_dot() {
        assert_eq!(
            parse_locale_date(&locale("de-de"), "22. Januar 2024").as_deref(),
            Some("2024-01-22")
        );
    }

    #[test]
    fn japanese_and_chinese() {
        assert_eq!(
            parse_locale_date(&locale("ja-jp"), "2024年1月22日").as_deref(),
            Some("2024-01-22")
        );
        assert_eq!(
            parse_locale_date(&locale("zh-cn"), "2024年12月2日").as_deref(),
            Some("2024-12-02")
        );
    }

    #[test]
    fn iso_passthrough() {
        assert_eq!(
            parse_locale_date(&locale("en-us"), "2024-01-22").as_deref(),
            Some("2024-01-22")
        );
    }

    #[test]
    fn unknown_grammar_returns_none() {
        assert!(parse_locale_date(&locale("ru-ru"), "22 января 2024").is_none());
        assert!(parse_locale_date(&locale("en-us"), "sometime soon").is_none());
        assert!(parse_locale_date(&locale("en-us"), "").is_none());
    }

    #[test]
    fn impossible_date_rejected() {
        assert!(parse_locale_date(&locale("en-us"), "30 February 2024").is_none());
        assert!(parse_locale_date(&locale("en-us"), "2024-02-30").is_none());
    }
}
