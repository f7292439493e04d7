// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Security-updates table extraction.
//!
//! Every locale page carries one table listing release name, affected
//! targets, and release date. The heading above it is localized, so the
//! table is located structurally: a three-column header row, confirmed by a
//! release-note link in the first column of typical data rows.

use crazyones_core::{CrazyOnesError, Locale, SENTINEL_DATE};
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::dates;

/// One data row extracted from a locale's releases table, before id
/// assignment. `date` is already ISO 8601 or the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUpdate {
    pub name: String,
    pub url: Option<String>,
    pub target: String,
    pub date: String,
}

struct Selectors {
    table: Selector,
    tr: Selector,
    th: Selector,
    td: Selector,
    anchor: Selector,
}

impl Selectors {
    fn new() -> Self {
        Self {
            table: Selector::parse("table").expect("static selector"),
            tr: Selector::parse("tr").expect("static selector"),
            th: Selector::parse("th").expect("static selector"),
            td: Selector::parse("td").expect("static selector"),
            anchor: Selector::parse("a[href]").expect("static selector"),
        }
    }
}

/// Parses the releases table out of a locale page.
///
/// Returns the rows in source order (newest first, as Apple publishes).
/// A page without a recognizable table is a parse error; the caller leaves
/// the locale untouched and does not update its fingerprint.
pub fn extract_security_updates(
    html: &str,
    base_url: &str,
    locale: &Locale,
) -> Result<Vec<ParsedUpdate>, CrazyOnesError> {
    let base = Url::parse(base_url).map_err(|e| CrazyOnesError::Parse {
        url: base_url.to_string(),
        message: format!("invalid base URL: {e}"),
    })?;

    let selectors = Selectors::new();
    let document = Html::parse_document(html);

    let table = locate_table(&document, &selectors).ok_or_else(|| CrazyOnesError::Parse {
        url: base_url.to_string(),
        message: "security updates table not found".to_string(),
    })?;

    let mut records = Vec::new();
    for row in table.select(&selectors.tr) {
        // Header rows carry th cells.
        if row.select(&selectors.th).next().is_some() {
            continue;
        }

        let cells: Vec<ElementRef<'_>> = row.select(&selectors.td).collect();
        if cells.len() < 3 {
            continue;
        }

        let name = cell_text(&cells[0]);
        if name.is_empty() {
            continue;
        }

        let url = cells[0]
            .select(&selectors.anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| base.join(href).ok())
            .map(|u| u.to_string());

        let target = cell_text(&cells[1]);
        let raw_date = cell_text(&cells[2]);
        let date = match dates::parse_locale_date(locale, &raw_date) {
            Some(iso) => iso,
            None => {
                warn!(locale = %locale, raw = raw_date.as_str(), "unparseable release date");
                SENTINEL_DATE.to_string()
            }
        };

        records.push(ParsedUpdate {
            name,
            url,
            target,
            date,
        });
    }

    Ok(records)
}

/// Finds the releases table: three header columns, preferring a table whose
/// early data rows link out of the first cell.
fn locate_table<'a>(document: &'a Html, selectors: &Selectors) -> Option<ElementRef<'a>> {
    let mut fallback: Option<ElementRef<'a>> = None;

    for table in document.select(&selectors.table) {
        let header_cols = table
            .select(&selectors.tr)
            .find_map(|row| {
                let count = row.select(&selectors.th).count();
                (count > 0).then_some(count)
            })
            .unwrap_or(0);
        if header_cols != 3 {
            continue;
        }

        let anchor_confirmed = table
            .select(&selectors.tr)
            .filter(|row| row.select(&selectors.th).next().is_none())
            .take(5)
            .any(|row| {
                row.select(&selectors.td)
                    .next()
                    .is_some_and(|cell| cell.select(&selectors.anchor).next().is_some())
            });

        if anchor_confirmed {
            return Some(table);
        }
        fallback.get_or_insert(table);
    }

    fallback
}

/// Inner text of a cell with whitespace collapsed.
fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
