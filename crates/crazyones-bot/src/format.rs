// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message formatting for update listings and notifications.
//!
//! Listings render one line per update, `date - name - target`, linking the
//! name when a release note exists. Notifications get a fuller block per
//! update.

use crazyones_core::SecurityUpdate;

/// How many entries `/updates`, `/language <code>`, and the post-subscribe
/// listing show.
pub const RECENT_LIMIT: usize = 10;

/// One numbered listing line: `1. 2024-01-22 - [iOS 17.3](url) - iPhone`.
pub fn listing_line(update: &SecurityUpdate, number: usize) -> String {
    match &update.url {
        Some(url) => format!(
            "{number}. {} - [{}]({url}) - {}",
            update.date, update.name, update.target
        ),
        None => format!(
            "{number}. {} - {} - {}",
            update.date, update.name, update.target
        ),
    }
}

/// A listing of the given updates, one numbered line each.
pub fn listing(updates: &[SecurityUpdate]) -> String {
    updates
        .iter()
        .enumerate()
        .map(|(idx, update)| listing_line(update, idx + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One notification block for the fan-out loop.
pub fn notification_block(update: &SecurityUpdate) -> String {
    let mut block = format!("*{}*\n📱 {}\n📅 {}", update.name, update.target, update.date);
    if let Some(url) = &update.url {
        block.push_str(&format!("\n🔗 [More info]({url})"));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(name: &str, url: Option<&str>) -> SecurityUpdate {
        SecurityUpdate {
            id: 1,
            name: name.into(),
            url: url.map(String::from),
            target: "iPhone XS and later".into(),
            date: "2024-01-22".into(),
        }
    }

    #[test]
    fn linked_listing_line() {
        let line = listing_line(&update("iOS 17.3", Some("https://a/kb/1")), 1);
        assert_eq!(line, "1. 2024-01-22 - [iOS 17.3](https://a/kb/1) - iPhone XS and later");
    }

    #[test]
    fn plain_listing_line() {
        let line = listing_line(&update("tvOS 17.3", None), 3);
        assert_eq!(line, "3. 2024-01-22 - tvOS 17.3 - iPhone XS and later");
    }

    #[test]
    fn listing_numbers_sequentially() {
        let rendered = listing(&[update("a", None), update("b", None)]);
        assert!(rendered.starts_with("1. "));
        assert!(rendered.contains("\n2. "));
    }

    #[test]
    fn notification_block_includes_link_when_present() {
        let with = notification_block(&update("iOS 17.3", Some("https://a/kb/1")));
        assert!(with.contains("[More info](https://a/kb/1)"));

        let without = notification_block(&update("tvOS 17.3", None));
        assert!(!without.contains("More info"));
    }
}
