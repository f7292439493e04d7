// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML fixture builders shaped like Apple's pages.

/// One table row for [`security_page`]: `(name, release-note href, target,
/// rendered date)`.
pub type FixtureRow<'a> = (&'a str, Option<&'a str>, &'a str, &'a str);

/// A locale index page declaring `<link rel="alternate" hreflang>` entries.
pub fn index_page(locales: &[(&str, &str)]) -> String {
    let links: String = locales
        .iter()
        .map(|(hreflang, href)| {
            format!(r#"<link rel="alternate" hreflang="{hreflang}" href="{href}" />"#)
        })
        .collect();
    format!(
        "<!DOCTYPE html><html><head><title>Apple security releases</title>{links}</head>\
         <body><main><h1>Apple security releases</h1></main></body></html>"
    )
}

/// A locale page with the three-column security-updates table.
pub fn security_page(rows: &[FixtureRow<'_>]) -> String {
    let body: String = rows
        .iter()
        .map(|(name, href, target, date)| {
            let name_cell = match href {
                Some(href) => format!(r#"<a href="{href}">{name}</a>"#),
                None => (*name).to_string(),
            };
            format!("<tr><td>{name_cell}</td><td>{target}</td><td>{date}</td></tr>")
        })
        .collect();
    format!(
        "<!DOCTYPE html><html><head><title>Apple security releases</title></head><body>\
         <h2 class=\"gb-header\">Apple security updates</h2>\
         <table><tr><th>Name and information link</th><th>Available for</th>\
         <th>Release date</th></tr>{body}</table></body></html>"
    )
}
