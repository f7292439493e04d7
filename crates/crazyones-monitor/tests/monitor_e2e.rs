// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end monitor scenarios against fixture HTML.

use crazyones_core::fsio;
use crazyones_core::{DataDir, Locale, LocaleCatalog, LocaleNames, SecurityUpdate, TriggerDoc};
use crazyones_monitor::run_tick;
use crazyones_test_utils::{index_page, security_page, FixtureRow, MockFetcher};

const INDEX_URL: &str = "https://support.apple.com/100100";
const EN_URL: &str = "https://support.apple.com/en-us/100100";
const ES_URL: &str = "https://support.apple.com/es-es/100100";
const FR_URL: &str = "https://support.apple.com/fr-fr/100100";

fn locale(tag: &str) -> Locale {
    Locale::new(tag).unwrap()
}

fn en_rows() -> Vec<FixtureRow<'static>> {
    vec![
        ("iOS 17.3 and iPadOS 17.3", Some("/kb/HT214056"), "iPhone XS and later", "22 January 2024"),
        ("macOS Sonoma 14.3", Some("/kb/HT214055"), "macOS Sonoma", "22 January 2024"),
        ("watchOS 10.3", Some("/kb/HT214057"), "Apple Watch Series 4 and later", "22 January 2024"),
        ("tvOS 17.3", None, "Apple TV HD and Apple TV 4K", "22 January 2024"),
        ("Safari 17.3", Some("/kb/HT214058"), "macOS Monterey and macOS Ventura", "22 January 2024"),
    ]
}

fn es_rows() -> Vec<FixtureRow<'static>> {
    vec![
        ("iOS 17.3 y iPadOS 17.3", Some("/kb/HT214056"), "iPhone XS y posteriores", "22 de enero de 2024"),
        ("macOS Sonoma 14.3", Some("/kb/HT214055"), "macOS Sonoma", "22 de enero de 2024"),
        ("watchOS 10.3", Some("/kb/HT214057"), "Apple Watch Series 4 y posteriores", "22 de enero de 2024"),
        ("tvOS 17.3", None, "Apple TV HD y Apple TV 4K", "22 de enero de 2024"),
        ("Safari 17.3", Some("/kb/HT214058"), "macOS Monterey y macOS Ventura", "22 de enero de 2024"),
    ]
}

fn fr_rows() -> Vec<FixtureRow<'static>> {
    vec![
        ("iOS 17.3 et iPadOS 17.3", Some("/kb/HT214056"), "iPhone XS et modèles ultérieurs", "22 janvier 2024"),
        ("macOS Sonoma 14.3", Some("/kb/HT214055"), "macOS Sonoma", "22 janvier 2024"),
        ("watchOS 10.3", Some("/kb/HT214057"), "Apple Watch Series 4 et modèles ultérieurs", "22 janvier 2024"),
        ("tvOS 17.3", None, "Apple TV HD et Apple TV 4K", "22 janvier 2024"),
        ("Safari 17.3", Some("/kb/HT214058"), "macOS Monterey et macOS Ventura", "22 janvier 2024"),
    ]
}

/// Fixture fleet: the index declares three locales, each serving five rows.
fn three_locale_fetcher() -> MockFetcher {
    let fetcher = MockFetcher::new();
    fetcher.set_page(
        INDEX_URL,
        index_page(&[
            ("en-us", EN_URL),
            ("es-es", ES_URL),
            ("fr-fr", FR_URL),
        ]),
    );
    fetcher.set_page(EN_URL, security_page(&en_rows()));
    fetcher.set_page(ES_URL, security_page(&es_rows()));
    fetcher.set_page(FR_URL, security_page(&fr_rows()));
    fetcher
}

fn store_of(data: &DataDir, tag: &str) -> Vec<SecurityUpdate> {
    fsio::read_json(&data.locale_store(&locale(tag)))
        .unwrap()
        .unwrap_or_default()
}

#[tokio::test]
async fn bootstrap_three_locales_five_records_each() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path().join("data"));
    let fetcher = three_locale_fetcher();

    let outcome = run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();
    assert_eq!(outcome.locales_total, 3);
    assert_eq!(outcome.locales_changed, 3);
    assert_eq!(outcome.new_ids, 15);
    assert!(outcome.trigger_written);

    let catalog: LocaleCatalog = fsio::read_json(&data.locale_catalog()).unwrap().unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog[&locale("en-us")], EN_URL);

    for tag in ["en-us", "es-es", "fr-fr"] {
        let store = store_of(&data, tag);
        let ids: Vec<u64> = store.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5], "ids for {tag}");
    }

    // Localized dates all normalized to ISO.
    assert!(store_of(&data, "es-es")
        .iter()
        .all(|u| u.date == "2024-01-22"));

    // Release-note links resolved against the locale page.
    let en = store_of(&data, "en-us");
    assert_eq!(
        en[0].url.as_deref(),
        Some("https://support.apple.com/kb/HT214056")
    );

    let trigger: TriggerDoc = fsio::read_json(&data.trigger()).unwrap().unwrap();
    assert_eq!(trigger.len(), 3);
    for tag in ["en-us", "es-es", "fr-fr"] {
        assert_eq!(trigger[&locale(tag)], vec![1, 2, 3, 4, 5]);
    }

    let names: LocaleNames = fsio::read_json(&data.locale_names()).unwrap().unwrap();
    assert_eq!(names[&locale("en-us")], "English/USA");
}

#[tokio::test]
async fn incremental_prepended_record_gets_id_six() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path().join("data"));
    let fetcher = three_locale_fetcher();

    run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();
    std::fs::remove_file(data.trigger()).unwrap();

    // en-us now has one release prepended.
    let mut rows = en_rows();
    rows.insert(
        0,
        ("iOS 17.3.1", Some("/kb/HT214063"), "iPhone XS and later", "8 February 2024"),
    );
    fetcher.set_page(EN_URL, security_page(&rows));

    let outcome = run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();
    assert_eq!(outcome.locales_changed, 1);
    assert_eq!(outcome.locales_unchanged, 2);
    assert_eq!(outcome.new_ids, 1);

    let store = store_of(&data, "en-us");
    assert_eq!(store.len(), 6);
    assert_eq!(store[0].id, 6, "new record allocated max+1, placed first");
    assert_eq!(store[0].name, "iOS 17.3.1");
    assert_eq!(store[0].date, "2024-02-08");
    let ids: std::collections::BTreeSet<u64> = store.iter().map(|u| u.id).collect();
    assert_eq!(ids.len(), 6, "ids stay unique");

    let trigger: TriggerDoc = fsio::read_json(&data.trigger()).unwrap().unwrap();
    assert_eq!(trigger.len(), 1, "only en-us announced");
    assert_eq!(trigger[&locale("en-us")], vec![6]);
}

#[tokio::test]
async fn identical_tick_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path().join("data"));
    let fetcher = three_locale_fetcher();

    run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();
    std::fs::remove_file(data.trigger()).unwrap();

    let mtime_before = std::fs::metadata(data.locale_store(&locale("en-us")))
        .unwrap()
        .modified()
        .unwrap();
    let fingerprints_before = std::fs::read_to_string(data.fingerprints()).unwrap();

    let outcome = run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();
    assert_eq!(outcome.locales_unchanged, 3);
    assert_eq!(outcome.new_ids, 0);
    assert!(!outcome.trigger_written);
    assert!(!data.trigger().exists(), "no trigger on an empty novelty set");

    let mtime_after = std::fs::metadata(data.locale_store(&locale("en-us")))
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(mtime_before, mtime_after, "unchanged store not rewritten");
    assert_eq!(
        fingerprints_before,
        std::fs::read_to_string(data.fingerprints()).unwrap()
    );
}

#[tokio::test]
async fn removed_locale_keeps_store_and_leaves_triggers_silent() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path().join("data"));
    let fetcher = three_locale_fetcher();

    run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();
    std::fs::remove_file(data.trigger()).unwrap();

    // Apple stops publishing fr-fr.
    fetcher.set_page(
        INDEX_URL,
        index_page(&[("en-us", EN_URL), ("es-es", ES_URL)]),
    );

    let outcome = run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();
    assert_eq!(outcome.locales_total, 2);

    let catalog: LocaleCatalog = fsio::read_json(&data.locale_catalog()).unwrap().unwrap();
    assert!(!catalog.contains_key(&locale("fr-fr")));

    // The store file is retained read-only.
    assert!(data.locale_store(&locale("fr-fr")).exists());
    assert!(!data.trigger().exists());
    // And the dropped locale is not fetched again.
    assert_eq!(fetcher.fetch_count(FR_URL), 1);
}

#[tokio::test]
async fn parse_failure_leaves_fingerprint_stale_for_retry() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path().join("data"));
    let fetcher = three_locale_fetcher();
    fetcher.set_page(ES_URL, "<html><body><p>temporarily down</p></body></html>");

    let outcome = run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();
    assert_eq!(outcome.parse_failures, 1);
    assert_eq!(outcome.locales_changed, 2);

    // No fingerprint recorded for the failed page, so the next tick parses
    // it again.
    let fingerprints: crazyones_core::FingerprintLedger =
        fsio::read_json(&data.fingerprints()).unwrap().unwrap();
    assert!(!fingerprints.contains_key(ES_URL));
    assert!(fingerprints.contains_key(EN_URL));
    assert!(!data.locale_store(&locale("es-es")).exists());

    // The page recovers.
    fetcher.set_page(ES_URL, security_page(&es_rows()));
    let outcome = run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();
    assert_eq!(outcome.parse_failures, 0);
    assert_eq!(store_of(&data, "es-es").len(), 5);
}

#[tokio::test]
async fn network_failure_on_one_locale_spares_the_others() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path().join("data"));
    let fetcher = three_locale_fetcher();
    fetcher.set_failure(FR_URL);

    let outcome = run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();
    assert_eq!(outcome.network_failures, 1);
    assert_eq!(outcome.locales_changed, 2);
    assert_eq!(store_of(&data, "en-us").len(), 5);
    // Each URL is attempted exactly once per tick.
    assert_eq!(fetcher.fetch_count(FR_URL), 1);
}

#[tokio::test]
async fn record_disappearing_and_reappearing_keeps_its_id() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path().join("data"));
    let fetcher = three_locale_fetcher();
    run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();

    // Safari 17.3 (id 5) drops off the en-us table.
    let truncated: Vec<FixtureRow<'_>> = en_rows().into_iter().take(4).collect();
    fetcher.set_page(EN_URL, security_page(&truncated));
    run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();

    let store = store_of(&data, "en-us");
    assert_eq!(store.len(), 5, "absent record retained");
    assert_eq!(store.last().unwrap().name, "Safari 17.3");

    // It reappears; same id, no trigger.
    std::fs::remove_file(data.trigger()).ok();
    fetcher.set_page(EN_URL, security_page(&en_rows()));
    let outcome = run_tick(&fetcher, &data, INDEX_URL, 4).await.unwrap();
    assert_eq!(outcome.new_ids, 0);

    let store = store_of(&data, "en-us");
    let safari = store.iter().find(|u| u.name == "Safari 17.3").unwrap();
    assert_eq!(safari.id, 5);
}
