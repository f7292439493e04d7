// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The command dispatcher.
//!
//! Pure with respect to the transport: every handler takes the shared state
//! and returns [`Reply`] values for the wiring layer to send. Unknown verbs
//! and tags fall through to the fuzzy matcher. All reads of monitor-owned
//! files are read-only.

use crazyones_core::{CrazyOnesError, Locale, SecurityUpdate};
use tracing::info;

use crate::format::{self, RECENT_LIMIT};
use crate::fuzzy;
use crate::state::BotState;
use crate::transport::Keyboard;

/// Argument tags are bounded before matching.
const MAX_TAG_CHARS: usize = 32;

/// Locale buttons per keyboard row.
const MENU_COLUMNS: usize = 2;

/// Telegram caps messages at 4096 chars; long listings are chunked below
/// this.
const CHUNK_LIMIT: usize = 3500;

/// One outgoing reply from a command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Result of a locale-selection callback: the menu message is edited in
/// place, then any follow-up replies are sent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallbackOutcome {
    pub edit: Option<String>,
    pub replies: Vec<Reply>,
}

/// Entry point for incoming text. Commands start with `/`; anything else in
/// a private chat receives the about message.
pub fn handle_text(
    state: &mut BotState,
    chat_id: i64,
    text: &str,
) -> Result<Vec<Reply>, CrazyOnesError> {
    let trimmed = text.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        let ui = state.ui_lang(chat_id);
        return Ok(vec![Reply::text(state.translations.get(&ui, "about"))]);
    };

    let mut parts = command.splitn(2, char::is_whitespace);
    // `/updates@SomeBot` arrives with the bot's username attached.
    let verb = parts
        .next()
        .unwrap_or_default()
        .split('@')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

    dispatch(state, chat_id, &verb, arg)
}

fn dispatch(
    state: &mut BotState,
    chat_id: i64,
    verb: &str,
    arg: Option<&str>,
) -> Result<Vec<Reply>, CrazyOnesError> {
    match verb {
        "start" => cmd_start(state, chat_id),
        "stop" => cmd_stop(state, chat_id),
        "updates" => cmd_updates(state, chat_id, arg),
        "language" => cmd_language(state, chat_id, arg),
        "about" => {
            let ui = state.ui_lang(chat_id);
            Ok(vec![Reply::text(state.translations.get(&ui, "about"))])
        }
        "help" => {
            let ui = state.ui_lang(chat_id);
            Ok(vec![Reply::text(state.translations.get(&ui, "help"))])
        }
        unknown => {
            let ui = state.ui_lang(chat_id);
            match fuzzy::suggest_verb(unknown) {
                Some(suggestion) => {
                    let prefix = state.translations.format(
                        &ui,
                        "did_you_mean",
                        &[&format!("/{suggestion}")],
                    );
                    let mut replies = vec![Reply::text(prefix)];
                    replies.extend(dispatch(state, chat_id, suggestion, arg)?);
                    Ok(replies)
                }
                None => Ok(vec![Reply::text(
                    state.translations.get(&ui, "unknown_command"),
                )]),
            }
        }
    }
}

/// `/start`: reactivate any existing subscription and present the
/// locale-selection menu. A brand-new chat's entry is created once its
/// first locale selection arrives.
fn cmd_start(state: &mut BotState, chat_id: i64) -> Result<Vec<Reply>, CrazyOnesError> {
    let ui = if state.subscribers.get(chat_id).is_some() {
        let (subscriber, _) = state
            .subscribers
            .upsert_active(chat_id, &BotState::default_locale())?;
        info!(chat_id, locale = %subscriber.locale, "subscription reactivated");
        subscriber.ui_lang
    } else {
        BotState::default_locale()
    };

    let catalog = state.catalog()?;
    if catalog.is_empty() {
        return Ok(vec![Reply::text(
            state.translations.get(&ui, "no_languages"),
        )]);
    }

    let mut rows = Vec::new();
    let mut row = Vec::new();
    for locale in catalog.keys() {
        row.push((state.display_name(locale), locale.as_str().to_string()));
        if row.len() == MENU_COLUMNS {
            rows.push(std::mem::take(&mut row));
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }

    Ok(vec![Reply::with_keyboard(
        state.translations.get(&ui, "welcome"),
        Keyboard { rows },
    )])
}

/// Locale selection from the inline keyboard.
pub fn handle_callback(
    state: &mut BotState,
    chat_id: i64,
    data: &str,
) -> Result<CallbackOutcome, CrazyOnesError> {
    let Ok(locale) = Locale::new(data) else {
        return Ok(CallbackOutcome::default());
    };

    let catalog = state.catalog()?;
    if !catalog.contains_key(&locale) {
        let ui = state.ui_lang(chat_id);
        return Ok(CallbackOutcome {
            edit: Some(state.translations.format(
                &ui,
                "language_not_available",
                &[locale.as_str()],
            )),
            replies: Vec::new(),
        });
    }

    let (_, first_time) = state
        .subscribers
        .upsert_active(chat_id, &BotState::default_locale())?;
    state.subscribers.set_locale(chat_id, &locale)?;
    info!(chat_id, locale = %locale, first_time, "locale selected");

    let display = state.display_name(&locale);
    let edit = state
        .translations
        .format(&locale, "language_selected", &[&display]);
    // Only a first-time subscriber gets the recent-updates listing;
    // returning users switching locale just get the confirmation.
    let replies = if first_time {
        recent_listing(state, &locale, &locale)?
    } else {
        Vec::new()
    };

    Ok(CallbackOutcome {
        edit: Some(edit),
        replies,
    })
}

/// `/stop`: deactivate, keeping the locale preference.
fn cmd_stop(state: &mut BotState, chat_id: i64) -> Result<Vec<Reply>, CrazyOnesError> {
    let ui = state.ui_lang(chat_id);
    if state.subscribers.get(chat_id).is_none() {
        return Ok(vec![Reply::text(
            state.translations.get(&ui, "not_subscribed"),
        )]);
    }

    state.subscribers.deactivate(chat_id)?;
    info!(chat_id, "subscription deactivated");
    Ok(vec![Reply::text(
        state.translations.get(&ui, "stop_confirmation"),
    )])
}

/// `/updates [tag]`: the 10 most recent entries of the chat's locale store,
/// optionally filtered to a word-bounded OS token.
fn cmd_updates(
    state: &mut BotState,
    chat_id: i64,
    arg: Option<&str>,
) -> Result<Vec<Reply>, CrazyOnesError> {
    let ui = state.ui_lang(chat_id);
    let locale = state.chat_locale(chat_id);
    let store = state.store_for(&locale)?;

    if store.is_empty() {
        return Ok(vec![Reply::text(state.translations.get(&ui, "no_updates"))]);
    }

    let Some(tag_raw) = arg else {
        return recent_listing(state, &ui, &locale);
    };

    let tag: String = tag_raw.to_lowercase().chars().take(MAX_TAG_CHARS).collect();
    let matches: Vec<SecurityUpdate> = store
        .iter()
        .filter(|u| fuzzy::word_bounded_contains(&u.name, &tag))
        .cloned()
        .collect();

    if !matches.is_empty() {
        return Ok(vec![listing_reply(state, &ui, &matches)]);
    }

    let candidates = fuzzy::candidate_os_tokens(&store);
    match fuzzy::suggest_tag(&tag, &candidates) {
        Some(suggestion) => {
            let prefix = state.translations.format(
                &ui,
                "did_you_mean",
                &[&format!("/updates {suggestion}")],
            );
            let suggested: Vec<SecurityUpdate> = store
                .iter()
                .filter(|u| fuzzy::word_bounded_contains(&u.name, suggestion))
                .cloned()
                .collect();
            Ok(vec![
                Reply::text(prefix),
                listing_reply(state, &ui, &suggested),
            ])
        }
        None => Ok(vec![Reply::text(
            state.translations.format(&ui, "unknown_tag", &[&tag]),
        )]),
    }
}

/// `/language [code]`: list every known locale, or show another locale's
/// recent updates (updating the stored preference for subscribers).
fn cmd_language(
    state: &mut BotState,
    chat_id: i64,
    arg: Option<&str>,
) -> Result<Vec<Reply>, CrazyOnesError> {
    let ui = state.ui_lang(chat_id);
    let catalog = state.catalog()?;
    if catalog.is_empty() {
        return Ok(vec![Reply::text(
            state.translations.get(&ui, "no_languages"),
        )]);
    }

    let Some(code_raw) = arg else {
        return Ok(language_listing(state, &ui, &catalog));
    };

    let code = code_raw.to_lowercase();
    let known = catalog
        .keys()
        .find(|locale| locale.as_str() == code)
        .cloned();

    match known {
        Some(locale) => {
            let mut replies = Vec::new();
            if state.subscribers.get(chat_id).is_some() {
                state.subscribers.set_locale(chat_id, &locale)?;
                let display = state.display_name(&locale);
                replies.push(Reply::text(state.translations.format(
                    &locale,
                    "language_updated",
                    &[&display],
                )));
                replies.extend(recent_listing(state, &locale, &locale)?);
            } else {
                replies.extend(recent_listing(state, &ui, &locale)?);
            }
            Ok(replies)
        }
        None => {
            let codes: Vec<&str> = catalog.keys().map(Locale::as_str).collect();
            match fuzzy::suggest_locale(&code, &codes) {
                Some(suggestion) => {
                    let suggestion = suggestion.to_string();
                    let prefix = state.translations.format(
                        &ui,
                        "did_you_mean",
                        &[&format!("/language {suggestion}")],
                    );
                    let mut replies = vec![Reply::text(prefix)];
                    replies.extend(cmd_language(state, chat_id, Some(suggestion.as_str()))?);
                    Ok(replies)
                }
                None => Ok(vec![Reply::text(state.translations.format(
                    &ui,
                    "language_not_available",
                    &[&code],
                ))]),
            }
        }
    }
}

/// A membership-loss event from the transport deactivates the subscription.
pub fn handle_membership_loss(
    state: &mut BotState,
    chat_id: i64,
) -> Result<(), CrazyOnesError> {
    if state.subscribers.deactivate(chat_id)? {
        info!(chat_id, "bot removed from chat, subscription deactivated");
    }
    Ok(())
}

/// Header plus the most recent entries of a locale store, or the localized
/// "no data yet" message.
fn recent_listing(
    state: &BotState,
    ui: &Locale,
    locale: &Locale,
) -> Result<Vec<Reply>, CrazyOnesError> {
    let store = state.store_for(locale)?;
    if store.is_empty() {
        return Ok(vec![Reply::text(state.translations.get(ui, "no_updates"))]);
    }
    Ok(vec![listing_reply(state, ui, &store)])
}

fn listing_reply(state: &BotState, ui: &Locale, updates: &[SecurityUpdate]) -> Reply {
    let recent = &updates[..updates.len().min(RECENT_LIMIT)];
    let header = state
        .translations
        .format(ui, "recent_updates_header", &[&recent.len().to_string()]);
    Reply::text(format!("{header}\n{}", format::listing(recent)))
}

/// The `/language` listing, chunked under Telegram's message-length cap.
fn language_listing(
    state: &BotState,
    ui: &Locale,
    catalog: &crazyones_core::LocaleCatalog,
) -> Vec<Reply> {
    let mut entries: Vec<(String, String)> = catalog
        .keys()
        .map(|locale| (state.display_name(locale), locale.as_str().to_string()))
        .collect();
    entries.sort();

    let header = state.translations.get(ui, "available_languages_header");
    let footer = state.translations.format(
        ui,
        "available_languages_footer",
        &[&catalog.len().to_string()],
    );

    let mut replies = Vec::new();
    let mut chunk = header.clone();
    for (name, code) in entries {
        let line = format!("• `{code}` - {name}\n");
        if chunk.len() + line.len() > CHUNK_LIMIT {
            replies.push(Reply::text(std::mem::take(&mut chunk)));
        }
        chunk.push_str(&line);
    }
    chunk.push_str(&footer);
    replies.push(Reply::text(chunk));
    replies
}

#[cfg(test)]
mod tests {
    use crazyones_core::fsio;
    use crazyones_core::{DataDir, LocaleCatalog};

    use crate::i18n::Translations;

    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::new(tag).unwrap()
    }

    fn state_with_catalog(locales: &[&str]) -> (tempfile::TempDir, BotState) {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        data.ensure().unwrap();

        let mut catalog = LocaleCatalog::new();
        let mut names = crazyones_core::LocaleNames::new();
        for tag in locales {
            catalog.insert(
                locale(tag),
                format!("https://support.apple.com/{tag}/100100"),
            );
            let name = match *tag {
                "en-us" => "English/USA",
                "es-es" => "Spanish/Spain",
                "es-cl" => "Spanish/Chile",
                "fr-fr" => "French/France",
                "ja-jp" => "Japanese/Japan",
                _ => "Test/Locale",
            };
            names.insert(locale(tag), name.to_string());
        }
        fsio::write_json_atomic(&data.locale_catalog(), &catalog).unwrap();
        fsio::write_json_atomic(&data.locale_names(), &names).unwrap();

        let state = BotState::load(data, Translations::builtin()).unwrap();
        (dir, state)
    }

    fn seed_store(state: &BotState, tag: &str, names: &[&str]) {
        let store: Vec<SecurityUpdate> = names
            .iter()
            .enumerate()
            .map(|(idx, name)| SecurityUpdate {
                id: (names.len() - idx) as u64,
                name: (*name).to_string(),
                url: None,
                target: "iPhone XS and later".into(),
                date: "2024-01-22".into(),
            })
            .collect();
        fsio::write_json_atomic(&state.data.locale_store(&locale(tag)), &store).unwrap();
    }

    #[test]
    fn start_offers_menu_without_creating_subscription() {
        let (_dir, mut state) = state_with_catalog(&["en-us", "es-es"]);
        let replies = handle_text(&mut state, 42, "/start").unwrap();

        // The subscription is completed by the locale selection.
        assert!(state.subscribers.get(42).is_none());
        assert_eq!(replies.len(), 1);
        let keyboard = replies[0].keyboard.as_ref().unwrap();
        let buttons: usize = keyboard.rows.iter().map(Vec::len).sum();
        assert_eq!(buttons, 2);
    }

    #[test]
    fn start_reactivates_a_stopped_subscription() {
        let (_dir, mut state) = state_with_catalog(&["en-us", "es-cl"]);
        handle_text(&mut state, 42, "/start").unwrap();
        handle_callback(&mut state, 42, "es-cl").unwrap();
        handle_text(&mut state, 42, "/stop").unwrap();
        assert!(!state.subscribers.is_active(42));

        handle_text(&mut state, 42, "/start").unwrap();
        let sub = state.subscribers.get(42).unwrap();
        assert!(sub.active);
        assert_eq!(sub.locale, locale("es-cl"));
    }

    #[test]
    fn first_selection_subscribes_and_lists_updates() {
        let (_dir, mut state) = state_with_catalog(&["en-us", "es-cl"]);
        handle_text(&mut state, 42, "/start").unwrap();
        seed_store(&state, "es-cl", &["iOS 17.3", "macOS 14.3"]);

        let outcome = handle_callback(&mut state, 42, "es-cl").unwrap();
        assert!(outcome.edit.unwrap().contains("Spanish/Chile"));
        assert_eq!(outcome.replies.len(), 1);
        assert!(outcome.replies[0].text.contains("iOS 17.3"));
        let sub = state.subscribers.get(42).unwrap();
        assert!(sub.active);
        assert_eq!(sub.locale, locale("es-cl"));
    }

    #[test]
    fn switching_locale_again_skips_the_listing() {
        let (_dir, mut state) = state_with_catalog(&["en-us", "es-cl"]);
        handle_text(&mut state, 42, "/start").unwrap();
        seed_store(&state, "en-us", &["iOS 17.3"]);
        seed_store(&state, "es-cl", &["iOS 17.3"]);
        handle_callback(&mut state, 42, "en-us").unwrap();

        let outcome = handle_callback(&mut state, 42, "es-cl").unwrap();
        assert!(outcome.edit.unwrap().contains("Spanish/Chile"));
        assert!(
            outcome.replies.is_empty(),
            "returning users only get the confirmation"
        );
        assert_eq!(state.subscribers.get(42).unwrap().locale, locale("es-cl"));
    }

    #[test]
    fn stop_when_never_subscribed() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        let replies = handle_text(&mut state, 42, "/stop").unwrap();
        assert!(replies[0].text.contains("/start"));
        assert!(!state.subscribers.is_active(42));
    }

    #[test]
    fn stop_deactivates() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        handle_text(&mut state, 42, "/start").unwrap();
        handle_callback(&mut state, 42, "en-us").unwrap();
        assert!(state.subscribers.is_active(42));

        let replies = handle_text(&mut state, 42, "/stop").unwrap();
        assert!(!state.subscribers.is_active(42));
        assert_eq!(replies.len(), 1);
    }

    #[test]
    fn updates_without_store_says_no_data_yet() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        handle_text(&mut state, 42, "/start").unwrap();
        let replies = handle_text(&mut state, 42, "/updates").unwrap();
        assert_eq!(replies.len(), 1);
        let expected = state.translations.get(&locale("en-us"), "no_updates");
        assert_eq!(replies[0].text, expected);
    }

    #[test]
    fn updates_lists_at_most_ten() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        handle_text(&mut state, 42, "/start").unwrap();
        let names: Vec<String> = (0..12).map(|i| format!("iOS 17.{i}")).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        seed_store(&state, "en-us", &name_refs);

        let replies = handle_text(&mut state, 42, "/updates").unwrap();
        assert_eq!(replies.len(), 1);
        assert!(replies[0].text.contains("10"));
        assert!(replies[0].text.contains("\n10. "));
        assert!(!replies[0].text.contains("\n11. "));
    }

    #[test]
    fn updates_filters_word_bounded_tag() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        handle_text(&mut state, 42, "/start").unwrap();
        seed_store(
            &state,
            "en-us",
            &["iOS 17.3", "macOS Sonoma 14.3", "visionOS 1.1"],
        );

        let replies = handle_text(&mut state, 42, "/updates ios").unwrap();
        assert_eq!(replies.len(), 1);
        assert!(replies[0].text.contains("iOS 17.3"));
        assert!(!replies[0].text.contains("macOS"));
        assert!(!replies[0].text.contains("visionOS"));
    }

    #[test]
    fn misspelled_tag_gets_suggestion() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        handle_text(&mut state, 42, "/start").unwrap();
        seed_store(&state, "en-us", &["iOS 17.3", "macOS Sonoma 14.3"]);

        let replies = handle_text(&mut state, 42, "/updates macso").unwrap();
        assert_eq!(replies.len(), 2);
        assert!(replies[0].text.contains("/updates macos"));
        assert!(replies[1].text.contains("macOS Sonoma"));
    }

    #[test]
    fn hopeless_tag_gets_helpful_error() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        handle_text(&mut state, 42, "/start").unwrap();
        seed_store(&state, "en-us", &["iOS 17.3"]);

        let replies = handle_text(&mut state, 42, "/updates zzzzzzzz").unwrap();
        assert_eq!(replies.len(), 1);
        assert!(replies[0].text.contains("zzzzzzzz"));
    }

    #[test]
    fn misspelled_verb_executes_suggestion() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        handle_text(&mut state, 42, "/start").unwrap();
        seed_store(&state, "en-us", &["iOS 17.3"]);

        let replies = handle_text(&mut state, 42, "/updat").unwrap();
        assert!(replies[0].text.contains("/updates"));
        assert!(replies[1].text.contains("iOS 17.3"));
    }

    #[test]
    fn unknown_verb_without_suggestion() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        let replies = handle_text(&mut state, 42, "/frobnicate").unwrap();
        let expected = state
            .translations
            .get(&locale("en-us"), "unknown_command");
        assert_eq!(replies[0].text, expected);
    }

    #[test]
    fn language_without_arg_lists_locales() {
        let (_dir, mut state) = state_with_catalog(&["en-us", "es-es", "fr-fr"]);
        let replies = handle_text(&mut state, 42, "/language").unwrap();
        assert_eq!(replies.len(), 1);
        assert!(replies[0].text.contains("`en-us`"));
        assert!(replies[0].text.contains("`fr-fr`"));
        assert!(replies[0].text.contains('3'));
    }

    #[test]
    fn language_with_code_shows_other_locale_without_changing_subscription() {
        let (_dir, mut state) = state_with_catalog(&["en-us", "ja-jp"]);
        seed_store(&state, "ja-jp", &["iOS 17.3"]);

        // Not subscribed: listing only, no preference saved.
        let replies = handle_text(&mut state, 42, "/language ja-jp").unwrap();
        assert!(replies.iter().any(|r| r.text.contains("iOS 17.3")));
        assert!(state.subscribers.get(42).is_none());
    }

    #[test]
    fn language_with_code_updates_subscriber_preference() {
        let (_dir, mut state) = state_with_catalog(&["en-us", "ja-jp"]);
        handle_text(&mut state, 42, "/start").unwrap();
        handle_callback(&mut state, 42, "en-us").unwrap();
        seed_store(&state, "ja-jp", &["iOS 17.3"]);

        handle_text(&mut state, 42, "/language ja-jp").unwrap();
        assert_eq!(state.subscribers.get(42).unwrap().locale, locale("ja-jp"));
    }

    #[test]
    fn language_typo_falls_through_to_fuzzy() {
        let (_dir, mut state) = state_with_catalog(&["en-us", "es-es"]);
        seed_store(&state, "es-es", &["iOS 17.3"]);

        let replies = handle_text(&mut state, 42, "/language es-ess").unwrap();
        assert!(replies[0].text.contains("/language es-es"));
        assert!(replies.iter().any(|r| r.text.contains("iOS 17.3")));
    }

    #[test]
    fn non_command_text_gets_about() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        let replies = handle_text(&mut state, 42, "hello there").unwrap();
        let expected = state.translations.get(&locale("en-us"), "about");
        assert_eq!(replies[0].text, expected);
    }

    #[test]
    fn command_with_bot_suffix_is_recognized() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        let replies = handle_text(&mut state, 42, "/help@CrazyOnesBot").unwrap();
        let expected = state.translations.get(&locale("en-us"), "help");
        assert_eq!(replies[0].text, expected);
    }

    #[test]
    fn membership_loss_deactivates() {
        let (_dir, mut state) = state_with_catalog(&["en-us"]);
        handle_text(&mut state, 42, "/start").unwrap();
        handle_callback(&mut state, 42, "en-us").unwrap();
        assert!(state.subscribers.is_active(42));

        handle_membership_loss(&mut state, 42).unwrap();
        assert!(!state.subscribers.is_active(42));
    }

    #[test]
    fn ui_follows_selected_locale() {
        let (_dir, mut state) = state_with_catalog(&["en-us", "es-es"]);
        handle_text(&mut state, 42, "/start").unwrap();
        handle_callback(&mut state, 42, "es-es").unwrap();

        let replies = handle_text(&mut state, 42, "/stop").unwrap();
        assert!(replies[0].text.contains("Suscripción"));
    }
}
