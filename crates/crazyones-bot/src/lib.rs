// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The CrazyOnes notification service.
//!
//! A long-lived Telegram bot with two cooperating tasks: a command
//! dispatcher (`/start`, `/stop`, `/updates`, `/language`, `/about`,
//! `/help`, with fuzzy fallback for typos) and a trigger watcher that fans
//! out the monitor's newly observed updates to subscribers, deduplicated
//! per user through a durable delivery ledger.

pub mod commands;
pub mod format;
pub mod fuzzy;
pub mod i18n;
pub mod ledger;
pub mod service;
pub mod state;
pub mod subscribers;
pub mod telegram;
pub mod transport;
pub mod watcher;

pub use commands::{handle_callback, handle_text, CallbackOutcome, Reply};
pub use i18n::Translations;
pub use ledger::DeliveryLedger;
pub use service::{run_bot, BotOptions};
pub use state::{BotState, DEFAULT_LOCALE};
pub use subscribers::{Subscriber, SubscriberStore};
pub use transport::{Keyboard, MessageRef, OutboundMessage, SendError, Transport};
pub use watcher::{consume_trigger, watch_triggers};
