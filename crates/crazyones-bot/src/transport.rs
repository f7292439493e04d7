// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The transport seam between bot logic and the Telegram API.
//!
//! Everything user-visible goes through [`Transport`], so the dispatcher and
//! fan-out loop are testable against a mock. Send failures come back
//! pre-classified: the caller decides between retry, deactivation, and
//! skipping based on the [`SendError`] variant alone.

use std::time::Duration;

use async_trait::async_trait;

/// An inline keyboard: rows of `(label, callback data)` buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keyboard {
    pub rows: Vec<Vec<(String, String)>>,
}

/// One outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl OutboundMessage {
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(chat_id: i64, text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            chat_id,
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Reference to a sent message, for later edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}

/// A classified send failure.
#[derive(Debug)]
pub enum SendError {
    /// Network or server-side error; retry with backoff.
    Transient(String),
    /// Rate limited; honor the given duration exactly, then retry.
    RetryAfter(Duration),
    /// The chat is gone for good (user blocked the bot, chat not found,
    /// bot kicked); deactivate the subscriber.
    Blocked(String),
    /// Any other permanent failure; log and move on.
    Other(String),
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::Transient(m) => write!(f, "transient: {m}"),
            SendError::RetryAfter(d) => write!(f, "rate limited, retry after {d:?}"),
            SendError::Blocked(m) => write!(f, "blocked: {m}"),
            SendError::Other(m) => write!(f, "permanent: {m}"),
        }
    }
}

impl std::error::Error for SendError {}

/// The capability set the bot consumes from the Telegram transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a Markdown-formatted message, optionally with an inline
    /// keyboard. Link previews are suppressed.
    async fn send_message(&self, msg: OutboundMessage) -> Result<MessageRef, SendError>;

    /// Replaces the text of a previously sent message (used to collapse the
    /// locale-selection menu into its confirmation).
    async fn edit_message(
        &self,
        target: MessageRef,
        text: &str,
    ) -> Result<(), SendError>;
}
