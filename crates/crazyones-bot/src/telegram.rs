// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Teloxide-backed [`Transport`] implementation and update helpers.
//!
//! Maps teloxide request errors onto the bot's [`SendError`] classification:
//! rate limits carry their retry-after duration, "chat is gone" API errors
//! become `Blocked`, network and I/O errors become `Transient`, everything
//! else is permanent-other.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatMemberUpdated, InlineKeyboardButton, InlineKeyboardMarkup, LinkPreviewOptions, MessageId,
    ParseMode,
};
use teloxide::{ApiError, RequestError};

use crate::transport::{Keyboard, MessageRef, OutboundMessage, SendError, Transport};

/// Telegram transport over a teloxide [`Bot`].
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn no_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

fn to_markup(keyboard: Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.into_iter().map(|row| {
        row.into_iter()
            .map(|(label, data)| InlineKeyboardButton::callback(label, data))
            .collect::<Vec<_>>()
    }))
}

/// Classifies a teloxide error for the fan-out loop.
pub fn classify_error(error: RequestError) -> SendError {
    match error {
        RequestError::RetryAfter(seconds) => SendError::RetryAfter(seconds.duration()),
        RequestError::Api(api) => match api {
            ApiError::BotBlocked
            | ApiError::ChatNotFound
            | ApiError::UserDeactivated
            | ApiError::BotKicked
            | ApiError::BotKickedFromSupergroup
            | ApiError::GroupDeactivated
            | ApiError::CantInitiateConversation => SendError::Blocked(api.to_string()),
            other => SendError::Other(other.to_string()),
        },
        RequestError::Network(e) => SendError::Transient(e.to_string()),
        RequestError::Io(e) => SendError::Transient(e.to_string()),
        other => SendError::Other(other.to_string()),
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_message(&self, msg: OutboundMessage) -> Result<MessageRef, SendError> {
        let chat_id = ChatId(msg.chat_id);
        let request = self
            .bot
            .send_message(chat_id, &msg.text)
            .parse_mode(ParseMode::Markdown)
            .link_preview_options(no_preview());

        let sent = match msg.keyboard {
            Some(keyboard) => request.reply_markup(to_markup(keyboard)).await,
            None => request.await,
        }
        .map_err(classify_error)?;

        Ok(MessageRef {
            chat_id: msg.chat_id,
            message_id: sent.id.0,
        })
    }

    async fn edit_message(&self, target: MessageRef, text: &str) -> Result<(), SendError> {
        self.bot
            .edit_message_text(ChatId(target.chat_id), MessageId(target.message_id), text)
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(classify_error)?;
        Ok(())
    }
}

/// Whether a `my_chat_member` update means the bot lost the chat.
pub fn is_membership_loss(update: &ChatMemberUpdated) -> bool {
    let was_present = !update.old_chat_member.is_left() && !update.old_chat_member.is_banned();
    let now_gone = update.new_chat_member.is_left() || update.new_chat_member.is_banned();
    was_present && now_gone
}

/// Whether a `my_chat_member` update means the bot was added to a group,
/// supergroup, or channel.
pub fn is_group_join(update: &ChatMemberUpdated) -> bool {
    let was_gone = update.old_chat_member.is_left() || update.old_chat_member.is_banned();
    let now_present = !update.new_chat_member.is_left() && !update.new_chat_member.is_banned();
    was_gone && now_present && !update.chat.is_private()
}
