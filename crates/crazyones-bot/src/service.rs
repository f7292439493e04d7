// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The bot runtime: teloxide dispatcher plus trigger watcher.
//!
//! Two cooperating tasks share one [`BotState`] behind a mutex: the command
//! dispatcher (event-driven on Telegram updates) and the trigger watcher
//! (periodic). A shutdown signal stops the watcher loop immediately and
//! asks the dispatcher to wind down its long poll.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::ChatMemberUpdated;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crazyones_core::{CrazyOnesError, DataDir};

use crate::commands;
use crate::i18n::Translations;
use crate::state::BotState;
use crate::telegram::{self, TelegramTransport};
use crate::transport::{OutboundMessage, Transport};
use crate::watcher;

/// Tuning for the bot runtime.
#[derive(Debug, Clone)]
pub struct BotOptions {
    pub trigger_poll: Duration,
    pub send_retry_max: u32,
    /// How long in-flight work may keep running after a shutdown signal.
    pub shutdown_grace: Duration,
}

impl Default for BotOptions {
    fn default() -> Self {
        Self {
            trigger_poll: Duration::from_secs(30),
            send_retry_max: 5,
            shutdown_grace: Duration::from_secs(30),
        }
    }
}

/// Runs the bot until the cancellation token fires.
pub async fn run_bot(
    token: &str,
    data: DataDir,
    translations_dir: &Path,
    options: BotOptions,
    cancel: CancellationToken,
) -> Result<(), CrazyOnesError> {
    let translations = Translations::load_dir(translations_dir)?;
    let state = Arc::new(Mutex::new(BotState::load(data, translations)?));

    let bot = Bot::new(token);
    let transport: Arc<dyn Transport> = Arc::new(TelegramTransport::new(bot.clone()));

    // Trigger watcher task.
    let mut watcher_handle = tokio::spawn(watcher::watch_triggers(
        state.clone(),
        transport.clone(),
        options.trigger_poll,
        options.send_retry_max,
        cancel.clone(),
    ));

    // Command dispatcher.
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback))
        .branch(Update::filter_my_chat_member().endpoint(on_my_chat_member));

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state.clone(), transport.clone()])
        .default_handler(|_| async {})
        .build();

    let shutdown_token = dispatcher.shutdown_token();
    let mut dispatch_handle = tokio::spawn(async move {
        dispatcher.dispatch().await;
    });

    info!("bot running");
    cancel.cancelled().await;
    info!("shutdown requested, stopping bot");

    // The in-flight send or dispatch gets a bounded grace, then is
    // abandoned. Abandonment is safe: the ledger is flushed per send.
    let wind_down = async {
        if let Ok(stopped) = shutdown_token.shutdown() {
            stopped.await;
        }
        let _ = (&mut dispatch_handle).await;
        let _ = (&mut watcher_handle).await;
    };
    if tokio::time::timeout(options.shutdown_grace, wind_down)
        .await
        .is_err()
    {
        warn!(
            grace_secs = options.shutdown_grace.as_secs(),
            "in-flight work did not finish within the shutdown grace, aborting"
        );
        dispatch_handle.abort();
        watcher_handle.abort();
    }

    info!("bot stopped");
    Ok(())
}

type SharedState = Arc<Mutex<BotState>>;

async fn on_message(
    msg: Message,
    state: SharedState,
    transport: Arc<dyn Transport>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    // Non-command chatter is only answered in private chats.
    if !text.starts_with('/') && !msg.chat.is_private() {
        return Ok(());
    }

    let chat_id = msg.chat.id.0;
    let replies = {
        let mut guard = state.lock().await;
        match commands::handle_text(&mut guard, chat_id, text) {
            Ok(replies) => replies,
            Err(e) => {
                warn!(chat_id, error = %e, "command handling failed");
                return Ok(());
            }
        }
    };

    for reply in replies {
        let outbound = match reply.keyboard {
            Some(keyboard) => OutboundMessage::with_keyboard(chat_id, reply.text, keyboard),
            None => OutboundMessage::text(chat_id, reply.text),
        };
        if let Err(e) = transport.send_message(outbound).await {
            warn!(chat_id, error = %e, "reply send failed");
            break;
        }
    }
    Ok(())
}

async fn on_callback(
    query: CallbackQuery,
    bot: Bot,
    state: SharedState,
    transport: Arc<dyn Transport>,
) -> ResponseResult<()> {
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };
    let Some(message) = query.regular_message() else {
        return Ok(());
    };
    let chat_id = message.chat.id.0;

    let outcome = {
        let mut guard = state.lock().await;
        match commands::handle_callback(&mut guard, chat_id, data) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(chat_id, error = %e, "callback handling failed");
                return Ok(());
            }
        }
    };

    if let Some(edit) = outcome.edit {
        let target = crate::transport::MessageRef {
            chat_id,
            message_id: message.id.0,
        };
        if let Err(e) = transport.edit_message(target, &edit).await {
            warn!(chat_id, error = %e, "menu edit failed");
        }
    }

    for reply in outcome.replies {
        if let Err(e) = transport
            .send_message(OutboundMessage::text(chat_id, reply.text))
            .await
        {
            warn!(chat_id, error = %e, "callback reply send failed");
            break;
        }
    }
    Ok(())
}

async fn on_my_chat_member(
    update: ChatMemberUpdated,
    state: SharedState,
    transport: Arc<dyn Transport>,
) -> ResponseResult<()> {
    let chat_id = update.chat.id.0;

    if telegram::is_membership_loss(&update) {
        let mut guard = state.lock().await;
        if let Err(e) = commands::handle_membership_loss(&mut guard, chat_id) {
            warn!(chat_id, error = %e, "membership-loss handling failed");
        }
        return Ok(());
    }

    if telegram::is_group_join(&update) {
        let about = {
            let guard = state.lock().await;
            let ui = guard.ui_lang(chat_id);
            guard.translations.get(&ui, "about")
        };
        if let Err(e) = transport
            .send_message(OutboundMessage::text(chat_id, about))
            .await
        {
            warn!(chat_id, error = %e, "group-join about message failed");
        }
    }
    Ok(())
}
