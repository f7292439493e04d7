// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The trigger watcher: polls for the monitor's trigger document and fans
//! out notifications.
//!
//! Consume semantics: read, deliver, then delete. Deduplication lives in
//! the delivery ledger, which is flushed after every successful send, so a
//! crash mid-consumption re-processes the trigger without re-sending what
//! was already recorded. A trigger that fails to parse is treated as not
//! ready yet (the monitor may still be renaming it into place) and retried
//! on the next poll.

use std::sync::Arc;
use std::time::Duration;

use crazyones_core::fsio;
use crazyones_core::{CrazyOnesError, Locale, SecurityUpdate, TriggerDoc};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::format;
use crate::state::BotState;
use crate::transport::{OutboundMessage, SendError, Transport};

/// First backoff delay for transient send failures; doubles per attempt.
const BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Polls for the trigger document until cancelled.
pub async fn watch_triggers(
    state: Arc<Mutex<BotState>>,
    transport: Arc<dyn Transport>,
    poll_interval: Duration,
    retry_max: u32,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("trigger watcher stopping");
                return;
            }
            _ = tokio::time::sleep(poll_interval) => {}
        }

        match consume_trigger(&state, transport.as_ref(), retry_max).await {
            Ok(true) => debug!("trigger consumed"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "trigger consumption failed"),
        }
    }
}

/// Consumes one trigger document if present.
///
/// Returns `Ok(true)` when a trigger was processed and deleted. Earlier
/// triggers are fully delivered before this function returns, so triggers
/// consumed in sequence never interleave.
pub async fn consume_trigger(
    state: &Mutex<BotState>,
    transport: &dyn Transport,
    retry_max: u32,
) -> Result<bool, CrazyOnesError> {
    let trigger_path = {
        let guard = state.lock().await;
        guard.data.trigger()
    };

    let doc: TriggerDoc = match fsio::read_json(&trigger_path) {
        Ok(Some(doc)) => doc,
        Ok(None) => return Ok(false),
        Err(e) => {
            // Possibly mid-rename; retry next poll.
            debug!(error = %e, "trigger not readable yet");
            return Ok(false);
        }
    };

    info!(locales = doc.len(), "processing trigger document");

    for (locale, ids) in &doc {
        deliver_locale(state, transport, locale, ids, retry_max).await?;
    }

    std::fs::remove_file(&trigger_path).map_err(CrazyOnesError::storage)?;
    Ok(true)
}

/// Delivers one locale's novel ids to its active subscribers.
async fn deliver_locale(
    state: &Mutex<BotState>,
    transport: &dyn Transport,
    locale: &Locale,
    novelty: &[u64],
    retry_max: u32,
) -> Result<(), CrazyOnesError> {
    // Snapshot everything under the lock, then send without holding it.
    let (subscribers, records, header_for) = {
        let guard = state.lock().await;
        let store = guard.store_for(locale)?;
        let mut records: Vec<SecurityUpdate> = store
            .into_iter()
            .filter(|u| novelty.contains(&u.id))
            .collect();
        records.sort_by_key(|u| u.id);

        let subscribers = guard.subscribers.active_for_locale(locale);
        let headers: Vec<(i64, String)> = subscribers
            .iter()
            .map(|s| {
                (
                    s.chat_id,
                    guard.translations.get(&s.ui_lang, "new_updates_header"),
                )
            })
            .collect();
        (subscribers, records, headers)
    };

    if records.is_empty() || subscribers.is_empty() {
        return Ok(());
    }

    for subscriber in &subscribers {
        let delivered = {
            let guard = state.lock().await;
            guard.ledger.delivered(subscriber.chat_id, locale)
        };
        let header = header_for
            .iter()
            .find(|(chat_id, _)| *chat_id == subscriber.chat_id)
            .map(|(_, h)| h.clone())
            .unwrap_or_default();

        // Ascending-id order per subscriber.
        for record in &records {
            if delivered.contains(&record.id) {
                continue;
            }

            let text = format!("{header}\n{}", format::notification_block(record));
            let msg = OutboundMessage::text(subscriber.chat_id, text);

            match send_with_retry(transport, msg, retry_max).await {
                Ok(()) => {
                    let mut guard = state.lock().await;
                    guard.ledger.record(subscriber.chat_id, locale, record.id)?;
                }
                Err(SendError::Blocked(reason)) => {
                    warn!(
                        chat_id = subscriber.chat_id,
                        reason, "subscriber unreachable, deactivating"
                    );
                    let mut guard = state.lock().await;
                    guard.subscribers.deactivate(subscriber.chat_id)?;
                    break;
                }
                Err(e) => {
                    warn!(
                        chat_id = subscriber.chat_id,
                        locale = %locale,
                        id = record.id,
                        error = %e,
                        "send failed, moving to next subscriber"
                    );
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Sends a message, retrying transient failures with exponential backoff
/// and honoring explicit retry-after durations exactly.
pub async fn send_with_retry(
    transport: &dyn Transport,
    msg: OutboundMessage,
    retry_max: u32,
) -> Result<(), SendError> {
    let mut attempt = 0u32;
    let mut backoff = BACKOFF_BASE;

    loop {
        match transport.send_message(msg.clone()).await {
            Ok(_) => return Ok(()),
            Err(SendError::RetryAfter(wait)) => {
                attempt += 1;
                if attempt >= retry_max {
                    return Err(SendError::Transient(format!(
                        "rate limited after {attempt} attempts"
                    )));
                }
                debug!(wait_secs = wait.as_secs(), "rate limited, honoring retry-after");
                tokio::time::sleep(wait).await;
            }
            Err(SendError::Transient(reason)) => {
                attempt += 1;
                if attempt >= retry_max {
                    return Err(SendError::Transient(format!(
                        "gave up after {attempt} attempts: {reason}"
                    )));
                }
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}
