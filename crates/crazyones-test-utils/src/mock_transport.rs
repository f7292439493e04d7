// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock Telegram transport for deterministic bot tests.
//!
//! Captures every sent message and lets tests script per-chat failures
//! (blocked users, rate limits, flaky networks).

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use crazyones_bot::{MessageRef, OutboundMessage, SendError, Transport};
use tokio::sync::Mutex;

/// A scripted failure for one chat.
#[derive(Debug, Clone)]
enum Script {
    /// Every send to this chat fails as blocked.
    Blocked,
    /// The next N sends fail transiently, then succeed.
    TransientFailures(u32),
}

/// A [`Transport`] that records messages instead of sending them.
#[derive(Default)]
pub struct MockTransport {
    sent: Mutex<Vec<OutboundMessage>>,
    edits: Mutex<Vec<(MessageRef, String)>>,
    scripts: Mutex<HashMap<i64, Script>>,
    next_message_id: AtomicI32,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sends to `chat_id` fail as permanently blocked.
    pub async fn script_blocked(&self, chat_id: i64) {
        self.scripts.lock().await.insert(chat_id, Script::Blocked);
    }

    /// The next `count` sends to `chat_id` fail transiently, then succeed.
    pub async fn script_transient_failures(&self, chat_id: i64, count: u32) {
        self.scripts
            .lock()
            .await
            .insert(chat_id, Script::TransientFailures(count));
    }

    /// Messages sent so far.
    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Messages sent to one chat.
    pub async fn sent_to(&self, chat_id: i64) -> Vec<OutboundMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect()
    }

    /// Edits applied so far.
    pub async fn edited_messages(&self) -> Vec<(MessageRef, String)> {
        self.edits.lock().await.clone()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
        self.edits.lock().await.clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send_message(&self, msg: OutboundMessage) -> Result<MessageRef, SendError> {
        let mut scripts = self.scripts.lock().await;
        match scripts.get_mut(&msg.chat_id) {
            Some(Script::Blocked) => {
                return Err(SendError::Blocked("Forbidden: bot was blocked by the user".into()))
            }
            Some(Script::TransientFailures(remaining)) => {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(SendError::Transient("connection reset".into()));
                }
                scripts.remove(&msg.chat_id);
            }
            None => {}
        }
        drop(scripts);

        let chat_id = msg.chat_id;
        self.sent.lock().await.push(msg);
        Ok(MessageRef {
            chat_id,
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst),
        })
    }

    async fn edit_message(&self, target: MessageRef, text: &str) -> Result<(), SendError> {
        self.edits.lock().await.push((target, text.to_string()));
        Ok(())
    }
}
