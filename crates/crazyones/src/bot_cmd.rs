// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `crazyones bot` command implementation.

use std::path::PathBuf;

use crazyones_bot::{run_bot, BotOptions};
use crazyones_config::{is_valid_token, CrazyOnesConfig};
use crazyones_core::DataDir;
use tracing::error;

use crate::signals;
use crate::{EXIT_CONFIG, EXIT_OK};

pub async fn run(config: &CrazyOnesConfig, data: DataDir, token: Option<String>) -> i32 {
    // An invalid or missing token is fatal before any polling starts.
    let token = match token {
        Some(token) if is_valid_token(&token) => token,
        Some(_) => {
            error!("telegram bot token does not match the Bot API token format");
            return EXIT_CONFIG;
        }
        None => {
            error!("no telegram bot token; set telegram_bot_token in config.json or pass --token");
            return EXIT_CONFIG;
        }
    };

    let options = BotOptions {
        trigger_poll: std::time::Duration::from_secs(config.bot.trigger_poll_secs),
        send_retry_max: config.bot.send_retry_max,
        shutdown_grace: signals::SHUTDOWN_GRACE,
    };
    let translations_dir = PathBuf::from(&config.bot.translations_dir);
    let cancel = signals::install_signal_handler();

    match run_bot(&token, data, &translations_dir, options, cancel).await {
        Ok(()) => EXIT_OK,
        Err(e) => {
            error!(error = %e, "bot failed");
            EXIT_CONFIG
        }
    }
}
