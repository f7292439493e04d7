// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for CrazyOnes.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level CrazyOnes configuration, loaded from `config.json`.
///
/// The on-disk contract is `{version, apple_updates_url, telegram_bot_token}`;
/// the `monitor` and `bot` sections are optional tuning knobs that default to
/// the documented values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CrazyOnesConfig {
    /// Config schema version.
    #[serde(default = "default_version")]
    pub version: String,

    /// The canonical Apple security-releases page to start discovery from.
    #[serde(default = "default_apple_updates_url")]
    pub apple_updates_url: String,

    /// Telegram Bot API token. `None` disables the bot process.
    #[serde(default)]
    pub telegram_bot_token: Option<String>,

    /// Monitor pipeline settings.
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Bot service settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CrazyOnesConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            apple_updates_url: default_apple_updates_url(),
            telegram_bot_token: None,
            monitor: MonitorConfig::default(),
            bot: BotConfig::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_version() -> String {
    "1".to_string()
}

fn default_apple_updates_url() -> String {
    "https://support.apple.com/en-us/100100".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Monitor pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Seconds between ticks.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Maximum concurrent per-locale page fetches.
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    /// Path to the shared data directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            fetch_concurrency: default_fetch_concurrency(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_interval_secs() -> u64 {
    21_600
}

fn default_fetch_concurrency() -> usize {
    4
}

fn default_data_dir() -> String {
    "data".to_string()
}

/// Bot service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Seconds between polls for the monitor's trigger document.
    #[serde(default = "default_trigger_poll_secs")]
    pub trigger_poll_secs: u64,

    /// Maximum delivery attempts for a transiently failing send.
    #[serde(default = "default_send_retry_max")]
    pub send_retry_max: u32,

    /// Directory holding one translation JSON per UI language.
    #[serde(default = "default_translations_dir")]
    pub translations_dir: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            trigger_poll_secs: default_trigger_poll_secs(),
            send_retry_max: default_send_retry_max(),
            translations_dir: default_translations_dir(),
        }
    }
}

fn default_trigger_poll_secs() -> u64 {
    30
}

fn default_send_retry_max() -> u32 {
    5
}

fn default_translations_dir() -> String {
    "translations".to_string()
}
