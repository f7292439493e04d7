// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: the Telegram token shape, the Apple URL scheme, and sane
//! scheduler bounds.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::model::CrazyOnesConfig;

/// A single configuration validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

/// Placeholder value shipped in the sample config; never a real token.
const TOKEN_PLACEHOLDER: &str = "YOUR_TELEGRAM_BOT_TOKEN_HERE";

fn token_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{8,10}:[A-Za-z0-9_-]{35,}$").expect("static regex"))
}

/// Whether a string is a plausible Telegram bot token.
pub fn is_valid_token(token: &str) -> bool {
    token != TOKEN_PLACEHOLDER && token_pattern().is_match(token)
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast). The token is only
/// checked when present; the bot process additionally requires it to exist.
pub fn validate_config(config: &CrazyOnesConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !config.apple_updates_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!(
                "apple_updates_url must be an https URL, got `{}`",
                config.apple_updates_url
            ),
        });
    }

    if let Some(ref token) = config.telegram_bot_token {
        if !is_valid_token(token) {
            errors.push(ConfigError::Validation {
                message: "telegram_bot_token does not match the Bot API token format".to_string(),
            });
        }
    }

    if config.monitor.interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "monitor.interval_secs must be positive".to_string(),
        });
    }

    if config.monitor.fetch_concurrency == 0 {
        errors.push(ConfigError::Validation {
            message: "monitor.fetch_concurrency must be at least 1".to_string(),
        });
    }

    if config.monitor.data_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "monitor.data_dir must not be empty".to_string(),
        });
    }

    if config.bot.send_retry_max == 0 {
        errors.push(ConfigError::Validation {
            message: "bot.send_retry_max must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
