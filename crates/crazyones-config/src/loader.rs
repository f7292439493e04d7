// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the hierarchy `./config.json` > `~/.config/crazyones/config.json`
//! > `/etc/crazyones/config.json` with environment variable overrides via
//! the `CRAZYONES_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};

use crate::model::CrazyOnesConfig;

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/crazyones/config.json` (system-wide)
/// 3. `~/.config/crazyones/config.json` (user XDG config)
/// 4. `./config.json` (local directory)
/// 5. `CRAZYONES_*` environment variables
pub fn load_config() -> Result<CrazyOnesConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CrazyOnesConfig::default()))
        .merge(Json::file("/etc/crazyones/config.json"))
        .merge(Json::file(
            dirs::config_dir()
                .map(|d| d.join("crazyones/config.json"))
                .unwrap_or_default(),
        ))
        .merge(Json::file("config.json"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a JSON string only (no file lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(json_content: &str) -> Result<CrazyOnesConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CrazyOnesConfig::default()))
        .merge(Json::string(json_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CrazyOnesConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CrazyOnesConfig::default()))
        .merge(Json::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Only keys that start with a section name are nested; everything else
/// stays top-level. `CRAZYONES_TELEGRAM_BOT_TOKEN` must map to the top-level
/// `telegram_bot_token`, not to a `bot.token` nested key, so a naive
/// `Env::split("_")` cannot be used here.
fn env_provider() -> Env {
    Env::prefixed("CRAZYONES_").map(|key| {
        let key_str = key.as_str();
        if let Some(rest) = key_str.strip_prefix("monitor_") {
            format!("monitor.{rest}").into()
        } else if let Some(rest) = key_str.strip_prefix("bot_") {
            format!("bot.{rest}").into()
        } else {
            key_str.to_string().into()
        }
    })
}
