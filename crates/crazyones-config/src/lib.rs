// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for CrazyOnes: layered loading, model structs, validation.

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{BotConfig, CrazyOnesConfig, MonitorConfig};
pub use validation::{is_valid_token, validate_config, ConfigError};
