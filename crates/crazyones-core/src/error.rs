// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the CrazyOnes monitor and bot.

use thiserror::Error;

/// The primary error type used across both CrazyOnes processes.
///
/// Each variant maps to one propagation policy: configuration errors are
/// fatal at startup, network errors are retried on the next tick, parse
/// errors leave the affected locale untouched, storage errors abort the
/// current tick, and channel errors are classified by the fan-out loop.
#[derive(Debug, Error)]
pub enum CrazyOnesError {
    /// Configuration errors (missing config file, invalid token, bad URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// Network errors while fetching an Apple page (timeout, DNS, 5xx).
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The fetch deadline elapsed before the page arrived. Retried on the
    /// next tick, like any other network failure.
    #[error("request to {url} timed out after {duration:?}")]
    Timeout {
        url: String,
        duration: std::time::Duration,
    },

    /// The fetched page could not be parsed into the expected structure.
    #[error("parse error for {url}: {message}")]
    Parse { url: String, message: String },

    /// Data-directory I/O errors (atomic write failure, unreadable store).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Telegram transport errors (send failure, rate limit, blocked).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CrazyOnesError {
    /// Wraps an I/O error as a storage error.
    pub fn storage(source: std::io::Error) -> Self {
        CrazyOnesError::Storage {
            source: Box::new(source),
        }
    }
}
