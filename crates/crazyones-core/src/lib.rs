// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for CrazyOnes.
//!
//! Provides the domain types, the shared error type, the data-directory
//! layout, and the atomic JSON I/O primitives that both the monitor and the
//! bot build on. The two processes never talk to each other directly; this
//! crate defines the files through which they cooperate.

pub mod datadir;
pub mod error;
pub mod fsio;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use datadir::DataDir;
pub use error::CrazyOnesError;
pub use types::{
    ContentKey, FingerprintLedger, Locale, LocaleCatalog, LocaleNames, SecurityUpdate, TriggerDoc,
    SENTINEL_DATE,
};
