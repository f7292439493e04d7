// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for CrazyOnes: a fixture-backed page fetcher, a scripted
//! Telegram transport, and HTML fixture builders.

pub mod fixtures;
pub mod mock_fetcher;
pub mod mock_transport;

pub use fixtures::{index_page, security_page, FixtureRow};
pub use mock_fetcher::MockFetcher;
pub use mock_transport::MockTransport;
