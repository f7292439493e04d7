// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `crazyones monitor` command implementation.
//!
//! Acquires the single-instance lock, then either runs one tick (the
//! default, suitable for cron-style supervision) or the interval scheduler
//! with `--daemon`. Exit codes: 0 success, 1 configuration error, 2 when
//! the only failures were network failures, 130 when a signal arrives and
//! the tick cannot finish within the shutdown grace.

use std::time::Duration;

use crazyones_config::CrazyOnesConfig;
use crazyones_core::{CrazyOnesError, DataDir};
use crazyones_monitor::{HttpFetcher, InstanceLock, MonitorScheduler};
use tracing::{error, info};

use crate::signals;
use crate::{EXIT_CONFIG, EXIT_INTERRUPTED, EXIT_NETWORK, EXIT_OK};

pub async fn run(
    config: &CrazyOnesConfig,
    data: DataDir,
    index_url: &str,
    interval_secs: u64,
    daemon: bool,
) -> i32 {
    let _lock = match InstanceLock::acquire(&data, signals::SHUTDOWN_GRACE) {
        Ok(lock) => lock,
        Err(e) => {
            error!(error = %e, "could not acquire instance lock");
            return EXIT_CONFIG;
        }
    };

    let fetcher = match HttpFetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!(error = %e, "could not build HTTP client");
            return EXIT_CONFIG;
        }
    };

    let cancel = signals::install_signal_handler();
    let concurrency = config.monitor.fetch_concurrency;

    if daemon {
        info!(interval_secs, url = index_url, "starting monitor daemon");
        let mut scheduler = MonitorScheduler::new(Duration::from_secs(interval_secs));
        match scheduler
            .run(&fetcher, &data, index_url, concurrency, &cancel)
            .await
        {
            Ok(()) => {
                info!("monitor daemon stopped");
                EXIT_OK
            }
            Err(e) => {
                error!(error = %e, "monitor daemon failed");
                EXIT_CONFIG
            }
        }
    } else {
        info!(url = index_url, "running single monitor tick");
        let tick = crazyones_monitor::run_tick(&fetcher, &data, index_url, concurrency);
        tokio::pin!(tick);

        // A signal lets the tick finish within the grace, then abandons it.
        let result = tokio::select! {
            result = &mut tick => Some(result),
            _ = cancel.cancelled() => {
                info!("signal received, letting the tick finish within the grace");
                tokio::time::timeout(signals::SHUTDOWN_GRACE, &mut tick)
                    .await
                    .ok()
            }
        };

        match result {
            Some(Ok(outcome)) if outcome.network_only_failure() => EXIT_NETWORK,
            Some(Ok(_)) => EXIT_OK,
            Some(Err(
                CrazyOnesError::Network { .. } | CrazyOnesError::Timeout { .. },
            )) => EXIT_NETWORK,
            Some(Err(e)) => {
                error!(error = %e, "tick failed");
                EXIT_CONFIG
            }
            None => {
                info!("interrupted before tick completed");
                EXIT_INTERRUPTED
            }
        }
    }
}
