// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The monitor's tick scheduler.
//!
//! States: Idle → Running → Sleeping → Running … → Stopping. The sleep is
//! interruptible: a shutdown signal cancels it immediately, and a
//! stop-request file from a newer instance is polled once per second so a
//! handover never waits out the full interval. Ticks never overlap; the
//! loop is strictly tick-then-sleep.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crazyones_core::{CrazyOnesError, DataDir};

use crate::fetch::PageFetcher;
use crate::tick;

/// How long an in-flight tick may keep running after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Sleeping,
    Stopping,
}

/// Runs monitor ticks on a fixed interval until cancelled.
pub struct MonitorScheduler {
    interval: Duration,
    state: SchedulerState,
}

impl MonitorScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Tick-sleep loop. Returns once `cancel` fires (or a stop request
    /// arrives); the in-flight tick is allowed to complete within the
    /// shutdown grace, then abandoned. Abandonment is safe because every
    /// store write is atomic.
    pub async fn run(
        &mut self,
        fetcher: &dyn PageFetcher,
        data: &DataDir,
        index_url: &str,
        concurrency: usize,
        cancel: &CancellationToken,
    ) -> Result<(), CrazyOnesError> {
        loop {
            if cancel.is_cancelled() {
                self.state = SchedulerState::Stopping;
                info!("monitor scheduler stopping");
                return Ok(());
            }

            self.state = SchedulerState::Running;
            let tick_result = {
                let tick = tick::run_tick(fetcher, data, index_url, concurrency);
                tokio::pin!(tick);
                tokio::select! {
                    result = &mut tick => Some(result),
                    _ = cancel.cancelled() => {
                        info!("shutdown requested, letting the in-flight tick finish");
                        match tokio::time::timeout(SHUTDOWN_GRACE, &mut tick).await {
                            Ok(result) => Some(result),
                            Err(_) => {
                                warn!(
                                    grace_secs = SHUTDOWN_GRACE.as_secs(),
                                    "tick did not finish within the shutdown grace, abandoning"
                                );
                                None
                            }
                        }
                    }
                }
            };
            match tick_result {
                Some(Ok(outcome)) => {
                    if outcome.network_failures > 0 || outcome.parse_failures > 0 {
                        warn!(
                            network = outcome.network_failures,
                            parse = outcome.parse_failures,
                            "tick completed with failures"
                        );
                    }
                }
                Some(Err(e)) => {
                    warn!(error = %e, "tick failed, retrying next interval");
                }
                None => {}
            }

            self.state = SchedulerState::Sleeping;
            tokio::select! {
                _ = cancel.cancelled() => {
                    self.state = SchedulerState::Stopping;
                    info!("monitor scheduler stopping");
                    return Ok(());
                }
                _ = sleep_until_stop_request(self.interval, data, cancel) => {}
            }
        }
    }
}

/// Sleeps for `interval` in one-second slices, waking early when a stop
/// request appears. A stop request cancels the shared token so the whole
/// process winds down, then the request file is consumed.
async fn sleep_until_stop_request(
    interval: Duration,
    data: &DataDir,
    cancel: &CancellationToken,
) {
    let deadline = tokio::time::Instant::now() + interval;
    loop {
        if data.stop_request().exists() {
            info!("stop request received from another instance");
            let _ = std::fs::remove_file(data.stop_request());
            cancel.cancel();
            return;
        }
        let now = tokio::time::Instant::now();
        if now >= deadline {
            return;
        }
        let slice = Duration::from_secs(1).min(deadline - now);
        tokio::time::sleep(slice).await;
    }
}
