// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-instance enforcement for the monitor.
//!
//! An advisory lock file holds the owning PID. A second instance finding a
//! live holder drops a stop-request file (which the holder's interruptible
//! sleep polls), then waits a bounded interval for the lock to clear before
//! giving up. A lock held by a dead process is stolen.

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crazyones_core::{CrazyOnesError, DataDir};
use tracing::{info, warn};

const ACQUIRE_POLL: Duration = Duration::from_millis(200);

/// The held instance lock; released (file removed) on drop.
#[derive(Debug)]
pub struct InstanceLock {
    path: PathBuf,
    pid: u32,
}

impl InstanceLock {
    /// Acquires the monitor instance lock, waiting up to `wait` for a live
    /// holder to honor the stop request.
    pub fn acquire(data: &DataDir, wait: Duration) -> Result<Self, CrazyOnesError> {
        data.ensure()?;
        let path = data.instance_lock();
        let pid = std::process::id();
        let started = Instant::now();
        let mut stop_requested = false;

        loop {
            match std::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
            {
                Ok(mut file) => {
                    file.write_all(pid.to_string().as_bytes())
                        .map_err(CrazyOnesError::storage)?;
                    file.sync_all().map_err(CrazyOnesError::storage)?;
                    // A leftover stop request must not kill us right away.
                    let _ = std::fs::remove_file(data.stop_request());
                    info!(pid, "instance lock acquired");
                    return Ok(Self { path, pid });
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    let holder = std::fs::read_to_string(&path)
                        .ok()
                        .and_then(|s| s.trim().parse::<u32>().ok());

                    match holder {
                        Some(holder_pid) if holder_alive(holder_pid) => {
                            if !stop_requested {
                                std::fs::write(data.stop_request(), holder_pid.to_string())
                                    .map_err(CrazyOnesError::storage)?;
                                info!(holder_pid, "requested running instance to stop");
                                stop_requested = true;
                            }
                            if started.elapsed() >= wait {
                                return Err(CrazyOnesError::Config(format!(
                                    "another monitor instance (pid {holder_pid}) did not stop \
                                     within {}s",
                                    wait.as_secs()
                                )));
                            }
                            std::thread::sleep(ACQUIRE_POLL);
                        }
                        _ => {
                            warn!(?holder, "stale instance lock, stealing");
                            let _ = std::fs::remove_file(&path);
                        }
                    }
                }
                Err(e) => return Err(CrazyOnesError::storage(e)),
            }
        }
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        // Only remove the lock if it is still ours.
        let ours = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
            == Some(self.pid);
        if ours {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Whether the given PID is a live process.
///
/// Linux probes `/proc/<pid>`. Other platforms cannot probe cheaply and
/// report alive, so a foreign lock there is only taken over after the
/// bounded wait expires in [`InstanceLock::acquire`] errors out.
fn holder_alive(pid: u32) -> bool {
    #[cfg(target_os = "linux")]
    {
        std::path::Path::new(&format!("/proc/{pid}")).exists()
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = pid;
        true
    }
}
