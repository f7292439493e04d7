// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CrazyOnes - Apple security-release monitoring with Telegram delivery.
//!
//! This is the binary entry point. The `monitor` subcommand runs the
//! scraping pipeline (one tick, or on an interval with `--daemon`); the
//! `bot` subcommand runs the Telegram notification service. Both share the
//! data directory described in the operator documentation.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod bot_cmd;
mod logtail;
mod monitor_cmd;
mod signals;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crazyones_config::{load_config, load_config_from_path, validate_config, CrazyOnesConfig};
use crazyones_core::DataDir;

/// Process exit codes; the contract with the service supervisor.
pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 1;
pub const EXIT_NETWORK: i32 = 2;
pub const EXIT_INTERRUPTED: i32 = 130;

/// CrazyOnes - Apple Updates monitoring and notifications.
#[derive(Parser, Debug)]
#[command(name = "crazyones", version, about, long_about = None)]
struct Cli {
    /// Path to config.json (defaults to the standard lookup hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Telegram bot token (overrides config.json).
    #[arg(short, long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the monitoring pipeline.
    Monitor {
        /// Apple security-releases index URL (overrides config.json).
        #[arg(short, long)]
        url: Option<String>,

        /// Seconds between ticks (default 21600).
        #[arg(long)]
        interval: Option<u64>,

        /// Keep running on the interval instead of a single tick.
        #[arg(long)]
        daemon: bool,

        /// Print the last 100 log lines and exit.
        #[arg(long)]
        log: bool,
    },
    /// Run the Telegram notification bot.
    Bot,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    std::process::exit(run(cli).await);
}

async fn run(cli: Cli) -> i32 {
    let config = match load(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            return EXIT_CONFIG;
        }
    };

    let data = DataDir::new(&config.monitor.data_dir);
    init_tracing(&config.log_level, &data);

    match cli.command {
        Commands::Monitor {
            url,
            interval,
            daemon,
            log,
        } => {
            if log {
                return logtail::print_recent(&data.log_file(), 100);
            }
            let index_url = url.unwrap_or_else(|| config.apple_updates_url.clone());
            let interval = interval.unwrap_or(config.monitor.interval_secs);
            monitor_cmd::run(&config, data, &index_url, interval, daemon).await
        }
        Commands::Bot => {
            let token = cli.token.or_else(|| config.telegram_bot_token.clone());
            bot_cmd::run(&config, data, token).await
        }
    }
}

fn load(cli: &Cli) -> Result<CrazyOnesConfig, String> {
    let config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    }
    .map_err(|e| e.to_string())?;

    validate_config(&config).map_err(|errors| {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    Ok(config)
}

/// Initializes tracing to stderr, mirrored into the data directory so
/// `monitor --log` can replay recent lines.
fn init_tracing(log_level: &str, data: &DataDir) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("crazyones={log_level},warn")));

    let _ = data.ensure();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data.log_file());

    match log_file {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(std::sync::Arc::new(file)),
                )
                .init();
        }
        Err(_) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }
}
