// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `crazyones monitor --log`: print the tail of the mirrored log file.

use std::path::Path;

use crate::{EXIT_CONFIG, EXIT_OK};

/// Prints the last `count` lines of the log file to stdout.
pub fn print_recent(path: &Path, count: usize) -> i32 {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            eprintln!("no log file yet at {}", path.display());
            return EXIT_OK;
        }
        Err(e) => {
            eprintln!("error: could not read {}: {e}", path.display());
            return EXIT_CONFIG;
        }
    };

    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(count);
    for line in &lines[start..] {
        println!("{line}");
    }
    EXIT_OK
}
