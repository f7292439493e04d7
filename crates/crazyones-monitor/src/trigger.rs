// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trigger-document writer.
//!
//! When a tick allocates new ids, the monitor announces them to the bot
//! through a single transient JSON document: locale to ascending id list.
//! An empty tick writes nothing; the absence of the file is the "no news"
//! signal.

use crazyones_core::fsio;
use crazyones_core::{CrazyOnesError, DataDir, TriggerDoc};
use tracing::info;

/// Writes the trigger document if any novelty exists.
///
/// Returns `true` when a trigger was written. Ids are sorted ascending per
/// locale; locales with an empty novelty set are omitted.
pub fn write_trigger(data: &DataDir, novelties: &TriggerDoc) -> Result<bool, CrazyOnesError> {
    let mut doc = TriggerDoc::new();
    for (locale, ids) in novelties {
        if ids.is_empty() {
            continue;
        }
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        doc.insert(locale.clone(), sorted);
    }

    if doc.is_empty() {
        return Ok(false);
    }

    fsio::write_json_atomic(&data.trigger(), &doc)?;
    info!(
        locales = doc.len(),
        ids = doc.values().map(Vec::len).sum::<usize>(),
        "trigger document written"
    );
    Ok(true)
}
