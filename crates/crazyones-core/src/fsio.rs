// SPDX-FileCopyrightText: 2026 CrazyOnes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Atomic JSON file I/O for the shared data directory.
//!
//! Both processes coordinate exclusively through files, so every write goes
//! through write-temp → flush → rename. A reader therefore never observes a
//! half-written document; a torn read can only mean the file predates this
//! code and is treated by callers as "not ready".

use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CrazyOnesError;

/// Serializes `value` as pretty-printed JSON and writes it atomically.
///
/// The document is written to a sibling temp path, flushed and fsynced,
/// then renamed over the target. The parent directory is synced afterwards
/// so the rename itself is durable.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), CrazyOnesError> {
    let parent = path.parent().ok_or_else(|| {
        CrazyOnesError::Internal(format!("no parent directory for {}", path.display()))
    })?;
    std::fs::create_dir_all(parent).map_err(CrazyOnesError::storage)?;

    let tmp = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name().and_then(|s| s.to_str()).unwrap_or("file"),
        std::process::id()
    ));

    let mut body = serde_json::to_vec_pretty(value).map_err(|e| CrazyOnesError::Storage {
        source: Box::new(e),
    })?;
    body.push(b'\n');

    {
        let mut file = std::fs::File::create(&tmp).map_err(CrazyOnesError::storage)?;
        file.write_all(&body).map_err(CrazyOnesError::storage)?;
        file.sync_all().map_err(CrazyOnesError::storage)?;
    }

    std::fs::rename(&tmp, path).map_err(CrazyOnesError::storage)?;
    if let Ok(dir) = std::fs::File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}

/// Reads and deserializes a JSON document.
///
/// Returns `Ok(None)` when the file does not exist. A document that exists
/// but fails to parse is a storage error; callers that poll (the trigger
/// watcher) map this to "not ready, retry".
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CrazyOnesError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(CrazyOnesError::storage(e)),
    };
    let value = serde_json::from_str(&raw).map_err(|e| CrazyOnesError::Storage {
        source: Box::new(e),
    })?;
    Ok(Some(value))
}

/// Reads a JSON document, substituting `T::default()` when the file is
/// missing.
pub fn read_json_or_default<T: DeserializeOwned + Default>(
    path: &Path,
) -> Result<T, CrazyOnesError> {
    Ok(read_json(path)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn round_trips_a_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut value = BTreeMap::new();
        value.insert("en-us".to_string(), "https://example.test/en-us".to_string());
        write_json_atomic(&path, &value).unwrap();

        let back: BTreeMap<String, String> = read_json(&path).unwrap().unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let value: Option<BTreeMap<String, String>> = read_json(&path).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("torn.json");
        std::fs::write(&path, "{\"en-us\": [1, 2").unwrap();
        assert!(read_json::<BTreeMap<String, Vec<u64>>>(&path).is_err());
    }

    #[test]
    fn no_temp_file_remains_after_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        write_json_atomic(&path, &vec![1u64, 2, 3]).unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["store.json".to_string()]);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updates").join("en-us.json");
        write_json_atomic(&path, &Vec::<u64>::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn read_or_default_on_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let value: BTreeMap<String, Vec<u64>> = read_json_or_default(&path).unwrap();
        assert!(value.is_empty());
    }
}
