// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::SyncError;

/// Reads one UTF-8 JSON file into a parsed value. Unreadable or
/// unparseable input is malformed before validation even starts.
pub fn read_json_file(path: &Path) -> Result<Value, SyncError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| SyncError::MalformedInput(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| SyncError::MalformedInput(format!("{}: {e}", path.display())))
}
