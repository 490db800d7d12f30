//! Whole-file JSON helpers shared by every store.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use chunkradar_core::Result;

/// Read a JSON document, falling back to `T::default()` when the file is
/// missing, empty or malformed.
pub fn read_json<T: DeserializeOwned + Default>(path: &Path) -> T {
    read_json_opt(path).unwrap_or_default()
}

/// Read a JSON document. `None` when missing, empty or malformed.
pub fn read_json_opt<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let data = std::fs::read_to_string(path).ok()?;
    if data.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(&data) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Error reading {}: {}", path.display(), e);
            None
        }
    }
}

/// Serialize `value` and overwrite `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_string_pretty(value)?;
    std::fs::write(path, data)?;
    Ok(())
}
