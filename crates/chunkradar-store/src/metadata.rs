//! Metadata Store — groups, stats, progress, confidence, settings and the
//! longest streak, kept in one document.

use parking_lot::Mutex;
use tracing::{error, warn};

use chunkradar_core::{DataPaths, Error, Result};

use crate::migrate::{self, MetadataShape};
use crate::types::Metadata;
use crate::json::write_json;

/// Read-modify-write access to the metadata document.
///
/// `load` never fails: a missing or unreadable document yields defaults.
/// `save` replaces the whole document.
pub trait MetadataStore: Send + Sync {
    fn load(&self) -> Metadata;
    fn save(&self, doc: &Metadata) -> Result<()>;
}

/// Metadata persisted as `metadata.json` in the data directory.
pub struct JsonMetadataStore {
    paths: DataPaths,
}

impl JsonMetadataStore {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }
}

impl MetadataStore for JsonMetadataStore {
    fn load(&self) -> Metadata {
        match migrate::inspect(&self.paths.metadata_file) {
            MetadataShape::Current(doc) => doc,
            MetadataShape::Malformed(e) => {
                warn!(
                    "Error reading {}: {}",
                    self.paths.metadata_file.display(),
                    e
                );
                Metadata::default()
            }
            MetadataShape::Missing | MetadataShape::Legacy(_) => {
                if let Err(e) = migrate::migrate(&self.paths) {
                    error!("Metadata migration failed: {}", e);
                }
                match migrate::inspect(&self.paths.metadata_file) {
                    MetadataShape::Current(doc) => doc,
                    _ => Metadata::default(),
                }
            }
        }
    }

    fn save(&self, doc: &Metadata) -> Result<()> {
        write_json(&self.paths.metadata_file, doc)
    }
}

/// In-process metadata store, used by tests and tooling.
#[derive(Default)]
pub struct MemoryMetadataStore {
    doc: Mutex<Metadata>,
    read_only: Mutex<bool>,
}

impl MemoryMetadataStore {
    pub fn new(doc: Metadata) -> Self {
        Self {
            doc: Mutex::new(doc),
            read_only: Mutex::new(false),
        }
    }

    /// Make every subsequent `save` fail.
    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.lock() = read_only;
    }
}

impl MetadataStore for MemoryMetadataStore {
    fn load(&self) -> Metadata {
        self.doc.lock().clone()
    }

    fn save(&self, doc: &Metadata) -> Result<()> {
        if *self.read_only.lock() {
            return Err(Error::Storage("metadata store is read-only".into()));
        }
        *self.doc.lock() = doc.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DayStat, Group};

    #[test]
    fn test_first_load_bootstraps() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path()).unwrap();
        let store = JsonMetadataStore::new(paths.clone());

        let doc = store.load();
        assert_eq!(doc.groups, vec![Group::default_group()]);
        assert!(paths.metadata_file.exists());
        assert!(paths.default_chunks_file.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path()).unwrap();
        let store = JsonMetadataStore::new(paths.clone());

        let mut doc = store.load();
        doc.stats.push(DayStat {
            date: "2024-05-01".into(),
            correct: 1,
            wrong: 0,
            total: 1,
        });
        doc.longest_streak = 3;
        store.save(&doc).unwrap();

        let reloaded = JsonMetadataStore::new(paths).load();
        assert_eq!(reloaded, doc);
    }

    #[test]
    fn test_malformed_reads_default() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path()).unwrap();
        std::fs::write(&paths.metadata_file, "{{{").unwrap();

        let doc = JsonMetadataStore::new(paths).load();
        assert_eq!(doc, Metadata::default());
    }

    #[test]
    fn test_save_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::at(dir.path().join("does-not-exist"));
        let store = JsonMetadataStore::new(paths);
        assert!(store.save(&Metadata::default()).is_err());
    }

    #[test]
    fn test_memory_store_read_only() {
        let store = MemoryMetadataStore::default();
        store.save(&Metadata::default()).unwrap();
        store.set_read_only(true);
        assert!(store.save(&Metadata::default()).is_err());
    }
}
