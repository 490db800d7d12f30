//! Group/Chunk File Store — one JSON array of chunks per group.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use chunkradar_core::Result;

use crate::json::{read_json, write_json};
use crate::types::{Chunk, Group};

/// Reads and writes group chunk files under the data directory.
#[derive(Debug, Clone)]
pub struct ChunkFileStore {
    root: PathBuf,
}

impl ChunkFileStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn path_for(&self, group: &Group) -> PathBuf {
        self.root.join(&group.file)
    }

    /// Chunks of a group. Missing or malformed files read as empty.
    pub fn read_chunks(&self, group: &Group) -> Vec<Chunk> {
        read_json(&self.path_for(group))
    }

    pub fn write_chunks(&self, group: &Group, chunks: &[Chunk]) -> Result<()> {
        write_json(&self.path_for(group), chunks)
    }

    /// Create the group's file holding an empty array.
    pub fn create_file(&self, group: &Group) -> Result<()> {
        self.write_chunks(group, &[])
    }

    /// Create the group's file only if it does not exist yet.
    pub fn ensure_file(&self, group: &Group) -> Result<()> {
        if self.path_for(group).exists() {
            return Ok(());
        }
        self.create_file(group)
    }

    /// Remove the group's file. The default group's file is never removed.
    /// Returns true if a file was deleted.
    pub fn remove_file(&self, group: &Group) -> bool {
        if !group.owns_removable_file() {
            info!("Keeping protected file {} for group {}", group.file, group.id);
            return false;
        }
        let path = self.path_for(group);
        if !path.exists() {
            return false;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to delete group file {}: {}", path.display(), e);
                false
            }
        }
    }

    pub fn file_exists(&self, group: &Group) -> bool {
        self.path_for(group).exists()
    }
}
