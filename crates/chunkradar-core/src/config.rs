//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default HTTP port, matching the frontend's `API_BASE`.
pub const DEFAULT_PORT: u16 = 3001;

pub const METADATA_FILE: &str = "metadata.json";
pub const LEGACY_STATS_FILE: &str = "stats.json";
pub const LEGACY_STATS_BACKUP: &str = "stats.json.bak";
pub const STORIES_FILE: &str = "stories.json";
pub const DEFAULT_CHUNKS_FILE: &str = "chunks.json";

/// File names in the data directory that no user group may use as its
/// chunk file.
pub const RESERVED_FILE_NAMES: [&str; 5] = [
    METADATA_FILE,
    LEGACY_STATS_FILE,
    LEGACY_STATS_BACKUP,
    STORIES_FILE,
    DEFAULT_CHUNKS_FILE,
];

/// Paths to all Chunk Radar data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`). Group chunk files live here too.
    pub root: PathBuf,
    /// Unified metadata document (`data/metadata.json`).
    pub metadata_file: PathBuf,
    /// Legacy standalone stats document (`data/stats.json`).
    pub stats_file: PathBuf,
    /// Story collection (`data/stories.json`).
    pub stories_file: PathBuf,
    /// Backing file of the reserved default group (`data/chunks.json`).
    pub default_chunks_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let paths = Self::at(root);
        std::fs::create_dir_all(&paths.root)?;
        Ok(paths)
    }

    /// Build the path layout without touching the filesystem.
    pub fn at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            metadata_file: root.join(METADATA_FILE),
            stats_file: root.join(LEGACY_STATS_FILE),
            stories_file: root.join(STORIES_FILE),
            default_chunks_file: root.join(DEFAULT_CHUNKS_FILE),
            root,
        }
    }
}

/// Top-level Chunk Radar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRadarConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
}

impl ChunkRadarConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self { port, data_paths })
    }
}
