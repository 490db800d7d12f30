//! Shared application state.

use std::sync::Arc;

use chunkradar_core::ChunkRadarConfig;
use chunkradar_store::{Catalog, ChunkFileStore, JsonMetadataStore, MetadataStore, StoryStore};

/// Shared application state accessible from all route handlers.
///
/// Handlers perform an unlocked read-modify-write over the JSON documents;
/// concurrent requests touching the same document race, last write wins.
pub struct AppState {
    pub config: ChunkRadarConfig,
    pub metadata: Arc<dyn MetadataStore>,
    pub catalog: Catalog,
    pub stories: StoryStore,
}

impl AppState {
    pub fn new(config: ChunkRadarConfig) -> Self {
        let metadata = Arc::new(JsonMetadataStore::new(config.data_paths.clone()));
        Self::with_metadata_store(config, metadata)
    }

    /// Build state around a custom metadata store.
    pub fn with_metadata_store(config: ChunkRadarConfig, metadata: Arc<dyn MetadataStore>) -> Self {
        let files = ChunkFileStore::new(&config.data_paths.root);
        let catalog = Catalog::new(metadata.clone(), files);
        let stories = StoryStore::new(&config.data_paths.stories_file);

        Self {
            config,
            metadata,
            catalog,
            stories,
        }
    }
}
