//! Chunk Radar Store — JSON-file persistence for groups, chunks, study
//! metadata and stories.
//!
//! Every document is read whole, mutated in memory and rewritten whole.
//! There is no locking: the backend assumes a single local writer.

pub mod catalog;
pub mod chunks;
pub mod ids;
pub mod json;
pub mod metadata;
pub mod migrate;
pub mod slug;
pub mod stories;
pub mod types;

pub use catalog::Catalog;
pub use chunks::ChunkFileStore;
pub use metadata::{JsonMetadataStore, MemoryMetadataStore, MetadataStore};
pub use stories::StoryStore;
pub use types::*;
