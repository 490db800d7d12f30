//! Chunk Radar Core — error type, configuration and calendar helpers.

pub mod config;
pub mod error;
pub mod time;

pub use config::{ChunkRadarConfig, DataPaths};
pub use error::{Error, Result};
