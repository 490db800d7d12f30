//! One-time migration from the legacy layout.
//!
//! Early installs kept `metadata.json` as a bare array of groups and the
//! daily stats in a standalone `stats.json`. The unified document wraps the
//! groups under `groups`, absorbs the stats under `stats`, and the old stats
//! file is kept as `stats.json.bak`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use chunkradar_core::{DataPaths, Result};

use crate::json::{read_json_opt, write_json};
use crate::types::{DayStat, Group, Metadata};

/// What is currently on disk at the metadata path.
#[derive(Debug)]
pub enum MetadataShape {
    Missing,
    Legacy(Vec<Group>),
    Current(Metadata),
    Malformed(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetadata {
    Legacy(Vec<Group>),
    Current(Metadata),
}

/// Result of a migration run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub migrated: bool,
    pub legacy_groups: usize,
    pub stats_moved: usize,
    pub stats_backup: Option<PathBuf>,
    pub default_group_created: bool,
    pub default_file_created: bool,
    pub warnings: Vec<String>,
}

/// Classify the metadata file without modifying anything.
pub fn inspect(path: &Path) -> MetadataShape {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => return MetadataShape::Missing,
    };
    if data.trim().is_empty() {
        return MetadataShape::Missing;
    }
    match serde_json::from_str::<RawMetadata>(&data) {
        Ok(RawMetadata::Legacy(groups)) => MetadataShape::Legacy(groups),
        Ok(RawMetadata::Current(doc)) => MetadataShape::Current(doc),
        Err(e) => MetadataShape::Malformed(e.to_string()),
    }
}

/// Bring the data directory to the unified layout. A no-op when the
/// metadata document is already unified; a malformed document is left
/// untouched and reported as a warning.
pub fn migrate(paths: &DataPaths) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();

    let groups = match inspect(&paths.metadata_file) {
        MetadataShape::Current(_) => return Ok(report),
        MetadataShape::Malformed(e) => {
            report.warnings.push(format!(
                "{} is malformed, not migrating: {}",
                paths.metadata_file.display(),
                e
            ));
            return Ok(report);
        }
        MetadataShape::Missing => Vec::new(),
        MetadataShape::Legacy(groups) => {
            report.legacy_groups = groups.len();
            groups
        }
    };

    let legacy_stats_present = paths.stats_file.exists();
    let stats: Vec<DayStat> = if legacy_stats_present {
        read_json_opt(&paths.stats_file).unwrap_or_else(|| {
            report
                .warnings
                .push(format!("{} could not be read, stats reset", paths.stats_file.display()));
            Vec::new()
        })
    } else {
        Vec::new()
    };
    report.stats_moved = stats.len();

    let mut doc = Metadata {
        groups,
        stats,
        ..Default::default()
    };
    if !doc.has_default_group() {
        doc.groups.insert(0, Group::default_group());
        report.default_group_created = true;
    }

    write_json(&paths.metadata_file, &doc)?;

    if !paths.default_chunks_file.exists() {
        write_json(&paths.default_chunks_file, &Vec::<serde_json::Value>::new())?;
        report.default_file_created = true;
    }

    if legacy_stats_present {
        let backup = backup_path(&paths.stats_file);
        match std::fs::rename(&paths.stats_file, &backup) {
            Ok(()) => report.stats_backup = Some(backup),
            Err(e) => {
                warn!("Failed to back up {}: {}", paths.stats_file.display(), e);
                report.warnings.push(format!("stats backup failed: {}", e));
            }
        }
    }

    report.migrated = true;
    info!(
        "Migrated metadata: {} groups, {} stats entries",
        doc.groups.len(),
        report.stats_moved
    );
    Ok(report)
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}
