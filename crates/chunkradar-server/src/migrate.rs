//! Data directory validation and legacy-layout migration for the CLI.

use std::path::Path;

use tracing::{error, info};

use chunkradar_core::DataPaths;
use chunkradar_store::json::read_json;
use chunkradar_store::migrate::{self, MetadataShape};
use chunkradar_store::{ChunkFileStore, Story};

/// Result of a validation or migration run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub layout_valid: bool,
    pub legacy_layout: bool,
    pub migrated: bool,
    pub groups: usize,
    pub chunks: usize,
    pub stats_entries: usize,
    pub stories: usize,
    pub longest_streak: u32,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Inspect a data directory without modifying it.
pub fn validate(data_dir: &Path) -> MigrationReport {
    let mut report = MigrationReport::default();

    if !data_dir.is_dir() {
        report
            .errors
            .push(format!("Data directory not found: {}", data_dir.display()));
        return report;
    }
    let paths = DataPaths::at(data_dir);

    let doc = match migrate::inspect(&paths.metadata_file) {
        MetadataShape::Current(doc) => doc,
        MetadataShape::Legacy(groups) => {
            report.legacy_layout = true;
            report.groups = groups.len();
            report
                .warnings
                .push("Legacy metadata layout, run `chunkradar migrate`".into());
            return report;
        }
        MetadataShape::Missing => {
            report.errors.push(format!(
                "Metadata not found: {}",
                paths.metadata_file.display()
            ));
            return report;
        }
        MetadataShape::Malformed(e) => {
            report.errors.push(format!(
                "Malformed metadata {}: {}",
                paths.metadata_file.display(),
                e
            ));
            return report;
        }
    };

    let files = ChunkFileStore::new(&paths.root);
    for group in &doc.groups {
        if !files.file_exists(group) {
            report.errors.push(format!(
                "Group {} is missing its file {}",
                group.id, group.file
            ));
            continue;
        }
        report.chunks += files.read_chunks(group).len();
    }

    if !doc.has_default_group() {
        report
            .warnings
            .push("Default group has been removed from metadata".into());
    }
    if paths.stats_file.exists() {
        report.warnings.push(format!(
            "Stale legacy stats file still present: {}",
            paths.stats_file.display()
        ));
    }

    report.groups = doc.groups.len();
    report.stats_entries = doc.stats.len();
    report.longest_streak = doc.longest_streak;
    report.stories = read_json::<Vec<Story>>(&paths.stories_file).len();
    report.layout_valid = report.errors.is_empty();
    report
}

/// Migrate a data directory to the unified layout, then validate it.
pub fn run_migration(data_dir: &Path) -> MigrationReport {
    let paths = match DataPaths::new(data_dir) {
        Ok(p) => p,
        Err(e) => {
            return MigrationReport {
                errors: vec![format!("Cannot create {}: {}", data_dir.display(), e)],
                ..Default::default()
            }
        }
    };

    let outcome = migrate::migrate(&paths);
    let mut report = validate(data_dir);
    match outcome {
        Ok(m) => {
            report.migrated = m.migrated;
            report.warnings.extend(m.warnings);
            if let Some(backup) = m.stats_backup {
                info!("Legacy stats kept at {}", backup.display());
            }
        }
        Err(e) => {
            error!("Migration failed: {}", e);
            report.errors.push(format!("Migration failed: {}", e));
            report.layout_valid = false;
        }
    }
    report
}

pub fn print_report(report: &MigrationReport) {
    println!("Chunk Radar data report");
    println!("  layout valid:   {}", report.layout_valid);
    if report.legacy_layout {
        println!("  legacy layout:  yes");
    }
    if report.migrated {
        println!("  migrated:       yes");
    }
    println!("  groups:         {}", report.groups);
    println!("  chunks:         {}", report.chunks);
    println!("  stats entries:  {}", report.stats_entries);
    println!("  stories:        {}", report.stories);
    println!("  longest streak: {}", report.longest_streak);
    for w in &report.warnings {
        println!("  warning: {}", w);
    }
    for e in &report.errors {
        println!("  error: {}", e);
    }
}
