//! Per-group chunk status bookkeeping.

use std::collections::BTreeMap;

use chunkradar_store::{ChunkStatus, Metadata};

pub fn set_status(doc: &mut Metadata, group_id: &str, chunk_id: i64, status: ChunkStatus) {
    doc.progress
        .entry(group_id.to_string())
        .or_default()
        .insert(chunk_id, status);
}

/// Clear a group's status map. Confidence data is left alone.
pub fn reset_group(doc: &mut Metadata, group_id: &str) {
    doc.progress.insert(group_id.to_string(), BTreeMap::new());
}

pub fn group_progress(doc: &Metadata, group_id: &str) -> BTreeMap<i64, ChunkStatus> {
    doc.progress.get(group_id).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::apply_answer;
    use chunkradar_core::time::parse_date;

    #[test]
    fn test_set_and_overwrite() {
        let mut doc = Metadata::default();
        set_status(&mut doc, "default", 1, ChunkStatus::Wrong);
        set_status(&mut doc, "default", 1, ChunkStatus::Correct);
        set_status(&mut doc, "default", 2, ChunkStatus::Skipped);

        let progress = group_progress(&doc, "default");
        assert_eq!(progress.len(), 2);
        assert_eq!(progress[&1], ChunkStatus::Correct);
        assert!(group_progress(&doc, "other").is_empty());
    }

    #[test]
    fn test_reset_keeps_confidence() {
        let today = parse_date("2024-06-01").unwrap();
        let mut doc = Metadata::default();
        set_status(&mut doc, "default", 1, ChunkStatus::Correct);
        apply_answer(&mut doc, "default", 1, true, today);

        reset_group(&mut doc, "default");

        assert!(doc.progress["default"].is_empty());
        assert_eq!(doc.confidence["default"][&1].level, 1);
    }

    #[test]
    fn test_reset_unknown_group_creates_empty_map() {
        let mut doc = Metadata::default();
        reset_group(&mut doc, "fresh");
        assert!(doc.progress.contains_key("fresh"));
    }
}
