//! Confidence Updater — per-chunk spaced-repetition level and next review.

use chrono::NaiveDate;

use chunkradar_core::time::{add_days, format_date};
use chunkradar_store::{ConfidenceRecord, Metadata};

pub const MAX_LEVEL: u8 = 5;
/// Days until the next review, indexed by the level the chunk had before a
/// correct answer.
pub const REVIEW_INTERVALS_DAYS: [u64; 6] = [1, 2, 4, 7, 14, 30];
/// Levels lost on a wrong answer.
pub const WRONG_PENALTY: u8 = 2;
/// Chunks below this level are considered in need of review.
pub const REVIEW_THRESHOLD: u8 = 3;

/// Next confidence record after an explicit correct/wrong answer.
pub fn next_record(current: Option<&ConfidenceRecord>, is_correct: bool, today: NaiveDate) -> ConfidenceRecord {
    let previous = current.map(|r| r.level.min(MAX_LEVEL)).unwrap_or(0);

    let (level, offset) = if is_correct {
        let offset = REVIEW_INTERVALS_DAYS[usize::from(previous)];
        ((previous + 1).min(MAX_LEVEL), offset)
    } else {
        (previous.saturating_sub(WRONG_PENALTY), 1)
    };

    ConfidenceRecord {
        level,
        next_review: Some(format_date(add_days(today, offset))),
        last_reviewed: Some(format_date(today)),
    }
}

/// Apply an answer to `confidence[group_id][chunk_id]` and return the new record.
pub fn apply_answer(
    doc: &mut Metadata,
    group_id: &str,
    chunk_id: i64,
    is_correct: bool,
    today: NaiveDate,
) -> ConfidenceRecord {
    let group = doc.confidence.entry(group_id.to_string()).or_default();
    let record = next_record(group.get(&chunk_id), is_correct, today);
    group.insert(chunk_id, record.clone());
    record
}

pub fn needs_review(record: Option<&ConfidenceRecord>) -> bool {
    record.map(|r| r.level).unwrap_or(0) < REVIEW_THRESHOLD
}
