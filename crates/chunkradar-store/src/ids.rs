//! Integer id allocation for chunks and stories.
//!
//! Ids are creation timestamps in milliseconds, bumped past the largest
//! existing id so rapid inserts into one collection never collide.

/// Next id for a collection holding `existing` ids, given the current time.
pub fn next_id(existing: impl IntoIterator<Item = i64>, now_ms: i64) -> i64 {
    match existing.into_iter().max() {
        Some(max) if max >= now_ms => max + 1,
        _ => now_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_timestamp_when_free() {
        assert_eq!(next_id(Vec::new(), 1_000), 1_000);
        assert_eq!(next_id(vec![10, 20], 1_000), 1_000);
    }

    #[test]
    fn test_same_millisecond_bumps() {
        assert_eq!(next_id(vec![1_000], 1_000), 1_001);
        assert_eq!(next_id(vec![1_000, 1_001], 1_000), 1_002);
    }
}
