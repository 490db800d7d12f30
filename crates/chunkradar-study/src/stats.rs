//! Stats Recorder — per-day correct/wrong counts over a sliding window.

use chrono::NaiveDate;

use chunkradar_core::time::format_date;
use chunkradar_store::DayStat;

/// Maximum number of days kept.
pub const STATS_WINDOW: usize = 30;

/// Add answer counts to today's entry, creating it if needed, then trim the
/// history to the most recent `STATS_WINDOW` entries. Returns today's entry.
pub fn record_answers(stats: &mut Vec<DayStat>, today: NaiveDate, correct: u32, wrong: u32) -> DayStat {
    let date = format_date(today);

    let entry = match stats.iter().position(|s| s.date == date) {
        Some(idx) => &mut stats[idx],
        None => {
            stats.push(DayStat {
                date,
                correct: 0,
                wrong: 0,
                total: 0,
            });
            let last = stats.len() - 1;
            &mut stats[last]
        }
    };
    // Counts come straight from request bodies; clamp instead of overflowing.
    entry.correct = entry.correct.saturating_add(correct);
    entry.wrong = entry.wrong.saturating_add(wrong);
    entry.total = entry.correct.saturating_add(entry.wrong);
    let recorded = entry.clone();

    if stats.len() > STATS_WINDOW {
        let excess = stats.len() - STATS_WINDOW;
        stats.drain(..excess);
    }

    recorded
}

/// Today's total answer count, 0 when nothing was recorded.
pub fn today_total(stats: &[DayStat], today: NaiveDate) -> u32 {
    let date = format_date(today);
    stats
        .iter()
        .find(|s| s.date == date)
        .map(|s| s.total)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkradar_core::time::{add_days, parse_date};

    #[test]
    fn test_same_day_accumulates() {
        let today = parse_date("2024-06-01").unwrap();
        let mut stats = Vec::new();

        record_answers(&mut stats, today, 1, 0);
        let entry = record_answers(&mut stats, today, 1, 0);

        assert_eq!(stats.len(), 1);
        assert_eq!(entry.correct, 2);
        assert_eq!(entry.total, 2);
    }

    #[test]
    fn test_total_is_recomputed() {
        let today = parse_date("2024-06-01").unwrap();
        let mut stats = vec![DayStat {
            date: "2024-06-01".into(),
            correct: 2,
            wrong: 1,
            total: 99,
        }];

        let entry = record_answers(&mut stats, today, 0, 1);
        assert_eq!(entry.wrong, 2);
        assert_eq!(entry.total, 4);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let today = parse_date("2024-06-01").unwrap();
        let mut stats = Vec::new();

        let entry = record_answers(&mut stats, today, u32::MAX, 1);
        assert_eq!(entry.correct, u32::MAX);
        assert_eq!(entry.wrong, 1);
        assert_eq!(entry.total, u32::MAX);

        let entry = record_answers(&mut stats, today, 5, 0);
        assert_eq!(entry.correct, u32::MAX);
        assert_eq!(entry.total, u32::MAX);
    }

    #[test]
    fn test_window_is_capped() {
        let start = parse_date("2024-01-01").unwrap();
        let mut stats = Vec::new();

        for i in 0..45 {
            record_answers(&mut stats, add_days(start, i), 1, 1);
            assert!(stats.len() <= STATS_WINDOW);
        }

        assert_eq!(stats.len(), STATS_WINDOW);
        assert_eq!(stats[0].date, "2024-01-16");
        assert_eq!(stats[STATS_WINDOW - 1].date, "2024-02-14");
    }

    #[test]
    fn test_today_total() {
        let today = parse_date("2024-06-01").unwrap();
        let mut stats = Vec::new();
        assert_eq!(today_total(&stats, today), 0);
        record_answers(&mut stats, today, 3, 2);
        assert_eq!(today_total(&stats, today), 5);
    }
}
