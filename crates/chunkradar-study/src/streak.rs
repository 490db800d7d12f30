//! Streak Calculator — consecutive days meeting the daily goal.
//!
//! Recomputed from the stats history on every read; only the longest streak
//! is persisted.

use chrono::NaiveDate;

use chunkradar_core::time::{format_date, sub_days};
use chunkradar_store::{DayStat, Metadata};

use crate::stats::today_total;
use crate::types::StreakInfo;

/// Number of consecutive qualifying days walking back from the newest entry.
///
/// The walk starts at today, or at yesterday when nothing has been logged
/// today yet. A logged day below the goal or a missing day ends it, so an
/// entry for today that has not reached the goal yields 0.
pub fn current_streak(stats: &[DayStat], daily_goal: u32, today: NaiveDate) -> u32 {
    let mut sorted: Vec<&DayStat> = stats.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let logged_today = sorted.first().is_some_and(|s| s.date == format_date(today));
    let mut expected = if logged_today {
        today
    } else {
        sub_days(today, 1)
    };

    let mut streak = 0;
    for stat in sorted {
        if stat.date != format_date(expected) || stat.total < daily_goal {
            break;
        }
        streak += 1;
        expected = sub_days(expected, 1);
    }
    streak
}

/// Compute the streak summary, raising `longest_streak` when beaten.
/// Returns whether the document changed and must be saved.
pub fn streak_info(doc: &mut Metadata, today: NaiveDate) -> (StreakInfo, bool) {
    let daily_goal = doc.settings.daily_goal;
    let current = current_streak(&doc.stats, daily_goal, today);

    let changed = current > doc.longest_streak;
    if changed {
        doc.longest_streak = current;
    }

    let today_count = today_total(&doc.stats, today);
    let info = StreakInfo {
        current_streak: current,
        longest_streak: doc.longest_streak,
        today_count,
        daily_goal,
        goal_reached: today_count >= daily_goal,
    };
    (info, changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkradar_core::time::parse_date;

    fn stat(date: &str, total: u32) -> DayStat {
        DayStat {
            date: date.into(),
            correct: total,
            wrong: 0,
            total,
        }
    }

    fn today() -> NaiveDate {
        parse_date("2024-06-10").unwrap()
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(current_streak(&[], 20, today()), 0);
    }

    #[test]
    fn test_today_and_yesterday() {
        let stats = vec![stat("2024-06-09", 20), stat("2024-06-10", 25)];
        assert_eq!(current_streak(&stats, 20, today()), 2);
    }

    #[test]
    fn test_gap_breaks_streak() {
        let stats = vec![
            stat("2024-06-10", 25),
            stat("2024-06-09", 20),
            stat("2024-06-07", 30),
            stat("2024-06-06", 30),
        ];
        assert_eq!(current_streak(&stats, 20, today()), 2);
    }

    #[test]
    fn test_below_goal_breaks_streak() {
        let stats = vec![
            stat("2024-06-10", 25),
            stat("2024-06-09", 19),
            stat("2024-06-08", 30),
        ];
        assert_eq!(current_streak(&stats, 20, today()), 1);
    }

    #[test]
    fn test_alive_before_studying_today() {
        let stats = vec![stat("2024-06-09", 20), stat("2024-06-08", 20)];
        assert_eq!(current_streak(&stats, 20, today()), 2);
    }

    #[test]
    fn test_today_below_goal_ends_streak() {
        let stats = vec![
            stat("2024-06-10", 5),
            stat("2024-06-09", 20),
            stat("2024-06-08", 20),
        ];
        assert_eq!(current_streak(&stats, 20, today()), 0);
    }

    #[test]
    fn test_last_study_two_days_ago() {
        let stats = vec![stat("2024-06-08", 40)];
        assert_eq!(current_streak(&stats, 20, today()), 0);
    }

    #[test]
    fn test_info_updates_longest() {
        let mut doc = Metadata::default();
        doc.stats = vec![stat("2024-06-09", 20), stat("2024-06-08", 20)];
        doc.longest_streak = 1;

        let (info, changed) = streak_info(&mut doc, today());
        assert!(changed);
        assert_eq!(info.current_streak, 2);
        assert_eq!(info.longest_streak, 2);
        assert_eq!(info.today_count, 0);
        assert_eq!(info.daily_goal, 20);
        assert!(!info.goal_reached);
        assert_eq!(doc.longest_streak, 2);
    }

    #[test]
    fn test_info_partial_today() {
        let mut doc = Metadata::default();
        doc.stats = vec![stat("2024-06-09", 20), stat("2024-06-10", 7)];
        doc.longest_streak = 0;

        let (info, changed) = streak_info(&mut doc, today());
        assert!(!changed);
        assert_eq!(info.current_streak, 0);
        assert_eq!(info.today_count, 7);
        assert!(!info.goal_reached);
    }

    #[test]
    fn test_info_keeps_higher_longest() {
        let mut doc = Metadata::default();
        doc.settings.daily_goal = 10;
        doc.stats = vec![stat("2024-06-10", 10)];
        doc.longest_streak = 12;

        let (info, changed) = streak_info(&mut doc, today());
        assert!(!changed);
        assert_eq!(info.current_streak, 1);
        assert_eq!(info.longest_streak, 12);
        assert!(info.goal_reached);
    }
}
