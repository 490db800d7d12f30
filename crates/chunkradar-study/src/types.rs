//! Study types shared with the HTTP layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use chunkradar_store::ChunkStatus;

/// Streak summary returned by `GET /api/streak`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub today_count: u32,
    pub daily_goal: u32,
    pub goal_reached: bool,
}

/// Client-side filter narrowing which cards are navigable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusMode {
    #[default]
    All,
    Wrong,
    Skipped,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    Loading,
    InSession,
    Finished,
}

/// Persistence call the caller must issue after an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    SaveProgress {
        group_id: String,
        chunk_id: i64,
        status: ChunkStatus,
    },
    UpdateConfidence {
        group_id: String,
        chunk_id: i64,
        is_correct: bool,
    },
    RecordStats {
        correct: u32,
        wrong: u32,
    },
    RefreshStreak,
}

/// Per-status card counts for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    pub skipped: usize,
    pub unreviewed: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No study session in progress")]
    NotInSession,

    #[error("Cards can only be answered correct, wrong or skipped")]
    InvalidAnswer,
}
