//! Session Controller — one study pass over a group's chunks.
//!
//! `Loading → InSession → Finished`, re-entered on group change or restart.
//! The session never talks to the backend itself: `answer` returns the
//! persistence effects the caller must issue.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use chunkradar_store::{Chunk, ChunkStatus, ConfidenceRecord};

use crate::confidence::{self, needs_review};
use crate::types::*;

/// A card in the session with its local status.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCard {
    pub chunk: Chunk,
    pub status: ChunkStatus,
}

pub struct StudySession {
    group_id: String,
    phase: SessionPhase,
    cards: Vec<SessionCard>,
    index: usize,
    flipped: bool,
    focus: FocusMode,
    confidence: BTreeMap<i64, ConfidenceRecord>,
    card_started: Instant,
}

impl StudySession {
    pub fn new(group_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            phase: SessionPhase::Loading,
            cards: Vec::new(),
            index: 0,
            flipped: false,
            focus: FocusMode::All,
            confidence: BTreeMap::new(),
            card_started: Instant::now(),
        }
    }

    // ---------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------

    /// Populate the session from freshly fetched data. Chunks are shuffled;
    /// statuses come from persisted progress, defaulting to unreviewed.
    pub fn load<R: Rng + ?Sized>(
        &mut self,
        chunks: Vec<Chunk>,
        progress: &BTreeMap<i64, ChunkStatus>,
        confidence: BTreeMap<i64, ConfidenceRecord>,
        rng: &mut R,
    ) {
        let mut chunks = chunks;
        chunks.shuffle(rng);

        self.cards = chunks
            .into_iter()
            .map(|chunk| SessionCard {
                status: progress
                    .get(&chunk.id)
                    .copied()
                    .unwrap_or(ChunkStatus::Unreviewed),
                chunk,
            })
            .collect();
        self.confidence = confidence;
        self.index = 0;
        self.flipped = false;
        self.card_started = Instant::now();
        self.phase = if self.cards.is_empty() {
            SessionPhase::Finished
        } else {
            SessionPhase::InSession
        };
        self.align_to_focus();

        debug!(
            "Loaded session for {}: {} cards",
            self.group_id,
            self.cards.len()
        );
    }

    /// Switch to another group. The caller must `load` it afterwards.
    pub fn select_group(&mut self, group_id: &str) {
        self.group_id = group_id.to_string();
        self.restart();
    }

    /// Back to `Loading`; the caller must `load` again.
    pub fn restart(&mut self) {
        self.phase = SessionPhase::Loading;
        self.cards.clear();
        self.index = 0;
        self.flipped = false;
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn cards(&self) -> &[SessionCard] {
        &self.cards
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn focus(&self) -> FocusMode {
        self.focus
    }

    pub fn current(&self) -> Option<&SessionCard> {
        match self.phase {
            SessionPhase::InSession => self.cards.get(self.index),
            _ => None,
        }
    }

    /// Time spent on the current card.
    pub fn card_elapsed(&self) -> Duration {
        self.card_started.elapsed()
    }

    pub fn summary(&self) -> SessionSummary {
        let mut summary = SessionSummary {
            total: self.cards.len(),
            ..Default::default()
        };
        for card in &self.cards {
            match card.status {
                ChunkStatus::Correct => summary.correct += 1,
                ChunkStatus::Wrong => summary.wrong += 1,
                ChunkStatus::Skipped => summary.skipped += 1,
                ChunkStatus::Unreviewed => summary.unreviewed += 1,
            }
        }
        summary
    }

    // ---------------------------------------------------------------
    // Focus & navigation
    // ---------------------------------------------------------------

    fn is_navigable(&self, card: &SessionCard) -> bool {
        match self.focus {
            FocusMode::All => true,
            FocusMode::Wrong => card.status == ChunkStatus::Wrong,
            FocusMode::Skipped => card.status == ChunkStatus::Skipped,
            FocusMode::Review => {
                needs_review(self.confidence.get(&card.chunk.id))
                    || matches!(card.status, ChunkStatus::Wrong | ChunkStatus::Skipped)
            }
        }
    }

    /// Indices of the cards reachable under the current focus, in session order.
    pub fn navigable_indices(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| self.is_navigable(card))
            .map(|(i, _)| i)
            .collect()
    }

    /// Change the focus filter. Session order is unchanged; the current
    /// index moves to the first navigable card at or after it.
    pub fn set_focus(&mut self, focus: FocusMode) {
        self.focus = focus;
        self.align_to_focus();
    }

    fn align_to_focus(&mut self) {
        let navigable = self.navigable_indices();
        let target = navigable
            .iter()
            .copied()
            .find(|&i| i >= self.index)
            .or_else(|| navigable.first().copied());
        if let Some(i) = target {
            self.move_to(i);
        }
    }

    fn move_to(&mut self, index: usize) {
        if index != self.index {
            self.index = index;
            self.flipped = false;
            self.card_started = Instant::now();
        }
    }

    /// Move to the next navigable card. Returns false at the end.
    pub fn next(&mut self) -> bool {
        match self.navigable_indices().into_iter().find(|&i| i > self.index) {
            Some(i) => {
                self.move_to(i);
                true
            }
            None => false,
        }
    }

    /// Move to the previous navigable card. Returns false at the start.
    pub fn previous(&mut self) -> bool {
        match self
            .navigable_indices()
            .into_iter()
            .rev()
            .find(|&i| i < self.index)
        {
            Some(i) => {
                self.move_to(i);
                true
            }
            None => false,
        }
    }

    pub fn flip(&mut self) {
        if self.phase == SessionPhase::InSession {
            self.flipped = !self.flipped;
        }
    }

    // ---------------------------------------------------------------
    // Answering
    // ---------------------------------------------------------------

    /// Record an answer for the current card and advance.
    pub fn answer(&mut self, status: ChunkStatus, today: NaiveDate) -> Result<Vec<SessionEffect>, SessionError> {
        if status == ChunkStatus::Unreviewed {
            return Err(SessionError::InvalidAnswer);
        }
        if self.phase != SessionPhase::InSession || self.index >= self.cards.len() {
            return Err(SessionError::NotInSession);
        }

        let chunk_id = self.cards[self.index].chunk.id;
        self.cards[self.index].status = status;
        debug!(
            "Answered chunk {} as {:?} after {:?}",
            chunk_id,
            status,
            self.card_elapsed()
        );

        let mut effects = vec![SessionEffect::SaveProgress {
            group_id: self.group_id.clone(),
            chunk_id,
            status,
        }];

        let is_correct = match status {
            ChunkStatus::Correct => Some(true),
            ChunkStatus::Wrong => Some(false),
            _ => None,
        };
        if let Some(is_correct) = is_correct {
            let record = confidence::next_record(self.confidence.get(&chunk_id), is_correct, today);
            self.confidence.insert(chunk_id, record);

            effects.push(SessionEffect::UpdateConfidence {
                group_id: self.group_id.clone(),
                chunk_id,
                is_correct,
            });
            effects.push(SessionEffect::RecordStats {
                correct: u32::from(is_correct),
                wrong: u32::from(!is_correct),
            });
        }
        effects.push(SessionEffect::RefreshStreak);

        if !self.next() {
            self.phase = SessionPhase::Finished;
            self.flipped = false;
        }
        Ok(effects)
    }
}
