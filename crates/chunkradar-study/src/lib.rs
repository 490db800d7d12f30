//! Study logic — spaced-repetition confidence, streaks, daily stats and the
//! study session state machine.
//!
//! Everything here is pure: functions take the in-memory metadata document
//! and an explicit `today`, and leave persistence to the caller.

pub mod confidence;
pub mod progress;
pub mod session;
pub mod stats;
pub mod streak;
pub mod types;

pub use session::StudySession;
pub use types::*;
