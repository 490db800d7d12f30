//! Persisted data model — field names match the JSON the frontend reads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Id of the reserved group created on first run.
pub const DEFAULT_GROUP_ID: &str = "default";
/// Display name of the reserved group.
pub const DEFAULT_GROUP_NAME: &str = "Günlük Popüler";
/// Backing file of the reserved group. Never deleted.
pub const DEFAULT_GROUP_FILE: &str = chunkradar_core::config::DEFAULT_CHUNKS_FILE;

pub const DEFAULT_DAILY_GOAL: u32 = 20;
pub const DEFAULT_TTS_SPEED: f64 = 0.85;
pub const DEFAULT_TTS_VOICE: &str = "en-US";

/// A named collection of chunks, backed by one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub file: String,
}

impl Group {
    pub fn default_group() -> Self {
        Self {
            id: DEFAULT_GROUP_ID.into(),
            name: DEFAULT_GROUP_NAME.into(),
            file: DEFAULT_GROUP_FILE.into(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_GROUP_ID
    }

    /// Whether the backing file may be removed when the group is deleted.
    pub fn owns_removable_file(&self) -> bool {
        self.file != DEFAULT_GROUP_FILE
    }
}

/// English phrase flashcard with its Turkish translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: i64,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub turkish: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(
        rename = "exampleTranslations",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub example_translations: Option<Vec<String>>,
    /// Fields this model does not know about, kept so rewrites do not lose them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Chunk fields supplied on creation (`POST /api/chunks`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewChunk {
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub turkish: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(rename = "exampleTranslations", default)]
    pub example_translations: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shallow-merge update for a chunk. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkUpdate {
    pub english: Option<String>,
    pub turkish: Option<String>,
    pub examples: Option<Vec<String>>,
    #[serde(rename = "exampleTranslations")]
    pub example_translations: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keys a client may not set through `extra`.
const RESERVED_CHUNK_KEYS: [&str; 1] = ["id"];

/// Drop keys that would shadow typed chunk fields.
pub(crate) fn strip_reserved(mut extra: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_CHUNK_KEYS {
        extra.remove(key);
    }
    extra
}

impl Chunk {
    pub fn apply_update(&mut self, update: ChunkUpdate) {
        if let Some(english) = update.english {
            self.english = english;
        }
        if let Some(turkish) = update.turkish {
            self.turkish = turkish;
        }
        if let Some(examples) = update.examples {
            self.examples = examples;
        }
        if let Some(translations) = update.example_translations {
            self.example_translations = Some(translations);
        }
        self.extra.extend(strip_reserved(update.extra));
    }
}

/// Answer counts for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStat {
    pub date: String,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub wrong: u32,
    #[serde(default)]
    pub total: u32,
}

/// Per-chunk outcome inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStatus {
    Unreviewed,
    Correct,
    Wrong,
    Skipped,
}

impl ChunkStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unreviewed" => Some(Self::Unreviewed),
            "correct" => Some(Self::Correct),
            "wrong" => Some(Self::Wrong),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }
}

/// Spaced-repetition state of one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceRecord {
    pub level: u8,
    #[serde(default)]
    pub next_review: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<String>,
}

impl Default for ConfidenceRecord {
    fn default() -> Self {
        Self {
            level: 0,
            next_review: None,
            last_reviewed: None,
        }
    }
}

/// groupId → (chunkId → status)
pub type ProgressMap = BTreeMap<String, BTreeMap<i64, ChunkStatus>>;
/// groupId → (chunkId → confidence)
pub type ConfidenceMap = BTreeMap<String, BTreeMap<i64, ConfidenceRecord>>;

/// Global user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
    #[serde(default = "default_tts_speed")]
    pub tts_speed: f64,
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,
}

fn default_daily_goal() -> u32 {
    DEFAULT_DAILY_GOAL
}
fn default_tts_speed() -> f64 {
    DEFAULT_TTS_SPEED
}
fn default_tts_voice() -> String {
    DEFAULT_TTS_VOICE.into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL,
            tts_speed: DEFAULT_TTS_SPEED,
            tts_voice: DEFAULT_TTS_VOICE.into(),
        }
    }
}

/// Partial settings update (`PUT /api/settings`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub daily_goal: Option<u32>,
    pub tts_speed: Option<f64>,
    pub tts_voice: Option<String>,
}

impl Settings {
    /// Apply an update, merging with existing settings.
    pub fn apply_update(&mut self, update: &SettingsUpdate) {
        if let Some(goal) = update.daily_goal {
            self.daily_goal = goal;
        }
        if let Some(speed) = update.tts_speed {
            self.tts_speed = speed;
        }
        if let Some(voice) = &update.tts_voice {
            self.tts_voice = voice.clone();
        }
    }
}

/// The unified metadata document (`metadata.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub stats: Vec<DayStat>,
    #[serde(default)]
    pub progress: ProgressMap,
    #[serde(default)]
    pub confidence: ConfidenceMap,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub longest_streak: u32,
}

impl Metadata {
    pub fn find_group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn has_default_group(&self) -> bool {
        self.groups.iter().any(Group::is_default)
    }
}

/// Reading level of a story.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Short bilingual story for reading practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub title_turkish: String,
    pub content: String,
    #[serde(default)]
    pub content_turkish: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    pub created_at: String,
    pub updated_at: String,
}

/// Story fields accepted on create and update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryInput {
    pub title: Option<String>,
    pub title_turkish: Option<String>,
    pub content: Option<String>,
    pub content_turkish: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<Vec<String>>,
    pub word_count: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults_from_empty_object() {
        let doc: Metadata = serde_json::from_str("{}").unwrap();
        assert!(doc.groups.is_empty());
        assert_eq!(doc.settings, Settings::default());
        assert_eq!(doc.longest_streak, 0);
    }

    #[test]
    fn test_metadata_wire_names() {
        let mut doc = Metadata::default();
        doc.longest_streak = 4;
        doc.confidence
            .entry("default".into())
            .or_default()
            .insert(1700000000000, ConfidenceRecord::default());
        doc.progress
            .entry("default".into())
            .or_default()
            .insert(1700000000000, ChunkStatus::Skipped);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["longestStreak"], 4);
        assert_eq!(json["settings"]["dailyGoal"], 20);
        assert_eq!(json["settings"]["ttsVoice"], "en-US");
        assert_eq!(json["progress"]["default"]["1700000000000"], "skipped");
        assert!(json["confidence"]["default"]["1700000000000"]["nextReview"].is_null());
    }

    #[test]
    fn test_settings_partial_update() {
        let mut settings = Settings::default();
        settings.apply_update(&SettingsUpdate {
            daily_goal: Some(30),
            ..Default::default()
        });
        assert_eq!(settings.daily_goal, 30);
        assert_eq!(settings.tts_speed, DEFAULT_TTS_SPEED);
        assert_eq!(settings.tts_voice, DEFAULT_TTS_VOICE);
    }

    #[test]
    fn test_chunk_shallow_merge() {
        let mut chunk = Chunk {
            id: 1,
            english: "make up your mind".into(),
            turkish: "karar ver".into(),
            examples: vec!["Make up your mind!".into()],
            example_translations: None,
            extra: Map::new(),
        };
        chunk.apply_update(ChunkUpdate {
            turkish: Some("kararını ver".into()),
            ..Default::default()
        });
        assert_eq!(chunk.english, "make up your mind");
        assert_eq!(chunk.turkish, "kararını ver");
        assert_eq!(chunk.examples.len(), 1);
    }

    #[test]
    fn test_chunk_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "id": 7,
            "english": "give up",
            "turkish": "vazgeçmek",
            "examples": [],
            "category": "verbs",
            "audio": { "url": "give-up.mp3" }
        });
        let mut chunk: Chunk = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(chunk.extra["category"], "verbs");
        assert_eq!(serde_json::to_value(&chunk).unwrap(), raw);

        let update: ChunkUpdate = serde_json::from_value(serde_json::json!({
            "id": 99,
            "category": "phrasal",
            "note": "common"
        }))
        .unwrap();
        chunk.apply_update(update);

        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["category"], "phrasal");
        assert_eq!(json["note"], "common");
        assert_eq!(json["audio"]["url"], "give-up.mp3");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(ChunkStatus::parse("wrong"), Some(ChunkStatus::Wrong));
        assert_eq!(ChunkStatus::parse("WRONG"), None);
    }

    #[test]
    fn test_default_group_file_is_protected() {
        let group = Group::default_group();
        assert!(group.is_default());
        assert!(!group.owns_removable_file());
    }
}
