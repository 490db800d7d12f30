//! Story collection persisted as a single JSON array.

use std::path::{Path, PathBuf};

use tracing::info;

use chunkradar_core::time::{now_millis, now_rfc3339};
use chunkradar_core::{Error, Result};

use crate::ids::next_id;
use crate::json::{read_json, write_json};
use crate::types::{Story, StoryInput};

pub struct StoryStore {
    path: PathBuf,
}

impl StoryStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn list(&self) -> Vec<Story> {
        read_json(&self.path)
    }

    pub fn create(&self, input: StoryInput) -> Result<Story> {
        let title = non_empty(input.title, "Title")?;
        let content = non_empty(input.content, "Content")?;

        let mut stories = self.list();
        let now = now_rfc3339();
        let story = Story {
            id: next_id(stories.iter().map(|s| s.id), now_millis()),
            word_count: Some(input.word_count.unwrap_or_else(|| word_count(&content))),
            title,
            title_turkish: input.title_turkish.unwrap_or_default(),
            content,
            content_turkish: input.content_turkish.unwrap_or_default(),
            difficulty: input.difficulty.unwrap_or_default(),
            tags: input.tags,
            created_at: now.clone(),
            updated_at: now,
        };
        stories.push(story.clone());
        write_json(&self.path, &stories)?;

        info!("Created story {} ({})", story.id, story.title);
        Ok(story)
    }

    /// Shallow-merge supplied fields into an existing story.
    pub fn update(&self, id: i64, input: StoryInput) -> Result<Story> {
        let mut stories = self.list();
        let story = stories
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound("Story".into()))?;

        if let Some(title) = input.title {
            story.title = title;
        }
        if let Some(title_turkish) = input.title_turkish {
            story.title_turkish = title_turkish;
        }
        if let Some(content) = input.content {
            story.word_count = Some(word_count(&content));
            story.content = content;
        }
        if let Some(content_turkish) = input.content_turkish {
            story.content_turkish = content_turkish;
        }
        if let Some(difficulty) = input.difficulty {
            story.difficulty = difficulty;
        }
        if let Some(tags) = input.tags {
            story.tags = Some(tags);
        }
        if let Some(count) = input.word_count {
            story.word_count = Some(count);
        }
        story.updated_at = now_rfc3339();

        let updated = story.clone();
        write_json(&self.path, &stories)?;
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let mut stories = self.list();
        let len_before = stories.len();
        stories.retain(|s| s.id != id);
        if stories.len() == len_before {
            return Err(Error::NotFound("Story".into()));
        }
        write_json(&self.path, &stories)?;
        info!("Deleted story {}", id);
        Ok(())
    }
}

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn non_empty(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::BadRequest(format!("{} is required", field))),
    }
}
