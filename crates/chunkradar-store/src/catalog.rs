//! Group and chunk CRUD over the metadata document and the group files.

use std::sync::Arc;

use tracing::info;

use chunkradar_core::config::RESERVED_FILE_NAMES;
use chunkradar_core::time::now_millis;
use chunkradar_core::{Error, Result};

use crate::chunks::ChunkFileStore;
use crate::ids::next_id;
use crate::metadata::MetadataStore;
use crate::slug::slugify;
use crate::types::{strip_reserved, Chunk, ChunkUpdate, Group, NewChunk};

/// Outcome of deleting a group.
#[derive(Debug, Clone)]
pub struct DeletedGroup {
    pub group: Group,
    /// False for the default group, whose file is always retained.
    pub file_removed: bool,
}

/// Groups live in the metadata document; each group's chunks live in its file.
pub struct Catalog {
    metadata: Arc<dyn MetadataStore>,
    files: ChunkFileStore,
}

impl Catalog {
    pub fn new(metadata: Arc<dyn MetadataStore>, files: ChunkFileStore) -> Self {
        Self { metadata, files }
    }

    // ---------------------------------------------------------------
    // Groups
    // ---------------------------------------------------------------

    /// All groups. An empty list is repopulated with the default group.
    pub fn list_groups(&self) -> Result<Vec<Group>> {
        let mut doc = self.metadata.load();
        if doc.groups.is_empty() {
            let default = Group::default_group();
            self.files.ensure_file(&default)?;
            doc.groups.push(default);
            self.metadata.save(&doc)?;
            info!("Initialized default group");
        }
        Ok(doc.groups)
    }

    pub fn group(&self, id: &str) -> Result<Group> {
        self.metadata
            .load()
            .find_group(id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Group".into()))
    }

    pub fn create_group(&self, name: &str) -> Result<Group> {
        if name.is_empty() {
            return Err(Error::BadRequest("Name is required".into()));
        }

        let id = slugify(name, now_millis());
        let file = format!("{}.json", id);
        if RESERVED_FILE_NAMES.contains(&file.as_str()) {
            return Err(Error::BadRequest(format!("Group name \"{}\" is reserved", name)));
        }

        let mut doc = self.metadata.load();
        if doc.find_group(&id).is_some() || doc.groups.iter().any(|g| g.file == file) {
            return Err(Error::Conflict("Group".into()));
        }

        let group = Group {
            id,
            name: name.to_string(),
            file,
        };
        self.files.create_file(&group)?;
        doc.groups.push(group.clone());
        self.metadata.save(&doc)?;

        info!("Created group: {} ({})", group.name, group.id);
        Ok(group)
    }

    pub fn rename_group(&self, id: &str, name: &str) -> Result<Group> {
        if name.is_empty() {
            return Err(Error::BadRequest("Name is required".into()));
        }

        let mut doc = self.metadata.load();
        let group = doc
            .groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| Error::NotFound("Group".into()))?;
        group.name = name.to_string();
        let updated = group.clone();
        self.metadata.save(&doc)?;

        info!("Renamed group {} to {}", updated.id, updated.name);
        Ok(updated)
    }

    /// Remove a group from the metadata and delete its file.
    ///
    /// The default group's metadata entry is removable, but its file is
    /// retained. Progress and confidence entries for the group are kept.
    pub fn delete_group(&self, id: &str) -> Result<DeletedGroup> {
        let mut doc = self.metadata.load();
        let idx = doc
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| Error::NotFound("Group".into()))?;

        let group = doc.groups.remove(idx);
        self.metadata.save(&doc)?;
        let file_removed = self.files.remove_file(&group);

        info!("Deleted group {} (file removed: {})", group.id, file_removed);
        Ok(DeletedGroup {
            group,
            file_removed,
        })
    }

    // ---------------------------------------------------------------
    // Chunks
    // ---------------------------------------------------------------

    pub fn list_chunks(&self, group_id: &str) -> Result<Vec<Chunk>> {
        let group = self.group(group_id)?;
        Ok(self.files.read_chunks(&group))
    }

    pub fn add_chunk(&self, group_id: &str, new: NewChunk) -> Result<Chunk> {
        let group = self.group(group_id)?;
        let english = required(new.english, "english")?;
        let turkish = required(new.turkish, "turkish")?;

        let mut chunks = self.files.read_chunks(&group);
        let chunk = Chunk {
            id: next_id(chunks.iter().map(|c| c.id), now_millis()),
            english,
            turkish,
            examples: new.examples,
            example_translations: new.example_translations,
            extra: strip_reserved(new.extra),
        };
        chunks.push(chunk.clone());
        self.files.write_chunks(&group, &chunks)?;

        info!("Added chunk {} to group {}", chunk.id, group.id);
        Ok(chunk)
    }

    pub fn update_chunk(&self, group_id: &str, chunk_id: i64, update: ChunkUpdate) -> Result<Chunk> {
        let group = self.group(group_id)?;
        let mut chunks = self.files.read_chunks(&group);
        let chunk = chunks
            .iter_mut()
            .find(|c| c.id == chunk_id)
            .ok_or_else(|| Error::NotFound("Chunk".into()))?;
        chunk.apply_update(update);
        let updated = chunk.clone();
        self.files.write_chunks(&group, &chunks)?;
        Ok(updated)
    }

    pub fn delete_chunk(&self, group_id: &str, chunk_id: i64) -> Result<()> {
        let group = self.group(group_id)?;
        let mut chunks = self.files.read_chunks(&group);
        let len_before = chunks.len();
        chunks.retain(|c| c.id != chunk_id);
        if chunks.len() == len_before {
            return Err(Error::NotFound("Chunk".into()));
        }
        self.files.write_chunks(&group, &chunks)?;
        info!("Deleted chunk {} from group {}", chunk_id, group.id);
        Ok(())
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::BadRequest(format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::JsonMetadataStore;
    use chunkradar_core::DataPaths;

    fn test_catalog(dir: &std::path::Path) -> Catalog {
        let paths = DataPaths::new(dir).unwrap();
        let files = ChunkFileStore::new(&paths.root);
        Catalog::new(Arc::new(JsonMetadataStore::new(paths)), files)
    }

    fn new_chunk(english: &str) -> NewChunk {
        NewChunk {
            english: Some(english.into()),
            turkish: Some("çeviri".into()),
            examples: vec!["An example.".into()],
            example_translations: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_default_group_on_first_list() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = test_catalog(dir.path());

        let groups = catalog.list_groups().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, "default");
        assert!(dir.path().join("chunks.json").exists());
    }

    #[test]
    fn test_create_group_and_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = test_catalog(dir.path());

        let group = catalog.create_group("Phrasal Verbs").unwrap();
        assert_eq!(group.id, "phrasal-verbs");
        assert_eq!(group.file, "phrasal-verbs.json");
        assert!(dir.path().join("phrasal-verbs.json").exists());

        let err = catalog.create_group("phrasal   verbs").unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_create_group_rejects_data_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = test_catalog(dir.path());
        catalog.list_groups().unwrap();
        catalog.create_group("Travel").unwrap();
        catalog.add_chunk("default", new_chunk("on time")).unwrap();
        let metadata_before = std::fs::read_to_string(dir.path().join("metadata.json")).unwrap();

        for name in ["Metadata", "Chunks", "Stories", "STATS"] {
            assert!(
                matches!(catalog.create_group(name).unwrap_err(), Error::BadRequest(_)),
                "{} should be rejected",
                name
            );
        }

        assert_eq!(
            std::fs::read_to_string(dir.path().join("metadata.json")).unwrap(),
            metadata_before
        );
        assert_eq!(catalog.list_chunks("default").unwrap().len(), 1);
        assert_eq!(catalog.list_groups().unwrap().len(), 2);
    }

    #[test]
    fn test_create_group_rejects_taken_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path()).unwrap();
        std::fs::write(
            &paths.metadata_file,
            r#"{"groups":[{"id":"legacy","name":"Legacy","file":"idioms.json"}]}"#,
        )
        .unwrap();
        let catalog = test_catalog(dir.path());

        assert!(matches!(
            catalog.create_group("Idioms").unwrap_err(),
            Error::Conflict(_)
        ));
    }

    #[test]
    fn test_create_group_fallback_id() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = test_catalog(dir.path());

        let group = catalog.create_group("???").unwrap();
        assert!(group.id.starts_with("group-"));
        assert_eq!(group.name, "???");
    }

    #[test]
    fn test_create_group_requires_name() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = test_catalog(dir.path());
        assert!(matches!(
            catalog.create_group("").unwrap_err(),
            Error::BadRequest(_)
        ));
    }

    #[test]
    fn test_rename_group() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = test_catalog(dir.path());
        catalog.create_group("Travel").unwrap();

        let renamed = catalog.rename_group("travel", "Travelling").unwrap();
        assert_eq!(renamed.id, "travel");
        assert_eq!(renamed.name, "Travelling");
        assert!(matches!(
            catalog.rename_group("nope", "x").unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[test]
    fn test_delete_group_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = test_catalog(dir.path());
        catalog.create_group("Travel").unwrap();

        let deleted = catalog.delete_group("travel").unwrap();
        assert!(deleted.file_removed);
        assert!(!dir.path().join("travel.json").exists());
        assert!(catalog.group("travel").is_err());
    }

    #[test]
    fn test_delete_default_group_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = test_catalog(dir.path());
        catalog.list_groups().unwrap();
        catalog.create_group("Travel").unwrap();

        let deleted = catalog.delete_group("default").unwrap();
        assert!(!deleted.file_removed);
        assert!(dir.path().join("chunks.json").exists());
        assert!(catalog.group("default").is_err());
    }

    #[test]
    fn test_chunk_crud() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = test_catalog(dir.path());
        catalog.list_groups().unwrap();

        let a = catalog.add_chunk("default", new_chunk("on purpose")).unwrap();
        let b = catalog.add_chunk("default", new_chunk("by accident")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(catalog.list_chunks("default").unwrap().len(), 2);

        let updated = catalog
            .update_chunk(
                "default",
                a.id,
                ChunkUpdate {
                    english: Some("on purpose!".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.english, "on purpose!");
        assert_eq!(updated.turkish, "çeviri");
        assert_eq!(updated.id, a.id);

        catalog.delete_chunk("default", a.id).unwrap();
        let remaining = catalog.list_chunks("default").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
        assert!(matches!(
            catalog.delete_chunk("default", a.id).unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[test]
    fn test_chunk_validation_and_unknown_group() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = test_catalog(dir.path());
        catalog.list_groups().unwrap();

        let missing_turkish = NewChunk {
            english: Some("hang on".into()),
            ..Default::default()
        };
        assert!(matches!(
            catalog.add_chunk("default", missing_turkish).unwrap_err(),
            Error::BadRequest(_)
        ));
        assert!(matches!(
            catalog.add_chunk("ghost", new_chunk("x")).unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            catalog.list_chunks("ghost").unwrap_err(),
            Error::NotFound(_)
        ));
    }
}
