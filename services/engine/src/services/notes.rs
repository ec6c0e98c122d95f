//! services/engine/src/services/notes.rs
//!
//! Note management over the store port: the surface flashcard generation
//! draws its source material from.

use std::sync::Arc;

use chrono::Utc;
use recall_core::domain::Note;
use recall_core::ports::NoteStore;
use uuid::Uuid;

use crate::error::EngineError;
use crate::services::screen_owner;

/// Shortest note content worth generating cards from.
const MIN_CONTENT_LENGTH: usize = 10;

pub struct NoteService {
    notes: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(notes: Arc<dyn NoteStore>) -> Self {
        Self { notes }
    }

    async fn owned_note(&self, note_id: Uuid, caller: Uuid) -> Result<Note, EngineError> {
        let note = self.notes.get_note(note_id).await?;
        screen_owner("Note", note.id, note.user_id, caller)?;
        Ok(note)
    }

    pub async fn create_note(
        &self,
        title: String,
        content: String,
        caller: Uuid,
    ) -> Result<Note, EngineError> {
        if title.trim().is_empty() {
            return Err(EngineError::Validation("title cannot be empty".to_string()));
        }
        if content.chars().count() < MIN_CONTENT_LENGTH {
            return Err(EngineError::Validation(format!(
                "content must be at least {} characters",
                MIN_CONTENT_LENGTH
            )));
        }
        if self
            .notes
            .note_for_user_with_title(caller, &title)
            .await?
            .is_some()
        {
            return Err(EngineError::Validation(format!(
                "a note titled '{}' already exists for this user",
                title
            )));
        }

        let note = Note::new(caller, title, content, Utc::now());
        Ok(self.notes.save_note(note).await?)
    }

    pub async fn get_note(&self, note_id: Uuid, caller: Uuid) -> Result<Note, EngineError> {
        self.owned_note(note_id, caller).await
    }

    /// Updates the title and/or content of a note. Absent or blank inputs
    /// leave the corresponding field unchanged.
    pub async fn update_note(
        &self,
        note_id: Uuid,
        title: Option<String>,
        content: Option<String>,
        caller: Uuid,
    ) -> Result<Note, EngineError> {
        let mut note = self.owned_note(note_id, caller).await?;

        if let Some(title) = title.filter(|text| !text.trim().is_empty()) {
            note.title = title;
        }
        if let Some(content) = content.filter(|text| !text.trim().is_empty()) {
            note.content = content;
        }

        Ok(self.notes.save_note(note).await?)
    }

    pub async fn delete_note(&self, note_id: Uuid, caller: Uuid) -> Result<(), EngineError> {
        let note = self.owned_note(note_id, caller).await?;
        Ok(self.notes.delete_note(note.id).await?)
    }

    pub async fn notes_for_user(&self, caller: Uuid) -> Result<Vec<Note>, EngineError> {
        Ok(self.notes.notes_for_user(caller).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryNoteStore;
    use recall_core::ports::PortError;

    fn service() -> (Arc<InMemoryNoteStore>, NoteService) {
        let store = Arc::new(InMemoryNoteStore::new());
        (store.clone(), NoteService::new(store))
    }

    #[tokio::test]
    async fn rejects_empty_titles_and_short_content() {
        let (_, service) = service();
        let caller = Uuid::new_v4();

        let err = service
            .create_note("  ".to_string(), "long enough content".to_string(), caller)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let err = service
            .create_note("Chemistry".to_string(), "too short".to_string(), caller)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_duplicate_titles_for_the_same_user_only() {
        let (_, service) = service();
        let caller = Uuid::new_v4();
        let other = Uuid::new_v4();

        service
            .create_note("Chemistry".to_string(), "electron configurations".to_string(), caller)
            .await
            .unwrap();

        let err = service
            .create_note("Chemistry".to_string(), "different content here".to_string(), caller)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        // Another user may reuse the title.
        service
            .create_note("Chemistry".to_string(), "electron configurations".to_string(), other)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn foreign_note_reads_as_not_found() {
        let (_, service) = service();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let note = service
            .create_note("Chemistry".to_string(), "electron configurations".to_string(), owner)
            .await
            .unwrap();

        let err = service.get_note(note.id, stranger).await.unwrap_err();
        assert!(matches!(err, EngineError::Port(PortError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_skips_blank_fields() {
        let (store, service) = service();
        let caller = Uuid::new_v4();

        let note = service
            .create_note("Chemistry".to_string(), "electron configurations".to_string(), caller)
            .await
            .unwrap();

        let updated = service
            .update_note(note.id, None, Some("noble gas shortcuts".to_string()), caller)
            .await
            .unwrap();
        assert_eq!(updated.title, "Chemistry");
        assert_eq!(updated.content, "noble gas shortcuts");

        let stored = store.get_note(note.id).await.unwrap();
        assert_eq!(stored.content, "noble gas shortcuts");
    }
}
