//! services/engine/src/adapters/memory.rs
//!
//! In-memory implementations of the store ports. The surrounding
//! application keeps these entities in a database; here the stores back
//! the tests and the smoke binary, preserving insertion order.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use recall_core::domain::{Flashcard, Note};
use recall_core::ports::{FlashcardStore, NoteStore, PortError, PortResult};
use uuid::Uuid;

fn lock<'a, T>(mutex: &'a Mutex<Vec<T>>, what: &str) -> PortResult<MutexGuard<'a, Vec<T>>> {
    mutex
        .lock()
        .map_err(|e| PortError::Unexpected(format!("{} store lock poisoned: {}", what, e)))
}

//=========================================================================================
// Note Store
//=========================================================================================

/// A note store backed by a plain `Vec` behind a mutex.
#[derive(Default)]
pub struct InMemoryNoteStore {
    notes: Mutex<Vec<Note>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn get_note(&self, note_id: Uuid) -> PortResult<Note> {
        lock(&self.notes, "note")?
            .iter()
            .find(|note| note.id == note_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Note {} not found", note_id)))
    }

    async fn save_note(&self, note: Note) -> PortResult<Note> {
        let mut notes = lock(&self.notes, "note")?;
        match notes.iter_mut().find(|stored| stored.id == note.id) {
            Some(stored) => *stored = note.clone(),
            None => notes.push(note.clone()),
        }
        Ok(note)
    }

    async fn delete_note(&self, note_id: Uuid) -> PortResult<()> {
        let mut notes = lock(&self.notes, "note")?;
        let before = notes.len();
        notes.retain(|note| note.id != note_id);
        if notes.len() == before {
            return Err(PortError::NotFound(format!("Note {} not found", note_id)));
        }
        Ok(())
    }

    async fn notes_for_user(&self, user_id: Uuid) -> PortResult<Vec<Note>> {
        Ok(lock(&self.notes, "note")?
            .iter()
            .filter(|note| note.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn note_for_user_with_title(
        &self,
        user_id: Uuid,
        title: &str,
    ) -> PortResult<Option<Note>> {
        Ok(lock(&self.notes, "note")?
            .iter()
            .find(|note| note.user_id == user_id && note.title == title)
            .cloned())
    }
}

//=========================================================================================
// Flashcard Store
//=========================================================================================

/// A flashcard store backed by a plain `Vec` behind a mutex.
#[derive(Default)]
pub struct InMemoryFlashcardStore {
    cards: Mutex<Vec<Flashcard>>,
}

impl InMemoryFlashcardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlashcardStore for InMemoryFlashcardStore {
    async fn save_flashcard(&self, card: Flashcard) -> PortResult<Flashcard> {
        let mut cards = lock(&self.cards, "flashcard")?;
        match cards.iter_mut().find(|stored| stored.id == card.id) {
            Some(stored) => *stored = card.clone(),
            None => cards.push(card.clone()),
        }
        Ok(card)
    }

    async fn get_flashcard(&self, card_id: Uuid) -> PortResult<Flashcard> {
        lock(&self.cards, "flashcard")?
            .iter()
            .find(|card| card.id == card_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Flashcard {} not found", card_id)))
    }

    async fn delete_flashcard(&self, card_id: Uuid) -> PortResult<()> {
        let mut cards = lock(&self.cards, "flashcard")?;
        let before = cards.len();
        cards.retain(|card| card.id != card_id);
        if cards.len() == before {
            return Err(PortError::NotFound(format!(
                "Flashcard {} not found",
                card_id
            )));
        }
        Ok(())
    }

    async fn flashcards_for_note(&self, note_id: Uuid) -> PortResult<Vec<Flashcard>> {
        Ok(lock(&self.cards, "flashcard")?
            .iter()
            .filter(|card| card.note_id == note_id)
            .cloned()
            .collect())
    }

    async fn flashcards_for_user(&self, user_id: Uuid) -> PortResult<Vec<Flashcard>> {
        Ok(lock(&self.cards, "flashcard")?
            .iter()
            .filter(|card| card.user_id == user_id)
            .cloned()
            .collect())
    }
}
