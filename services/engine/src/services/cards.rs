//! services/engine/src/services/cards.rs
//!
//! Flashcard management over the store ports, including the review path
//! that feeds the SM-2 engine.

use std::sync::Arc;

use chrono::Utc;
use recall_core::domain::Flashcard;
use recall_core::ports::{FlashcardStore, NoteStore};
use recall_core::srs::{self, MAX_QUALITY};
use tracing::info;
use uuid::Uuid;

use crate::error::EngineError;
use crate::services::screen_owner;

pub struct CardService {
    cards: Arc<dyn FlashcardStore>,
    notes: Arc<dyn NoteStore>,
}

impl CardService {
    pub fn new(cards: Arc<dyn FlashcardStore>, notes: Arc<dyn NoteStore>) -> Self {
        Self { cards, notes }
    }

    /// Loads a card and screens its owner in one step.
    async fn owned_flashcard(
        &self,
        card_id: Uuid,
        caller: Uuid,
    ) -> Result<Flashcard, EngineError> {
        let card = self.cards.get_flashcard(card_id).await?;
        screen_owner("Flashcard", card.id, card.user_id, caller)?;
        Ok(card)
    }

    /// Applies one review to a card and persists the new schedule.
    ///
    /// The quality score is validated here, before any storage access, so
    /// the SM-2 engine only ever sees scores inside its contract.
    pub async fn review_flashcard(
        &self,
        card_id: Uuid,
        quality: u8,
        caller: Uuid,
    ) -> Result<Flashcard, EngineError> {
        if quality > MAX_QUALITY {
            return Err(EngineError::Validation(format!(
                "quality must be between 0 and {}, got {}",
                MAX_QUALITY, quality
            )));
        }

        let mut card = self.owned_flashcard(card_id, caller).await?;
        let next = srs::apply_review(&card.review_state(), quality, Utc::now());
        card.set_review_state(next);
        let card = self.cards.save_flashcard(card).await?;
        info!(
            "card {} reviewed at quality {}; next review in {} days",
            card.id, quality, card.interval_days
        );
        Ok(card)
    }

    /// Creates a card by hand under a note the caller owns.
    pub async fn create_flashcard(
        &self,
        note_id: Uuid,
        front: String,
        back: String,
        caller: Uuid,
    ) -> Result<Flashcard, EngineError> {
        if front.trim().is_empty() || back.trim().is_empty() {
            return Err(EngineError::Validation(
                "front and back must both be non-empty".to_string(),
            ));
        }

        let note = self.notes.get_note(note_id).await?;
        screen_owner("Note", note.id, note.user_id, caller)?;

        let card = Flashcard::new(note.id, caller, front, back, Utc::now());
        Ok(self.cards.save_flashcard(card).await?)
    }

    pub async fn get_flashcard(
        &self,
        card_id: Uuid,
        caller: Uuid,
    ) -> Result<Flashcard, EngineError> {
        self.owned_flashcard(card_id, caller).await
    }

    /// All cards under one note the caller owns.
    pub async fn flashcards_for_note(
        &self,
        note_id: Uuid,
        caller: Uuid,
    ) -> Result<Vec<Flashcard>, EngineError> {
        let note = self.notes.get_note(note_id).await?;
        screen_owner("Note", note.id, note.user_id, caller)?;
        Ok(self.cards.flashcards_for_note(note.id).await?)
    }

    pub async fn flashcards_for_user(&self, caller: Uuid) -> Result<Vec<Flashcard>, EngineError> {
        Ok(self.cards.flashcards_for_user(caller).await?)
    }

    /// Updates the front and/or back of a card. Absent or blank inputs
    /// leave the corresponding side unchanged.
    pub async fn update_flashcard(
        &self,
        card_id: Uuid,
        front: Option<String>,
        back: Option<String>,
        caller: Uuid,
    ) -> Result<Flashcard, EngineError> {
        let mut card = self.owned_flashcard(card_id, caller).await?;

        if let Some(front) = front.filter(|text| !text.trim().is_empty()) {
            card.front = front;
        }
        if let Some(back) = back.filter(|text| !text.trim().is_empty()) {
            card.back = back;
        }

        Ok(self.cards.save_flashcard(card).await?)
    }

    pub async fn delete_flashcard(&self, card_id: Uuid, caller: Uuid) -> Result<(), EngineError> {
        let card = self.owned_flashcard(card_id, caller).await?;
        Ok(self.cards.delete_flashcard(card.id).await?)
    }
}
