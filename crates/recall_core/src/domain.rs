//! crates/recall_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or HTTP wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::srs::{ReviewState, DEFAULT_EASE_FACTOR};

/// A note a user has stored. Notes are the source material that flashcards
/// are generated from.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(
        user_id: Uuid,
        title: String,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            content,
            created_at,
        }
    }
}

/// A reviewable flashcard. Every card is owned by exactly one
/// (user, note) pair; the scheduling fields are only ever mutated through
/// the SM-2 transition in [`crate::srs`].
#[derive(Debug, Clone, Serialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetitions: i64,
    pub next_review_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub note_id: Uuid,
}

impl Flashcard {
    /// Creates a card with fresh scheduling state: due immediately, never
    /// repeated, ease factor at the SM-2 starting value.
    pub fn new(
        note_id: Uuid,
        user_id: Uuid,
        front: String,
        back: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            front,
            back,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 0,
            repetitions: 0,
            next_review_at: now,
            user_id,
            note_id,
        }
    }

    /// The scheduling sub-state handed to the SM-2 engine.
    pub fn review_state(&self) -> ReviewState {
        ReviewState {
            ease_factor: self.ease_factor,
            interval_days: self.interval_days,
            repetitions: self.repetitions,
            next_review_at: self.next_review_at,
        }
    }

    /// Writes a computed scheduling state back onto the card.
    pub fn set_review_state(&mut self, state: ReviewState) {
        self.ease_factor = state.ease_factor;
        self.interval_days = state.interval_days;
        self.repetitions = state.repetitions;
        self.next_review_at = state.next_review_at;
    }
}

/// An unvalidated front/back pair parsed out of generated text, before it
/// is promoted to a persisted [`Flashcard`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FlashcardDraft {
    pub front: String,
    pub back: String,
}

/// One request to generate flashcards from a stored note. Transient; lives
/// for the duration of a single generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest {
    pub note_id: Uuid,
    pub count: u32,
}

/// A model-ready instruction payload. Deliberately vendor-neutral: the
/// adapter that talks to a concrete endpoint owns the wire envelope, so
/// swapping the upstream model only touches that adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPayload {
    /// The fixed instruction describing the required output shape.
    pub system_instruction: String,
    /// The per-call instruction built from the note being processed.
    pub user_text: String,
    /// The MIME type the model is asked to respond with.
    pub response_mime_type: String,
}
