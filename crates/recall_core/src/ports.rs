//! crates/recall_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Flashcard, GenerationPayload, Note};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// Failure of the external text-generation endpoint. Kept separate from
/// [`PortError`] so the upstream status and body survive for diagnostics:
/// a caller can tell a refusing model apart from a broken call site.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("generation endpoint returned status {status}: {body}")]
    Response { status: u16, body: String },
    #[error("generation endpoint unreachable: {0}")]
    Unreachable(String),
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Looks a note up by id. Absence is a `PortError::NotFound`.
    async fn get_note(&self, note_id: Uuid) -> PortResult<Note>;

    /// Inserts or updates a note and returns the stored value.
    async fn save_note(&self, note: Note) -> PortResult<Note>;

    async fn delete_note(&self, note_id: Uuid) -> PortResult<()>;

    async fn notes_for_user(&self, user_id: Uuid) -> PortResult<Vec<Note>>;

    /// Finds a user's note with the given title, if one exists. Used to
    /// reject duplicate titles per user.
    async fn note_for_user_with_title(
        &self,
        user_id: Uuid,
        title: &str,
    ) -> PortResult<Option<Note>>;
}

#[async_trait]
pub trait FlashcardStore: Send + Sync {
    /// Inserts or updates a flashcard and returns the stored value.
    async fn save_flashcard(&self, card: Flashcard) -> PortResult<Flashcard>;

    /// Looks a flashcard up by id. Absence is a `PortError::NotFound`.
    async fn get_flashcard(&self, card_id: Uuid) -> PortResult<Flashcard>;

    async fn delete_flashcard(&self, card_id: Uuid) -> PortResult<()>;

    async fn flashcards_for_note(&self, note_id: Uuid) -> PortResult<Vec<Flashcard>>;

    async fn flashcards_for_user(&self, user_id: Uuid) -> PortResult<Vec<Flashcard>>;
}

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Sends one payload to the model and returns the raw text it produced.
    ///
    /// Interpreting that text is the caller's concern; an empty response is
    /// returned as an empty string, not an error. Implementations do not
    /// retry.
    async fn generate(&self, payload: &GenerationPayload) -> Result<String, UpstreamError>;
}
