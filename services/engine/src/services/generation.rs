//! services/engine/src/services/generation.rs
//!
//! End-to-end flashcard generation: resolve the note, build the prompt,
//! call the generative endpoint, parse its output, and persist the drafts
//! as flashcards owned by the caller.

use std::sync::Arc;

use chrono::Utc;
use recall_core::domain::{Flashcard, GenerationRequest};
use recall_core::ports::{FlashcardStore, NoteStore, TextGenerationService};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::parser::parse_drafts;
use crate::prompt::PromptBuilder;
use crate::services::screen_owner;

/// Most cards one call may request.
pub const MAX_CARDS_PER_REQUEST: u32 = 50;

/// Orchestrates one generation call from note to persisted cards.
///
/// This service performs no retries itself: every failure is surfaced
/// typed, and [`EngineError::is_retryable`] tells the caller whether
/// trying again is worthwhile.
pub struct GenerationService {
    notes: Arc<dyn NoteStore>,
    cards: Arc<dyn FlashcardStore>,
    model: Arc<dyn TextGenerationService>,
    prompts: PromptBuilder,
}

impl GenerationService {
    pub fn new(
        notes: Arc<dyn NoteStore>,
        cards: Arc<dyn FlashcardStore>,
        model: Arc<dyn TextGenerationService>,
        prompts: PromptBuilder,
    ) -> Self {
        Self {
            notes,
            cards,
            model,
            prompts,
        }
    }

    /// Generates and persists flashcards for one note owned by `caller`.
    pub async fn generate_flashcards(
        &self,
        request: GenerationRequest,
        caller: Uuid,
    ) -> Result<Vec<Flashcard>, EngineError> {
        self.generate_flashcards_with_cancel(request, caller, CancellationToken::new())
            .await
    }

    /// Like [`Self::generate_flashcards`], but gives the caller a handle to
    /// abandon the outbound model call. Cancellation before the model
    /// responds persists nothing.
    pub async fn generate_flashcards_with_cancel(
        &self,
        request: GenerationRequest,
        caller: Uuid,
        cancel: CancellationToken,
    ) -> Result<Vec<Flashcard>, EngineError> {
        if request.count == 0 || request.count > MAX_CARDS_PER_REQUEST {
            return Err(EngineError::Validation(format!(
                "count must be between 1 and {}, got {}",
                MAX_CARDS_PER_REQUEST, request.count
            )));
        }

        let note = self.notes.get_note(request.note_id).await?;
        screen_owner("Note", note.id, note.user_id, caller)?;

        let payload = self.prompts.build(&note.title, &note.content, request.count);

        info!(
            "generating {} flashcards for note {}",
            request.count, note.id
        );
        let text = tokio::select! {
            _ = cancel.cancelled() => return Err(EngineError::Cancelled),
            result = self.model.generate(&payload) => result.map_err(|e| {
                warn!("generation call for note {} failed: {}", note.id, e);
                EngineError::Upstream(e)
            })?,
        };

        let drafts = parse_drafts(&text).map_err(|e| {
            warn!("could not parse generation output for note {}: {}", note.id, e);
            e
        })?;

        // Each draft is persisted on its own; a failure mid-batch leaves the
        // earlier cards committed. Any transactional boundary belongs to the
        // store collaborator.
        let now = Utc::now();
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let card = Flashcard::new(note.id, caller, draft.front, draft.back, now);
            created.push(self.cards.save_flashcard(card).await?);
        }

        info!("created {} flashcards for note {}", created.len(), note.id);
        Ok(created)
    }
}
