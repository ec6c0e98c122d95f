//! services/engine/src/services/mod.rs
//!
//! The application services composed from the core ports: flashcard
//! generation, review scheduling, and note/card management.

pub mod cards;
pub mod generation;
pub mod notes;

pub use cards::CardService;
pub use generation::GenerationService;
pub use notes::NoteService;

use recall_core::ports::{PortError, PortResult};
use uuid::Uuid;

/// The single access check used by every per-id path. A resource owned by
/// another user is reported with exactly the same not-found error as a
/// missing one, so callers cannot probe for other users' data.
pub(crate) fn screen_owner(kind: &str, id: Uuid, owner: Uuid, caller: Uuid) -> PortResult<()> {
    if owner == caller {
        Ok(())
    } else {
        Err(PortError::NotFound(format!("{} {} not found", kind, id)))
    }
}
