pub mod domain;
pub mod ports;
pub mod srs;

pub use domain::{Flashcard, FlashcardDraft, GenerationPayload, GenerationRequest, Note};
pub use ports::{
    FlashcardStore, NoteStore, PortError, PortResult, TextGenerationService, UpstreamError,
};
pub use srs::{apply_review, ReviewState, DEFAULT_EASE_FACTOR, MAX_QUALITY, MIN_EASE_FACTOR};
