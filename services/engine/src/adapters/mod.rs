pub mod gemini;
pub mod memory;

pub use gemini::GeminiAdapter;
pub use memory::{InMemoryFlashcardStore, InMemoryNoteStore};
