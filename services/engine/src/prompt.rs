//! services/engine/src/prompt.rs
//!
//! Builds the instruction payload for one generation call: a fixed system
//! instruction loaded once at startup plus a per-note user instruction.

use std::path::Path;

use recall_core::domain::GenerationPayload;

use crate::config::ConfigError;

/// File under the prompts directory holding the fixed system instruction.
const SYSTEM_PROMPT_FILE: &str = "flashcard_system_prompt.txt";

/// MIME type the model is asked to answer with, so the reply is machine
/// parseable instead of prose.
const RESPONSE_MIME_TYPE: &str = "application/json";

/// The fixed instruction that describes the required output format to the
/// model. Loaded once at process start and held as an immutable value; a
/// missing file fails startup, never an individual request.
#[derive(Debug, Clone)]
pub struct SystemInstruction(String);

impl SystemInstruction {
    pub fn load(prompts_path: &Path) -> Result<Self, ConfigError> {
        let path = prompts_path.join(SYSTEM_PROMPT_FILE);
        let text = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::UnreadableResource(path, e.to_string()))?;
        Ok(Self(text))
    }

    /// Builds an instruction from literal text, bypassing the filesystem.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Formats a note and a requested card count into a model-ready payload.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_instruction: SystemInstruction,
}

impl PromptBuilder {
    pub fn new(system_instruction: SystemInstruction) -> Self {
        Self { system_instruction }
    }

    pub fn build(&self, note_title: &str, note_content: &str, count: u32) -> GenerationPayload {
        let user_text = format!(
            "Generate {} flashcards for the topic '{}'.\n\nSOURCE CONTENT:\n{}",
            count, note_title, note_content
        );
        GenerationPayload {
            system_instruction: self.system_instruction.as_str().to_string(),
            user_text,
            response_mime_type: RESPONSE_MIME_TYPE.to_string(),
        }
    }
}
