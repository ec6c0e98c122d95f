//! services/engine/src/bin/generate.rs
//!
//! Smoke binary: reads a note from a text file, generates flashcards for it
//! against the live endpoint, and prints the created cards as JSON.

use std::path::Path;
use std::sync::Arc;

use engine_lib::{
    adapters::{GeminiAdapter, InMemoryFlashcardStore, InMemoryNoteStore},
    config::Config,
    error::EngineError,
    prompt::{PromptBuilder, SystemInstruction},
    services::{GenerationService, NoteService},
};
use recall_core::domain::GenerationRequest;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

fn usage() -> ! {
    eprintln!("usage: generate <note-file> [count]");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(note_path) = args.next() else { usage() };
    let count = match args.next() {
        Some(raw) => raw.parse::<u32>().unwrap_or_else(|_| usage()),
        None => 5,
    };

    // --- 2. Initialize Adapters and Services ---
    let system_instruction = SystemInstruction::load(&config.prompts_path)?;
    let model = Arc::new(GeminiAdapter::new(&config)?);
    let note_store = Arc::new(InMemoryNoteStore::new());
    let card_store = Arc::new(InMemoryFlashcardStore::new());

    let notes = NoteService::new(note_store.clone());
    let generator = GenerationService::new(
        note_store,
        card_store,
        model,
        PromptBuilder::new(system_instruction),
    );

    // --- 3. Seed the Note and Generate ---
    let content = std::fs::read_to_string(&note_path)?;
    let title = Path::new(&note_path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("untitled")
        .to_string();

    let user_id = Uuid::new_v4();
    let note = notes.create_note(title, content, user_id).await?;
    info!("seeded note {} for user {}", note.id, user_id);

    let cards = generator
        .generate_flashcards(
            GenerationRequest {
                note_id: note.id,
                count,
            },
            user_id,
        )
        .await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&cards).expect("flashcards serialize to JSON")
    );
    Ok(())
}
