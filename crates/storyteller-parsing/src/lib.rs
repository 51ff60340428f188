use std::path::Path;

use thiserror::Error;

pub mod config;
pub mod parser;
pub mod speaker;
pub mod text_processing;

pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use parser::DialogueParser;
// Re-export domain types from core (canonical definitions live there)
pub use storyteller_core::{BackendError, DialogueEntry, PdfBackend};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("{0}")]
    Backend(#[from] BackendError),
}

/// Split script text into speaker/dialogue entries using the default config.
pub fn parse_dialogues(text: &str) -> Vec<DialogueEntry> {
    DialogueParser::new().parse(text)
}

/// Extract dialogue entries from a PDF file using the given backend for
/// text extraction.
///
/// Pipeline:
/// 1. Extract text from the PDF via `backend`
/// 2. Normalise ligatures, quotes, Markdown emphasis and page furniture
/// 3. Segment inline `NAME: line` and screenplay cue blocks in document order
pub fn extract_dialogues(
    pdf_path: &Path,
    backend: &dyn PdfBackend,
    config: &ParsingConfig,
) -> Result<Vec<DialogueEntry>, ParsingError> {
    let text = backend.extract_text(pdf_path)?;
    Ok(DialogueParser::with_config(config.clone()).parse(&text))
}
