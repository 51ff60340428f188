use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of screenplay text for the dialogue parser.
///
/// Implementors provide the raw text of a document; splitting it into
/// speaker/dialogue entries lives in `storyteller_parsing::DialogueParser`.
pub trait PdfBackend: Send + Sync {
    /// Extract the text of a screenplay, one visual line per `\n`.
    ///
    /// A blank line must separate paragraphs: it is what ends a dialogue
    /// block after a character cue. Page boundaries count as paragraph
    /// breaks. Leading indentation may be dropped; cues are recognised by
    /// case, not position.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}
