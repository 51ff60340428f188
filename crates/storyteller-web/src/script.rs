use std::sync::Arc;

use storyteller_core::{DialogueEntry, GenderClassifier, annotate_genders};
use storyteller_parsing::{DialogueParser, extract_dialogues};

use crate::error::ScriptError;
use crate::state::AppState;
use crate::upload::UploadedScript;

/// Name of the upload inside its scratch directory.
const SCRATCH_FILE: &str = "upload.pdf";

/// Store the upload in a fresh scratch directory, extract and parse it, then
/// label every entry.
///
/// The scratch directory is removed when extraction finishes, whether it
/// succeeded or not.
pub async fn process_pdf(
    state: Arc<AppState>,
    classifier: Arc<dyn GenderClassifier>,
    upload: UploadedScript,
) -> Result<Vec<DialogueEntry>, ScriptError> {
    tokio::task::spawn_blocking(move || -> Result<Vec<DialogueEntry>, ScriptError> {
        let scratch = tempfile::Builder::new()
            .prefix("upload-")
            .tempdir_in(&state.scratch_root)?;
        let pdf_path = scratch.path().join(SCRATCH_FILE);
        std::fs::write(&pdf_path, &upload.data)?;

        let extracted = extract_dialogues(&pdf_path, state.backend.as_ref(), &state.parsing);
        drop(scratch);

        let entries = annotate_genders(classifier.as_ref(), extracted?)?;
        tracing::debug!(
            filename = %upload.filename,
            entries = entries.len(),
            "annotated uploaded script"
        );
        Ok(entries)
    })
    .await?
}

/// Parse already-extracted script text and label every entry.
pub async fn process_text(
    state: Arc<AppState>,
    classifier: Arc<dyn GenderClassifier>,
    text: String,
) -> Result<Vec<DialogueEntry>, ScriptError> {
    tokio::task::spawn_blocking(move || -> Result<Vec<DialogueEntry>, ScriptError> {
        let entries = DialogueParser::with_config(state.parsing.clone()).parse(&text);
        Ok(annotate_genders(classifier.as_ref(), entries)?)
    })
    .await?
}
