//! End-to-end tests for [`extract_dialogues`] with a plain-text backend
//! standing in for a PDF renderer.

use std::path::Path;

use storyteller_parsing::{
    BackendError, DialogueEntry, ParsingConfigBuilder, ParsingError, PdfBackend,
    extract_dialogues, parse_dialogues,
};

/// Reads the file as UTF-8 and returns it verbatim.
struct PlainTextBackend;

impl PdfBackend for PlainTextBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Always fails, like a renderer handed a corrupt document.
struct BrokenBackend;

impl PdfBackend for BrokenBackend {
    fn extract_text(&self, _path: &Path) -> Result<String, BackendError> {
        Err(BackendError::OpenError("no objects found".into()))
    }
}

const SCREENPLAY: &str = "\
FADE IN:

EXT. HARBOUR - DAWN

Fog rolls over the water. ELENA (40s) waits on the pier.

ELENA
(to herself)
He said he would come.

MARCUS (O.S.)
Elena!

She turns.

ELENA
Marcus? Is that
really you?

1.

MARCUS: Who else would it be?
";

fn pairs(entries: &[DialogueEntry]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|e| (e.name.clone(), e.dialogue.clone()))
        .collect()
}

#[test]
fn screenplay_file_in_document_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("harbour.pdf");
    std::fs::write(&path, SCREENPLAY).unwrap();

    let config = ParsingConfigBuilder::new()
        .include_narration(false)
        .build()
        .unwrap();
    let entries = extract_dialogues(&path, &PlainTextBackend, &config).unwrap();

    assert_eq!(
        pairs(&entries),
        vec![
            ("ELENA".to_string(), "He said he would come.".to_string()),
            ("MARCUS".to_string(), "Elena!".to_string()),
            ("ELENA".to_string(), "Marcus? Is that really you?".to_string()),
            ("MARCUS".to_string(), "Who else would it be?".to_string()),
        ]
    );
    assert!(entries.iter().all(|e| e.predicted_gender.is_none()));
}

#[test]
fn narration_interleaves_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("harbour.pdf");
    std::fs::write(&path, SCREENPLAY).unwrap();

    let config = ParsingConfigBuilder::new()
        .narrator_name("NARRATOR")
        .build()
        .unwrap();
    let entries = extract_dialogues(&path, &PlainTextBackend, &config).unwrap();

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "NARRATOR", // FADE IN:
            "NARRATOR", // EXT. HARBOUR - DAWN
            "NARRATOR", // Fog rolls ...
            "ELENA",
            "MARCUS",
            "NARRATOR", // She turns.
            "ELENA",
            "MARCUS",
        ]
    );
    assert_eq!(entries[1].dialogue, "EXT. HARBOUR - DAWN");
}

#[test]
fn blank_line_from_backend_ends_dialogue_block() {
    let dir = tempfile::tempdir().unwrap();
    let separated = dir.path().join("separated.pdf");
    let run_together = dir.path().join("run_together.pdf");
    std::fs::write(&separated, "ELENA\nHe said he would come.\n\nShe turns.\n").unwrap();
    std::fs::write(&run_together, "ELENA\nHe said he would come.\nShe turns.\n").unwrap();

    let entries = extract_dialogues(&separated, &PlainTextBackend, &Default::default()).unwrap();
    assert_eq!(
        pairs(&entries),
        vec![
            ("ELENA".to_string(), "He said he would come.".to_string()),
            ("Narrator".to_string(), "She turns.".to_string()),
        ]
    );

    let entries =
        extract_dialogues(&run_together, &PlainTextBackend, &Default::default()).unwrap();
    assert_eq!(
        pairs(&entries),
        vec![(
            "ELENA".to_string(),
            "He said he would come. She turns.".to_string()
        )]
    );
}

#[test]
fn parsing_is_deterministic() {
    assert_eq!(parse_dialogues(SCREENPLAY), parse_dialogues(SCREENPLAY));
}

#[test]
fn backend_failure_surfaces_message() {
    let err = extract_dialogues(Path::new("missing.pdf"), &BrokenBackend, &Default::default())
        .unwrap_err();
    assert!(matches!(err, ParsingError::Backend(_)));
    assert_eq!(err.to_string(), "failed to open PDF: no objects found");
}

#[test]
fn unreadable_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = extract_dialogues(
        &dir.path().join("absent.pdf"),
        &PlainTextBackend,
        &Default::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParsingError::Backend(BackendError::Io(_))));
}
