use serde::{Deserialize, Serialize};

pub mod annotate;
pub mod backend;
pub mod classifier;
pub mod config_file;

// Re-export for convenience
pub use annotate::annotate_genders;
pub use backend::{BackendError, PdfBackend};
pub use classifier::{ClassifierError, GenderClassifier};

/// One line of a script attributed to a speaker.
///
/// Created by the dialogue parser with `predicted_gender` unset, then
/// labelled once by [`annotate_genders`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueEntry {
    /// Speaker label as it appeared in the script.
    pub name: String,
    pub dialogue: String,
    pub predicted_gender: Option<String>,
}

impl DialogueEntry {
    pub fn new(name: impl Into<String>, dialogue: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dialogue: dialogue.into(),
            predicted_gender: None,
        }
    }
}
