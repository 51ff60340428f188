use std::path::PathBuf;
use std::sync::Arc;

use storyteller_core::{GenderClassifier, PdfBackend};
use storyteller_parsing::ParsingConfig;

/// Shared application state accessible from all handlers.
pub struct AppState {
    /// `None` when no model file was found at startup; annotation endpoints
    /// then answer 503.
    pub classifier: Option<Arc<dyn GenderClassifier>>,
    pub backend: Arc<dyn PdfBackend>,
    pub parsing: ParsingConfig,
    /// Per-request scratch directories are created under this root.
    pub scratch_root: PathBuf,
}
