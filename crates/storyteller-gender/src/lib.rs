//! Speaker-name gender classification for storyteller.
//!
//! The model is an ONNX export of a character-level sequence classifier.
//! A JSON sidecar next to the `.onnx` file declares the label vocabulary and
//! how names are encoded; see [`ModelMetadata`].

mod encoding;
mod error;
mod metadata;
mod model;

pub use encoding::{NameEncoder, pick_label};
pub use error::ModelError;
pub use metadata::{InputDtype, ModelMetadata, Padding};
pub use model::GenderModel;

/// Location the service loads the model from when nothing else is configured.
pub const DEFAULT_MODEL_PATH: &str = "models/gender_model.onnx";
