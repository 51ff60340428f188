//! Sidecar metadata describing how names are encoded for the model.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ModelError;

/// Element type of the model's input tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputDtype {
    #[default]
    Float32,
    Int64,
    Int32,
}

/// Where padding goes when a name is shorter than `max_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    Pre,
    #[default]
    Post,
}

/// Contents of `<model>.json` next to the ONNX file.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelMetadata {
    /// Output categories in model output order.
    pub labels: Vec<String>,
    /// Sequence length the model was exported with.
    pub max_len: usize,
    /// Characters known to the model; index `i` encodes as `i + 1`.
    pub vocab: String,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub input_dtype: InputDtype,
    /// Decision boundary for single-output (sigmoid) models.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default)]
    pub padding: Padding,
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> f32 {
    0.5
}

impl ModelMetadata {
    /// Sidecar path for a model file: `gender_model.onnx` → `gender_model.json`.
    pub fn path_for(model_path: &Path) -> PathBuf {
        model_path.with_extension("json")
    }

    /// Read and validate the sidecar.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|e| ModelError::Metadata {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let metadata: ModelMetadata =
            serde_json::from_str(&content).map_err(|e| ModelError::Metadata {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        metadata.validate().map_err(|reason| ModelError::Metadata {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(metadata)
    }

    fn validate(&self) -> Result<(), String> {
        if self.labels.is_empty() {
            return Err("labels must not be empty".into());
        }
        if self.max_len == 0 {
            return Err("max_len must be greater than zero".into());
        }
        if self.vocab.is_empty() {
            return Err("vocab must not be empty".into());
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(format!("threshold {} outside 0.0–1.0", self.threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("gender_model.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn sidecar_path_replaces_extension() {
        assert_eq!(
            ModelMetadata::path_for(Path::new("models/gender_model.onnx")),
            PathBuf::from("models/gender_model.json")
        );
    }

    #[test]
    fn minimal_sidecar_gets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"{"labels": ["female", "male"], "max_len": 15, "vocab": "abc"}"#,
        );
        let metadata = ModelMetadata::load(&path).unwrap();
        assert!(metadata.lowercase);
        assert_eq!(metadata.input_dtype, InputDtype::Float32);
        assert_eq!(metadata.padding, Padding::Post);
        assert_eq!(metadata.threshold, 0.5);
    }

    #[test]
    fn explicit_fields_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"{"labels": ["f", "m", "unknown"], "max_len": 8, "vocab": "ab",
                "lowercase": false, "input_dtype": "int64", "padding": "pre"}"#,
        );
        let metadata = ModelMetadata::load(&path).unwrap();
        assert_eq!(metadata.labels.len(), 3);
        assert!(!metadata.lowercase);
        assert_eq!(metadata.input_dtype, InputDtype::Int64);
        assert_eq!(metadata.padding, Padding::Pre);
    }

    #[test]
    fn empty_labels_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), r#"{"labels": [], "max_len": 15, "vocab": "abc"}"#);
        assert!(matches!(
            ModelMetadata::load(&path),
            Err(ModelError::Metadata { .. })
        ));
    }

    #[test]
    fn missing_sidecar_is_metadata_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelMetadata::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ModelError::Metadata { .. }));
    }
}
