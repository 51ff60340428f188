use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the gender model at startup.
///
/// A missing model file is not an error; see [`crate::GenderModel::load`].
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to load model {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("invalid model metadata {path}: {reason}")]
    Metadata { path: PathBuf, reason: String },
}
