use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("failed to encode name {name:?}: {reason}")]
    Encoding { name: String, reason: String },
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("unexpected model output: {0}")]
    Output(String),
}

/// A loaded model that predicts a gender label from a speaker name.
///
/// The label vocabulary belongs to the model; callers must not assume a
/// fixed set of categories.
pub trait GenderClassifier: Send + Sync {
    /// Predict the label for a single speaker name.
    fn classify(&self, name: &str) -> Result<String, ClassifierError>;

    /// Labels this model can emit, in output order.
    fn labels(&self) -> &[String];
}
