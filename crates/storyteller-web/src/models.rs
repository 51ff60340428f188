use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Body of `POST /parse-script`.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseScriptRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    /// Labels the loaded model can emit; empty when no model is loaded.
    pub labels: Vec<String>,
}
