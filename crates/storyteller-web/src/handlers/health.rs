use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::models::HealthResponse;
use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let labels = state
        .classifier
        .as_ref()
        .map(|c| c.labels().to_vec())
        .unwrap_or_default();
    Json(HealthResponse {
        status: "ok",
        model_loaded: state.classifier.is_some(),
        labels,
    })
}
