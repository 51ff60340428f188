use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use storyteller_core::DialogueEntry;

use crate::error::ApiError;
use crate::models::ParseScriptRequest;
use crate::script;
use crate::state::AppState;

/// `POST /parse-script`: same as an upload, for text that is already extracted.
pub async fn parse_script(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ParseScriptRequest>, JsonRejection>,
) -> Result<Json<Vec<DialogueEntry>>, ApiError> {
    let classifier = state
        .classifier
        .clone()
        .ok_or(ApiError::ServiceUnavailable)?;
    let Json(request) = payload.map_err(|e| {
        if e.status() == StatusCode::UNPROCESSABLE_ENTITY {
            ApiError::UnprocessableRequest(e.body_text())
        } else {
            ApiError::InvalidInput(e.body_text())
        }
    })?;

    let entries = script::process_text(state, classifier, request.text).await?;
    Ok(Json(entries))
}
