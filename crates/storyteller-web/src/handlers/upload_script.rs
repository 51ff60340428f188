use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};

use storyteller_core::DialogueEntry;

use crate::error::ApiError;
use crate::script;
use crate::state::AppState;
use crate::upload;

/// `POST /upload-script`: screenplay PDF in, labelled dialogue entries out.
///
/// Model availability is checked before the multipart body is touched.
pub async fn upload_script(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Vec<DialogueEntry>>, ApiError> {
    let classifier = state
        .classifier
        .clone()
        .ok_or(ApiError::ServiceUnavailable)?;
    let multipart = multipart.map_err(|e| ApiError::UnprocessableRequest(e.body_text()))?;

    let upload = upload::read_script(multipart).await?;
    let entries = script::process_pdf(state, classifier, upload).await?;
    Ok(Json(entries))
}
