use axum::extract::Multipart;

use crate::error::{ApiError, ONLY_PDF};

/// Multipart field carrying the screenplay.
pub const FILE_FIELD: &str = "file";

/// A validated PDF upload.
#[derive(Debug)]
pub struct UploadedScript {
    pub filename: String,
    pub data: Vec<u8>,
}

/// True when `filename` ends in `.pdf`, ignoring case.
pub fn is_pdf_filename(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

/// Read the `file` field from a multipart upload.
///
/// The filename is checked before any of the field's bytes are read, so a
/// non-PDF upload is rejected without buffering it. Other fields are drained
/// and ignored.
pub async fn read_script(mut multipart: Multipart) -> Result<UploadedScript, ApiError> {
    let mut script: Option<UploadedScript> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(ApiError::from_multipart)?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == FILE_FIELD && script.is_none() {
            let filename = field.file_name().unwrap_or("").to_string();
            if !is_pdf_filename(&filename) {
                return Err(ApiError::InvalidInput(ONLY_PDF.to_string()));
            }
            let data = field
                .bytes()
                .await
                .map_err(ApiError::from_multipart)?
                .to_vec();
            script = Some(UploadedScript { filename, data });
        } else {
            field.bytes().await.map_err(ApiError::from_multipart)?;
        }
    }

    script.ok_or_else(|| ApiError::UnprocessableRequest("No file uploaded".to_string()))
}
