//! Axum route handler for the Parse API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResponse {
    pub text: String,
}

/// POST /api/parse
///
/// Takes the first `file` field of a multipart body. The type is checked
/// before the extractor is invoked.
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseResponse>, AppError> {
    let mut multipart = multipart?;
    let document = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation("No file uploaded.".to_string()))?;

    info!(
        "Received file: {} ({}), {} bytes",
        document.file_name.as_deref().unwrap_or("<unnamed>"),
        document.content_type.as_deref().unwrap_or("<no type>"),
        document.bytes.len()
    );

    let kind = document.kind()?;
    let text = state.extractor.extract(kind, document.bytes).await?;

    Ok(Json(ParseResponse { text }))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedDocument>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        // Browsers submit an empty, unnamed part when no file was chosen.
        if bytes.is_empty() && file_name.as_deref().unwrap_or("").is_empty() {
            return Ok(None);
        }

        return Ok(Some(UploadedDocument {
            file_name,
            content_type,
            bytes,
        }));
    }
    Ok(None)
}
