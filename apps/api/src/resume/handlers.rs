//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, EngineError};
use crate::resume::extract::RawDocument;
use crate::resume::models::ParsedProfile;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct FileMeta {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub success: bool,
    pub parsed_data: ParsedProfile,
    pub file: FileMeta,
}

struct Upload {
    filename: String,
    document: RawDocument,
}

/// POST /api/v1/resumes/parse
///
/// Multipart upload (field `file`, PDF or DOCX). Parses the resume on the
/// blocking pool, then stores the original bytes for later download.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let upload = read_upload(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation("Resume file is required.".to_string()))?;

    if !state.parser.supports(&upload.document.media_type) {
        return Err(EngineError::UnsupportedFormat(upload.document.media_type).into());
    }

    let parser = state.parser.clone();
    let document = upload.document.clone();
    let parsed_data = tokio::task::spawn_blocking(move || parser.parse(&document))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    let stored = state.documents.put(&upload.filename, &upload.document).await?;
    info!(
        "Parsed resume '{}' ({} bytes) as {}: {} skills",
        stored.filename,
        stored.size_bytes,
        stored.id,
        parsed_data.skills.len()
    );

    Ok(Json(ParseResumeResponse {
        success: true,
        parsed_data,
        file: FileMeta {
            id: stored.id,
            filename: stored.filename,
            content_type: stored.content_type,
        },
    }))
}

/// GET /api/v1/resumes/:id/download
pub async fn handle_download_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let blob = state
        .documents
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        blob.meta.filename.replace(['"', '\r', '\n'], "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, blob.meta.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        blob.bytes,
    )
        .into_response())
}

/// Returns the first `file` field, or `None` when the form has none.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("resume").to_string();
        let media_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid file upload: {e}")))?;

        return Ok(Some(Upload {
            filename,
            document: RawDocument::new(bytes, media_type),
        }));
    }

    Ok(None)
}
