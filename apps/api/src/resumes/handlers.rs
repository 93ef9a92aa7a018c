//! Axum route handlers for the resume store.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::warn;
use uuid::Uuid;

use crate::auth::{Capability, Principal};
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resumes::store;
use crate::state::AppState;

/// POST /api/v1/resumes
///
/// Multipart upload: a `file` part plus an optional `title` part. The new
/// resume is stored inactive; activate it with PUT /api/v1/resumes/active/:id.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    principal: Principal,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    principal.require(Capability::ManageResumes)?;

    let mut file: Option<(String, String, bytes::Bytes)> = None;
    let mut title = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let filename = store::sanitize_filename(field.file_name().unwrap_or("resume"));
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read file part: {e}")))?;
                file = Some((filename, content_type, bytes));
            }
            Some("title") => {
                title = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read title part: {e}")))?;
            }
            _ => {}
        }
    }

    let (filename, content_type, bytes) =
        file.ok_or_else(|| AppError::Validation("file part is required".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }
    if title.trim().is_empty() {
        title = filename.clone();
    }

    let resume_id = Uuid::new_v4();
    let key = store::file_key(principal.id, resume_id, &filename);

    // Blob first, then metadata. If the insert fails the blob is orphaned —
    // logged here, reaped out of band.
    state.files.save(&key, bytes, &content_type).await?;
    let row = match store::create(&state.db, principal.id, resume_id, title.trim(), &key).await {
        Ok(row) => row,
        Err(e) => {
            warn!("resume metadata insert failed, orphaned blob at '{key}'");
            return Err(e);
        }
    };

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    principal.require(Capability::ManageResumes)?;
    let rows = store::list(&state.db, principal.id).await?;
    Ok(Json(rows))
}

/// GET /api/v1/resumes/active
pub async fn handle_get_active_resume(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<ResumeRow>, AppError> {
    principal.require(Capability::ManageResumes)?;
    store::get_active(&state.db, principal.id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No active resume".to_string()))
}

/// PUT /api/v1/resumes/active/:id
pub async fn handle_activate_resume(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    principal.require(Capability::ManageResumes)?;
    let row = store::set_active(&state.db, principal.id, id).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    principal.require(Capability::ManageResumes)?;
    store::delete(&state.db, state.files.as_ref(), principal.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
