//! Axum route handlers for the position registry.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::auth::{Capability, Principal};
use crate::errors::AppError;
use crate::models::position::PositionRow;
use crate::positions::registry;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePositionRequest {
    #[serde(default)]
    pub title: String,
    pub department: Option<String>,
    pub description: Option<String>,
}

/// POST /api/v1/positions
pub async fn handle_create_position(
    State(state): State<AppState>,
    principal: Principal,
    Json(request): Json<CreatePositionRequest>,
) -> Result<(StatusCode, Json<PositionRow>), AppError> {
    principal.require(Capability::ManagePositions)?;

    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    // The position row references the creator; mirror them first.
    crate::users::ensure(&state.db, &principal).await?;

    let row = registry::create(
        &state.db,
        request.title.trim(),
        request.department.as_deref(),
        request.description.as_deref(),
        principal.id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/positions
///
/// Open positions; readable by any authenticated actor (intake needs it).
pub async fn handle_list_positions(
    State(state): State<AppState>,
    _principal: Principal,
) -> Result<Json<Vec<PositionRow>>, AppError> {
    let rows = registry::list_open(&state.db).await?;
    Ok(Json(rows))
}
