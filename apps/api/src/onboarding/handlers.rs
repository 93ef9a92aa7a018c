//! Axum route handlers for the onboarding tracker.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{Capability, Principal};
use crate::errors::AppError;
use crate::models::onboarding::OnboardingRow;
use crate::onboarding::tracker;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetOnboardingStatusRequest {
    #[serde(default, alias = "onboardingStatus")]
    pub onboarding_status: String,
}

/// GET /api/v1/onboarding
///
/// Onboarding records for the caller's hires.
pub async fn handle_list_onboarding(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<OnboardingRow>>, AppError> {
    principal.require(Capability::TrackOnboarding)?;
    let rows = tracker::list_for_owner(&state.db, principal.id).await?;
    Ok(Json(rows))
}

/// PUT /api/v1/onboarding/:id/status
pub async fn handle_set_onboarding_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(request): Json<SetOnboardingStatusRequest>,
) -> Result<Json<OnboardingRow>, AppError> {
    principal.require(Capability::TrackOnboarding)?;

    let status = tracker::parse_settable_status(&request.onboarding_status)?;
    let row = tracker::set_status(&state.db, id, status, principal.id).await?;

    Ok(Json(row))
}
