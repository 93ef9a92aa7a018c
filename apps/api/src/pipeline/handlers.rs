//! Axum route handlers for candidate intake and pipeline transitions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{Capability, Principal};
use crate::errors::AppError;
use crate::models::candidate::{ApplicationRow, CandidateRow};
use crate::pipeline::engine::{
    transition_application, transition_candidate, TransitionPayload,
};
use crate::pipeline::status::{ApplicationAction, CandidateStatus, PipelineAction};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default, alias = "appliedRole")]
    pub applied_role: String,
    #[serde(alias = "resumeId")]
    pub resume_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransitionRequest {
    pub note: Option<String>,
    #[serde(alias = "scheduleAt")]
    pub schedule_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    #[serde(alias = "candidateId")]
    pub candidate_id: Uuid,
    #[serde(alias = "positionId")]
    pub position_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Candidate handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/candidates
///
/// Intake: creates a candidate at `Submitted`, by the candidate themselves
/// or by a recruiter on their behalf.
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    principal: Principal,
    Json(request): Json<CreateCandidateRequest>,
) -> Result<(StatusCode, Json<CandidateRow>), AppError> {
    principal.require(Capability::SubmitCandidates)?;

    for (field, value) in [
        ("name", &request.name),
        ("email", &request.email),
        ("applied_role", &request.applied_role),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} is required")));
        }
    }

    let row: CandidateRow = sqlx::query_as(
        r#"
        INSERT INTO candidates
            (id, name, email, phone, applied_role, status, resume_id, submitted_by, history)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, '[]'::jsonb)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.name.trim())
    .bind(request.email.trim())
    .bind(&request.phone)
    .bind(request.applied_role.trim())
    .bind(CandidateStatus::Submitted.as_str())
    .bind(request.resume_id)
    .bind(principal.id)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/candidates
///
/// Pipeline view, optionally filtered by status.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    principal: Principal,
    Query(params): Query<CandidateListQuery>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    principal.require(Capability::AdvancePipeline)?;

    let rows: Vec<CandidateRow> = match &params.status {
        Some(status) => {
            let status = CandidateStatus::parse(status)
                .ok_or_else(|| AppError::Validation(format!("unknown status '{status}'")))?;
            sqlx::query_as(
                "SELECT * FROM candidates WHERE status = $1 ORDER BY created_at DESC",
            )
            .bind(status.as_str())
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as("SELECT * FROM candidates ORDER BY created_at DESC")
                .fetch_all(&state.db)
                .await?
        }
    };

    Ok(Json(rows))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateRow>, AppError> {
    principal.require(Capability::AdvancePipeline)?;

    let row: Option<CandidateRow> = sqlx::query_as("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}

/// PUT /api/v1/candidates/:id/:action
///
/// action ∈ {review, shortlist, reject, schedule, hire}. Body may carry a
/// note (appended to the candidate's history) and a schedule time.
pub async fn handle_candidate_transition(
    State(state): State<AppState>,
    principal: Principal,
    Path((id, action)): Path<(Uuid, String)>,
    body: Option<Json<TransitionRequest>>,
) -> Result<Json<CandidateRow>, AppError> {
    principal.require(Capability::AdvancePipeline)?;

    let action = PipelineAction::parse(&action)
        .ok_or_else(|| AppError::Validation(format!("unknown pipeline action '{action}'")))?;
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let payload = TransitionPayload {
        note: request.note,
        schedule_at: request.schedule_at,
    };
    let updated = transition_candidate(&state.db, id, action, &principal, &payload).await?;

    Ok(Json(updated))
}

// ────────────────────────────────────────────────────────────────────────────
// Application handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    principal: Principal,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    principal.require(Capability::AdvancePipeline)?;

    let candidate_exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM candidates WHERE id = $1")
        .bind(request.candidate_id)
        .fetch_optional(&state.db)
        .await?;
    if candidate_exists.is_none() {
        return Err(AppError::NotFound(format!(
            "Candidate {} not found",
            request.candidate_id
        )));
    }

    let position_exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM positions WHERE id = $1")
        .bind(request.position_id)
        .fetch_optional(&state.db)
        .await?;
    if position_exists.is_none() {
        return Err(AppError::NotFound(format!(
            "Position {} not found",
            request.position_id
        )));
    }

    let row: ApplicationRow = sqlx::query_as(
        r#"
        INSERT INTO applications
            (id, candidate_id, position_id, status, onboarding_status, communication, created_by)
        VALUES ($1, $2, $3, 'Applied', 'Pending', '[]'::jsonb, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.candidate_id)
    .bind(request.position_id)
    .bind(principal.id)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/applications
///
/// Owner-scoped: only applications created by the caller.
pub async fn handle_list_applications(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    principal.require(Capability::AdvancePipeline)?;

    let rows: Vec<ApplicationRow> = sqlx::query_as(
        "SELECT * FROM applications WHERE created_by = $1 ORDER BY created_at DESC",
    )
    .bind(principal.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationRow>, AppError> {
    principal.require(Capability::AdvancePipeline)?;

    let row: Option<ApplicationRow> = sqlx::query_as("SELECT * FROM applications WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}

/// PUT /api/v1/applications/:id/:action
///
/// action ∈ {review, schedule, offer, hire, reject}.
pub async fn handle_application_transition(
    State(state): State<AppState>,
    principal: Principal,
    Path((id, action)): Path<(Uuid, String)>,
    body: Option<Json<TransitionRequest>>,
) -> Result<Json<ApplicationRow>, AppError> {
    principal.require(Capability::AdvancePipeline)?;

    let action = ApplicationAction::parse(&action)
        .ok_or_else(|| AppError::Validation(format!("unknown application action '{action}'")))?;
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let payload = TransitionPayload {
        note: request.note,
        schedule_at: request.schedule_at,
    };
    let updated = transition_application(&state.db, id, action, &principal, &payload).await?;

    Ok(Json(updated))
}
