//! Axum route handlers for interview scheduling.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::{Capability, Principal};
use crate::errors::AppError;
use crate::interviews::scheduler::{
    self, InterviewDraft, InterviewPatch, InterviewResult, InterviewStatus,
};
use crate::models::interview::InterviewRow;
use crate::notify::relay;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateInterviewRequest {
    #[serde(alias = "candidateId")]
    pub candidate_id: Uuid,
    #[serde(alias = "positionId")]
    pub position_id: Option<Uuid>,
    #[serde(default, alias = "jobPosition")]
    pub job_position: String,
    #[serde(default)]
    pub interviewer: String,
    #[serde(alias = "scheduledAt")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub result: Option<String>,
    pub rating: Option<i16>,
    pub feedback: Option<String>,
    /// Ephemeral instruction, not persisted: `true` or `"true"` requests a
    /// manager notification after the write.
    #[serde(alias = "notifyManager")]
    pub notify_manager: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateInterviewRequest {
    #[serde(alias = "positionId")]
    pub position_id: Option<Uuid>,
    #[serde(alias = "jobPosition")]
    pub job_position: Option<String>,
    pub interviewer: Option<String>,
    #[serde(alias = "scheduledAt")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub result: Option<String>,
    pub rating: Option<i16>,
    pub feedback: Option<String>,
    #[serde(alias = "notifyManager")]
    pub notify_manager: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct InterviewListQuery {
    #[serde(alias = "candidateId")]
    pub candidate_id: Uuid,
}

fn parse_status(s: &str) -> Result<InterviewStatus, AppError> {
    InterviewStatus::parse(s)
        .ok_or_else(|| AppError::Validation(format!("unknown interview status '{s}'")))
}

fn parse_result(s: &str) -> Result<InterviewResult, AppError> {
    InterviewResult::parse(s)
        .ok_or_else(|| AppError::Validation(format!("unknown interview result '{s}'")))
}

/// POST /api/v1/interviews
///
/// Creates an interview; when the request asks for it, notifies the manager
/// owning the related position. The notification is fire-and-forget.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    principal: Principal,
    Json(request): Json<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<InterviewRow>), AppError> {
    principal.require(Capability::ScheduleInterviews)?;

    if request.job_position.trim().is_empty() {
        return Err(AppError::Validation("job_position is required".to_string()));
    }
    if request.interviewer.trim().is_empty() {
        return Err(AppError::Validation("interviewer is required".to_string()));
    }

    let draft = InterviewDraft {
        candidate_id: request.candidate_id,
        position_id: request.position_id,
        job_position: request.job_position.trim().to_string(),
        interviewer: request.interviewer.trim().to_string(),
        scheduled_at: request.scheduled_at,
        status: request
            .status
            .as_deref()
            .map(parse_status)
            .transpose()?
            .unwrap_or(InterviewStatus::Scheduled),
        result: request
            .result
            .as_deref()
            .map(parse_result)
            .transpose()?
            .unwrap_or(InterviewResult::Pending),
        rating: scheduler::validate_rating(request.rating.unwrap_or(0))?,
        feedback: request.feedback,
    };

    let row = scheduler::create(&state.db, draft).await?;

    if relay::wants_manager_notification(request.notify_manager.as_ref()) {
        relay::notify_interview_update(&state.db, &row).await;
    }

    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/interviews/:id
pub async fn handle_update_interview(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    body: Option<Json<UpdateInterviewRequest>>,
) -> Result<Json<InterviewRow>, AppError> {
    principal.require(Capability::ScheduleInterviews)?;

    let request = body.map(|Json(r)| r).unwrap_or_default();

    let patch = InterviewPatch {
        position_id: request.position_id,
        job_position: request.job_position,
        interviewer: request.interviewer,
        scheduled_at: request.scheduled_at,
        status: request.status.as_deref().map(parse_status).transpose()?,
        result: request.result.as_deref().map(parse_result).transpose()?,
        rating: request.rating.map(scheduler::validate_rating).transpose()?,
        feedback: request.feedback,
    };

    let row = scheduler::update(&state.db, id, patch).await?;

    if relay::wants_manager_notification(request.notify_manager.as_ref()) {
        relay::notify_interview_update(&state.db, &row).await;
    }

    Ok(Json(row))
}

/// GET /api/v1/interviews?candidate_id=...
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    principal: Principal,
    Query(params): Query<InterviewListQuery>,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    principal.require(Capability::ScheduleInterviews)?;
    let rows = scheduler::list_for_candidate(&state.db, params.candidate_id).await?;
    Ok(Json(rows))
}
