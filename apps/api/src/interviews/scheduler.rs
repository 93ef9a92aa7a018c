//! Interview persistence and field validation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::InterviewRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub fn parse(s: &str) -> Option<InterviewStatus> {
        match s {
            "Scheduled" => Some(InterviewStatus::Scheduled),
            "Completed" => Some(InterviewStatus::Completed),
            "Cancelled" => Some(InterviewStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "Scheduled",
            InterviewStatus::Completed => "Completed",
            InterviewStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewResult {
    Pending,
    Pass,
    Fail,
}

impl InterviewResult {
    pub fn parse(s: &str) -> Option<InterviewResult> {
        match s {
            "Pending" => Some(InterviewResult::Pending),
            "Pass" => Some(InterviewResult::Pass),
            "Fail" => Some(InterviewResult::Fail),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewResult::Pending => "Pending",
            InterviewResult::Pass => "Pass",
            InterviewResult::Fail => "Fail",
        }
    }
}

/// Ratings are a 0-5 scale.
pub fn validate_rating(rating: i16) -> Result<i16, AppError> {
    if (0..=5).contains(&rating) {
        Ok(rating)
    } else {
        Err(AppError::Validation(format!(
            "rating must be between 0 and 5, got {rating}"
        )))
    }
}

/// Validated fields for a new interview.
#[derive(Debug)]
pub struct InterviewDraft {
    pub candidate_id: Uuid,
    pub position_id: Option<Uuid>,
    pub job_position: String,
    pub interviewer: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: InterviewStatus,
    pub result: InterviewResult,
    pub rating: i16,
    pub feedback: Option<String>,
}

pub async fn create(pool: &PgPool, draft: InterviewDraft) -> Result<InterviewRow, AppError> {
    let candidate: Option<Uuid> = sqlx::query_scalar("SELECT id FROM candidates WHERE id = $1")
        .bind(draft.candidate_id)
        .fetch_optional(pool)
        .await?;
    if candidate.is_none() {
        return Err(AppError::NotFound(format!(
            "Candidate {} not found",
            draft.candidate_id
        )));
    }

    let row: InterviewRow = sqlx::query_as(
        r#"
        INSERT INTO interviews
            (id, candidate_id, position_id, job_position, interviewer,
             scheduled_at, status, result, rating, feedback)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(draft.candidate_id)
    .bind(draft.position_id)
    .bind(&draft.job_position)
    .bind(&draft.interviewer)
    .bind(draft.scheduled_at)
    .bind(draft.status.as_str())
    .bind(draft.result.as_str())
    .bind(draft.rating)
    .bind(&draft.feedback)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Partial update; only provided fields change.
#[derive(Debug, Default)]
pub struct InterviewPatch {
    pub position_id: Option<Uuid>,
    pub job_position: Option<String>,
    pub interviewer: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<InterviewStatus>,
    pub result: Option<InterviewResult>,
    pub rating: Option<i16>,
    pub feedback: Option<String>,
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: InterviewPatch,
) -> Result<InterviewRow, AppError> {
    let existing: Option<InterviewRow> = sqlx::query_as("SELECT * FROM interviews WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let existing = existing.ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;

    let row: InterviewRow = sqlx::query_as(
        r#"
        UPDATE interviews
        SET position_id = $2, job_position = $3, interviewer = $4, scheduled_at = $5,
            status = $6, result = $7, rating = $8, feedback = $9, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(patch.position_id.or(existing.position_id))
    .bind(patch.job_position.unwrap_or(existing.job_position))
    .bind(patch.interviewer.unwrap_or(existing.interviewer))
    .bind(patch.scheduled_at.or(existing.scheduled_at))
    .bind(
        patch
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or(existing.status),
    )
    .bind(
        patch
            .result
            .map(|r| r.as_str().to_string())
            .unwrap_or(existing.result),
    )
    .bind(patch.rating.unwrap_or(existing.rating))
    .bind(patch.feedback.or(existing.feedback))
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_for_candidate(
    pool: &PgPool,
    candidate_id: Uuid,
) -> Result<Vec<InterviewRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM interviews WHERE candidate_id = $1 ORDER BY created_at DESC",
    )
    .bind(candidate_id)
    .fetch_all(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(0).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(-1).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_result_parse() {
        assert_eq!(InterviewResult::parse("Pass"), Some(InterviewResult::Pass));
        assert_eq!(InterviewResult::parse("Fail"), Some(InterviewResult::Fail));
        assert_eq!(InterviewResult::parse("pass"), None);
        assert_eq!(InterviewResult::parse("Maybe"), None);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            InterviewStatus::parse("Scheduled"),
            Some(InterviewStatus::Scheduled)
        );
        assert_eq!(InterviewStatus::parse("Rescheduled"), None);
    }
}
