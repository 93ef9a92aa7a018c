//! Persistence side of the pipeline: validates a transition, writes the new
//! status together with the appended note in one statement, and seeds the
//! onboarding record when a hire lands.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::auth::Principal;
use crate::errors::AppError;
use crate::models::candidate::{ApplicationRow, CandidateRow, HistoryNote};
use crate::pipeline::status::{
    next_application_status, next_candidate_status, ApplicationAction, ApplicationStatus,
    CandidateStatus, PipelineAction,
};

/// Optional request context for a transition.
#[derive(Debug, Default)]
pub struct TransitionPayload {
    pub note: Option<String>,
    pub schedule_at: Option<DateTime<Utc>>,
}

/// Applies `action` to a candidate and returns the updated row.
///
/// Status write and note append happen in a single UPDATE; the row is locked
/// for the duration of the transaction so concurrent transitions serialize.
pub async fn transition_candidate(
    pool: &PgPool,
    id: Uuid,
    action: PipelineAction,
    actor: &Principal,
    payload: &TransitionPayload,
) -> Result<CandidateRow, AppError> {
    let mut tx = pool.begin().await?;

    let row: Option<CandidateRow> =
        sqlx::query_as("SELECT * FROM candidates WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let row = row.ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    let current = CandidateStatus::parse(&row.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "candidate {id} carries unrecognized status '{}'",
            row.status
        ))
    })?;

    let next = next_candidate_status(current, action, payload.schedule_at.is_some())
        .map_err(|denied| AppError::InvalidTransition(denied.to_string()))?;

    // Appending an empty array is a no-op, so the note-less case shares the query.
    let appended = note_entries(actor, payload.note.as_deref());

    let updated: CandidateRow = sqlx::query_as(
        r#"
        UPDATE candidates
        SET status = $2, history = history || $3, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(next.as_str())
    .bind(&appended)
    .fetch_one(&mut *tx)
    .await?;

    if next == CandidateStatus::Hired {
        seed_onboarding(&mut tx, id, None).await?;
    }

    tx.commit().await?;

    info!(
        "candidate {id} moved {} -> {} by {}",
        current.as_str(),
        next.as_str(),
        actor.email
    );
    Ok(updated)
}

/// Applies `action` to an application. A hire also marks the application's
/// own onboarding field pending and seeds the candidate's onboarding record.
pub async fn transition_application(
    pool: &PgPool,
    id: Uuid,
    action: ApplicationAction,
    actor: &Principal,
    payload: &TransitionPayload,
) -> Result<ApplicationRow, AppError> {
    let mut tx = pool.begin().await?;

    let row: Option<ApplicationRow> =
        sqlx::query_as("SELECT * FROM applications WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let row = row.ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    let current = ApplicationStatus::parse(&row.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "application {id} carries unrecognized status '{}'",
            row.status
        ))
    })?;

    let next = next_application_status(current, action)
        .map_err(|denied| AppError::InvalidTransition(denied.to_string()))?;

    let appended = note_entries(actor, payload.note.as_deref());

    let updated: ApplicationRow = if next == ApplicationStatus::Hired {
        sqlx::query_as(
            r#"
            UPDATE applications
            SET status = $2, onboarding_status = 'Pending',
                communication = communication || $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(next.as_str())
        .bind(&appended)
        .fetch_one(&mut *tx)
        .await?
    } else {
        sqlx::query_as(
            r#"
            UPDATE applications
            SET status = $2, communication = communication || $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(next.as_str())
        .bind(&appended)
        .fetch_one(&mut *tx)
        .await?
    };

    if next == ApplicationStatus::Hired {
        seed_onboarding(&mut tx, row.candidate_id, Some(id)).await?;
    }

    tx.commit().await?;

    info!(
        "application {id} moved {} -> {} by {}",
        current.as_str(),
        next.as_str(),
        actor.email
    );
    Ok(updated)
}

/// Creates the hired candidate's onboarding record at `Initiated`, or touches
/// the existing one. An already-advanced onboarding status is left alone.
async fn seed_onboarding(
    tx: &mut Transaction<'_, Postgres>,
    candidate_id: Uuid,
    application_id: Option<Uuid>,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO onboardings (id, candidate_id, application_id, status)
        VALUES ($1, $2, $3, 'Initiated')
        ON CONFLICT (candidate_id) DO UPDATE
        SET updated_at = now(),
            application_id = COALESCE(onboardings.application_id, EXCLUDED.application_id)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(candidate_id)
    .bind(application_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

fn note_entries(actor: &Principal, note: Option<&str>) -> serde_json::Value {
    match note {
        Some(text) => serde_json::json!([HistoryNote {
            by: actor.email.clone(),
            text: text.to_string(),
            date: Utc::now(),
        }]),
        None => serde_json::json!([]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    fn actor() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            role: Role::HiringManager,
            email: "mgr@example.com".to_string(),
        }
    }

    #[test]
    fn test_note_entries_with_note() {
        let entries = note_entries(&actor(), Some("looks good"));
        let arr = entries.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["by"], "mgr@example.com");
        assert_eq!(arr[0]["text"], "looks good");
        assert!(arr[0]["date"].is_string());
    }

    #[test]
    fn test_note_entries_without_note_is_empty() {
        let entries = note_entries(&actor(), None);
        assert_eq!(entries.as_array().unwrap().len(), 0);
    }
}
