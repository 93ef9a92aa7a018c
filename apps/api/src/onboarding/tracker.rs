use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::onboarding::OnboardingRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStatus {
    Initiated,
    Pending,
    InProgress,
    Completed,
}

impl OnboardingStatus {
    pub fn parse(s: &str) -> Option<OnboardingStatus> {
        match s {
            "Initiated" => Some(OnboardingStatus::Initiated),
            "Pending" => Some(OnboardingStatus::Pending),
            "In Progress" => Some(OnboardingStatus::InProgress),
            "Completed" => Some(OnboardingStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStatus::Initiated => "Initiated",
            OnboardingStatus::Pending => "Pending",
            OnboardingStatus::InProgress => "In Progress",
            OnboardingStatus::Completed => "Completed",
        }
    }
}

/// Parses a status a caller may set. `Initiated` is the seeded start state
/// and only ever written by the hire transition. Beyond that the progression
/// is free: any settable status may follow any other.
pub fn parse_settable_status(s: &str) -> Result<OnboardingStatus, AppError> {
    match OnboardingStatus::parse(s) {
        Some(OnboardingStatus::Initiated) | None => Err(AppError::Validation(format!(
            "onboarding status must be one of Pending, In Progress, Completed (got '{s}')"
        ))),
        Some(status) => Ok(status),
    }
}

/// Onboarding records for hires on applications created by `owner_id`.
pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<OnboardingRow>, AppError> {
    Ok(sqlx::query_as(
        r#"
        SELECT o.*
        FROM onboardings o
        JOIN applications a ON a.id = o.application_id
        WHERE a.created_by = $1
        ORDER BY o.created_at DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?)
}

/// Updates an onboarding record the caller owns through its application.
/// Records outside the caller's scope are indistinguishable from missing.
pub async fn set_status(
    pool: &PgPool,
    id: Uuid,
    status: OnboardingStatus,
    owner_id: Uuid,
) -> Result<OnboardingRow, AppError> {
    let row: Option<OnboardingRow> = sqlx::query_as(
        r#"
        UPDATE onboardings
        SET status = $2, updated_at = now()
        WHERE id = $1
          AND application_id IN (SELECT id FROM applications WHERE created_by = $3)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| AppError::NotFound(format!("Onboarding record {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in [
            OnboardingStatus::Initiated,
            OnboardingStatus::Pending,
            OnboardingStatus::InProgress,
            OnboardingStatus::Completed,
        ] {
            assert_eq!(OnboardingStatus::parse(s.as_str()), Some(s));
        }
    }

    #[test]
    fn test_settable_statuses() {
        assert_eq!(
            parse_settable_status("Pending").unwrap(),
            OnboardingStatus::Pending
        );
        assert_eq!(
            parse_settable_status("In Progress").unwrap(),
            OnboardingStatus::InProgress
        );
        assert_eq!(
            parse_settable_status("Completed").unwrap(),
            OnboardingStatus::Completed
        );
    }

    #[test]
    fn test_initiated_is_not_settable() {
        assert!(parse_settable_status("Initiated").is_err());
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(parse_settable_status("Done").is_err());
        assert!(parse_settable_status("in progress").is_err());
    }
}
