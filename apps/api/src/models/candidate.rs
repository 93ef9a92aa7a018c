#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A candidate moving through the hiring pipeline. Never hard-deleted:
/// `Rejected` is terminal but the row is retained for audit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub applied_role: String,
    pub status: String,
    pub resume_id: Option<Uuid>,
    pub submitted_by: Uuid,
    /// Append-only list of `{by, text, date}` notes. Entries are never
    /// rewritten or reordered.
    pub history: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A candidate applied to a concrete position under an employer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub position_id: Uuid,
    pub status: String,
    pub onboarding_status: String,
    /// Append-only communication log, same shape as candidate history.
    pub communication: Value,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry in a candidate history / application communication log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryNote {
    pub by: String,
    pub text: String,
    pub date: DateTime<Utc>,
}
