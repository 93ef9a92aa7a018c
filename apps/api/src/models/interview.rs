#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An interview session for a candidate on a position.
///
/// `position_id` is the preferred link; `job_position` keeps the title
/// snapshot used by the legacy title-match notification lookup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub position_id: Option<Uuid>,
    pub job_position: String,
    pub interviewer: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: String,
    pub result: String,
    pub rating: i16,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
