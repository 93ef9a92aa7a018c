#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An open job posting. `created_by` identifies the hiring manager who owns
/// it and is the join used to resolve notification recipients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PositionRow {
    pub id: Uuid,
    pub title: String,
    pub department: Option<String>,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub open: bool,
    pub created_at: DateTime<Utc>,
}
