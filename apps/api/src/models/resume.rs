#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An uploaded resume. At most one row per `user_id` carries
/// `is_active = true`; activation is a single conditional UPDATE.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    /// Opaque blob-store key for the uploaded file.
    pub file_key: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
