#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Onboarding progress for a hired candidate. One row per candidate,
/// seeded at `Initiated` when the hire transition lands.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OnboardingRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub application_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
