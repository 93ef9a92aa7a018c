#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An inbox message produced by the notification relay.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub to_email: String,
    pub subject: String,
    pub body: String,
    /// "unread" | "read"
    pub status: String,
    pub created_at: DateTime<Utc>,
}
