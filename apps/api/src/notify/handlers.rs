//! Inbox handlers: the read side of the notification relay.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::Principal;
use crate::errors::AppError;
use crate::models::notification::NotificationRow;
use crate::state::AppState;

/// GET /api/v1/notifications
///
/// The caller's inbox, newest first. Addressing is by email, matching how
/// the relay writes messages.
pub async fn handle_list_notifications(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<NotificationRow>>, AppError> {
    let rows: Vec<NotificationRow> = sqlx::query_as(
        "SELECT * FROM notifications WHERE to_email = $1 ORDER BY created_at DESC",
    )
    .bind(&principal.email)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

/// PUT /api/v1/notifications/:id/read
pub async fn handle_mark_notification_read(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationRow>, AppError> {
    let row: Option<NotificationRow> = sqlx::query_as(
        r#"
        UPDATE notifications
        SET status = 'read'
        WHERE id = $1 AND to_email = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&principal.email)
    .fetch_optional(&state.db)
    .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Notification {id} not found")))
}
