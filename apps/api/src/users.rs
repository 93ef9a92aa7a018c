//! Local mirror of gateway-known users.
//!
//! The gateway owns authentication; this table only records enough identity
//! (id, email, name, role) to resolve `created_by` references to an inbox
//! address. Rows are upserted by the sync endpoint the gateway calls after
//! login.

use axum::{extract::State, Json};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::Principal;
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

/// Resolves a user id to their email. `None` when the user is unknown here
/// or has a blank email on record.
pub async fn find_email(pool: &PgPool, user_id: Uuid) -> Result<Option<String>, AppError> {
    let email: Option<String> = sqlx::query_scalar("SELECT email FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(email.filter(|e| !e.trim().is_empty()))
}

/// Upserts the acting principal without touching an existing display name.
/// Used where a write must reference the caller through a foreign key before
/// the gateway has synced them.
pub async fn ensure(pool: &PgPool, principal: &Principal) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO users (id, email, name, role)
        VALUES ($1, $2, '', $3)
        ON CONFLICT (id) DO UPDATE
        SET email = EXCLUDED.email, role = EXCLUDED.role
        "#,
    )
    .bind(principal.id)
    .bind(&principal.email)
    .bind(principal.role.as_str())
    .execute(pool)
    .await?;
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
pub struct SyncUserRequest {
    pub name: Option<String>,
}

/// POST /api/v1/users/sync
///
/// Upserts the calling principal into the local mirror. Idempotent; the
/// gateway invokes it on every login.
pub async fn handle_sync_user(
    State(state): State<AppState>,
    principal: Principal,
    body: Option<Json<SyncUserRequest>>,
) -> Result<Json<UserRow>, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let name = request.name.unwrap_or_default();

    let row: UserRow = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, name, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
        SET email = EXCLUDED.email,
            role = EXCLUDED.role,
            name = CASE WHEN EXCLUDED.name = '' THEN users.name ELSE EXCLUDED.name END
        RETURNING *
        "#,
    )
    .bind(principal.id)
    .bind(&principal.email)
    .bind(name.trim())
    .bind(principal.role.as_str())
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}
