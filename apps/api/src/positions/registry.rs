use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::position::PositionRow;

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<PositionRow>, AppError> {
    Ok(sqlx::query_as("SELECT * FROM positions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

/// Exact title match. Titles are not unique; with duplicates the newest
/// posting wins, which is as good as this lookup gets.
pub async fn find_by_title(pool: &PgPool, title: &str) -> Result<Option<PositionRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM positions WHERE title = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(title)
    .fetch_optional(pool)
    .await?)
}

pub async fn create(
    pool: &PgPool,
    title: &str,
    department: Option<&str>,
    description: Option<&str>,
    created_by: Uuid,
) -> Result<PositionRow, AppError> {
    Ok(sqlx::query_as(
        r#"
        INSERT INTO positions (id, title, department, description, created_by, open)
        VALUES ($1, $2, $3, $4, $5, true)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(department)
    .bind(description)
    .bind(created_by)
    .fetch_one(pool)
    .await?)
}

pub async fn list_open(pool: &PgPool) -> Result<Vec<PositionRow>, AppError> {
    Ok(
        sqlx::query_as("SELECT * FROM positions WHERE open ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?,
    )
}
