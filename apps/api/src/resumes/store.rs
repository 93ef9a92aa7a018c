use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::blobstore::FileStore;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;

/// Records an uploaded resume. All of the user's prior resumes are
/// deactivated in the same transaction, and the new row starts inactive —
/// activation is always an explicit follow-up call.
pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
    title: &str,
    file_key: &str,
) -> Result<ResumeRow, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE resumes SET is_active = false WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let row: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (id, user_id, title, file_key, is_active)
        VALUES ($1, $2, $3, $4, false)
        RETURNING *
        "#,
    )
    .bind(resume_id)
    .bind(user_id)
    .bind(title)
    .bind(file_key)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

/// Makes `resume_id` the user's single active resume.
///
/// The flip happens in one statement — `is_active = (id = $2)` across all of
/// the user's rows — so no reader ever observes zero or two active resumes.
pub async fn set_active(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<ResumeRow, AppError> {
    let owned: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    if owned.is_none() {
        return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
    }

    sqlx::query("UPDATE resumes SET is_active = (id = $2) WHERE user_id = $1")
        .bind(user_id)
        .bind(resume_id)
        .execute(pool)
        .await?;

    let row: ResumeRow = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_one(pool)
        .await?;
    Ok(row)
}

/// Returns the user's active resume, if any.
pub async fn get_active(pool: &PgPool, user_id: Uuid) -> Result<Option<ResumeRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM resumes WHERE user_id = $1 AND is_active ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

/// All of the user's resumes, newest first.
pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError> {
    Ok(
        sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await?,
    )
}

/// Deletes a resume and its backing file. A missing or unreachable blob does
/// not block metadata deletion.
pub async fn delete(
    pool: &PgPool,
    files: &dyn FileStore,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<(), AppError> {
    let row: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    let row = row.ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    // File absence is not an error; blob failures never block metadata removal.
    match files.exists(&row.file_key).await {
        Ok(true) => {
            if let Err(e) = files.delete(&row.file_key).await {
                warn!("resume {resume_id}: blob delete failed, removing metadata anyway: {e}");
            }
        }
        Ok(false) => debug!("resume {resume_id}: backing file already absent"),
        Err(e) => {
            warn!("resume {resume_id}: blob store unreachable, removing metadata anyway: {e}");
        }
    }

    sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(resume_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Reduces an uploaded filename to its final component and strips characters
/// that would corrupt a blob key.
pub fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('_').is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

/// Blob key layout for resume files.
pub fn file_key(user_id: Uuid, resume_id: Uuid, filename: &str) -> String {
    format!("resumes/{user_id}/{resume_id}/{filename}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_name() {
        assert_eq!(sanitize_filename("resume.pdf"), "resume.pdf");
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\cv.docx"), "cv.docx");
    }

    #[test]
    fn test_sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_filename("my resume (final).pdf"), "my_resume__final_.pdf");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "resume");
        assert_eq!(sanitize_filename("///"), "resume");
    }

    #[test]
    fn test_file_key_layout() {
        let user = Uuid::nil();
        let resume = Uuid::nil();
        assert_eq!(
            file_key(user, resume, "cv.pdf"),
            format!("resumes/{user}/{resume}/cv.pdf")
        );
    }
}
