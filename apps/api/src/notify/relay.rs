//! Recipient resolution and inbox message construction.

use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::InterviewRow;
use crate::positions::registry;
use crate::users;

/// Interprets the ephemeral `notify_manager` request field.
///
/// Clients send it as a JSON boolean or as the string "true"; both mean
/// notify. Every other value, including "false" and absence, means skip.
pub fn wants_manager_notification(flag: Option<&Value>) -> bool {
    match flag {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

pub struct ManagerMessage {
    pub subject: String,
    pub body: String,
}

/// Fixed inbox message template for an interview create/update.
pub fn render_manager_message(candidate_name: &str, interview: &InterviewRow) -> ManagerMessage {
    let feedback = interview.feedback.as_deref().unwrap_or("(none)");
    ManagerMessage {
        subject: format!(
            "Interview update: {candidate_name} - {}",
            interview.job_position
        ),
        body: format!(
            "Interview update for {candidate_name} ({}).\n\
             Interviewer: {}\n\
             Status: {}\n\
             Result: {}\n\
             Rating: {}/5\n\
             Feedback: {feedback}",
            interview.job_position,
            interview.interviewer,
            interview.status,
            interview.result,
            interview.rating,
        ),
    }
}

/// Notifies the hiring manager who owns the interview's position.
///
/// Best-effort: an unresolvable recipient or a failed insert is logged and
/// dropped. The caller's interview write has already committed and its
/// response must not change.
pub async fn notify_interview_update(pool: &PgPool, interview: &InterviewRow) {
    let outcome: Result<(), AppError> = async {
        let Some(to_email) = resolve_manager_email(pool, interview).await? else {
            return Ok(());
        };

        let candidate_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM candidates WHERE id = $1")
                .bind(interview.candidate_id)
                .fetch_optional(pool)
                .await?;
        let candidate_name = candidate_name.unwrap_or_else(|| "Unknown candidate".to_string());

        let message = render_manager_message(&candidate_name, interview);
        enqueue(pool, &to_email, &message).await?;
        info!(
            "manager notification for interview {} delivered to {to_email}",
            interview.id
        );
        Ok(())
    }
    .await;

    if let Err(e) = outcome {
        warn!(
            "manager notification for interview {} dropped (interview write unaffected): {e}",
            interview.id
        );
    }
}

/// Finds the email of the manager owning the interview's position.
///
/// Prefers the id link; falls back to an exact title match on the stored
/// `job_position` string. The title path is a legacy lookup: duplicate or
/// renamed titles make it miss, in which case the notification is skipped.
async fn resolve_manager_email(
    pool: &PgPool,
    interview: &InterviewRow,
) -> Result<Option<String>, AppError> {
    let position = match interview.position_id {
        Some(position_id) => registry::find_by_id(pool, position_id).await?,
        None => None,
    };
    let position = match position {
        Some(p) => Some(p),
        None => registry::find_by_title(pool, &interview.job_position).await?,
    };

    let Some(position) = position else {
        warn!(
            "no position matches interview {} (job_position '{}'), skipping notification",
            interview.id, interview.job_position
        );
        return Ok(None);
    };

    let Some(email) = users::find_email(pool, position.created_by).await? else {
        warn!(
            "position '{}' creator {} has no known email, skipping notification",
            position.title, position.created_by
        );
        return Ok(None);
    };

    Ok(Some(email))
}

/// Writes an unread inbox message.
pub async fn enqueue(pool: &PgPool, to_email: &str, message: &ManagerMessage) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO notifications (id, to_email, subject, body, status)
        VALUES ($1, $2, $3, $4, 'unread')
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(to_email)
    .bind(&message.subject)
    .bind(&message.body)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_notify_flag_boolean_true() {
        assert!(wants_manager_notification(Some(&json!(true))));
    }

    #[test]
    fn test_notify_flag_string_true() {
        assert!(wants_manager_notification(Some(&json!("true"))));
    }

    #[test]
    fn test_notify_flag_falsy_values() {
        assert!(!wants_manager_notification(Some(&json!(false))));
        assert!(!wants_manager_notification(Some(&json!("false"))));
        assert!(!wants_manager_notification(Some(&json!("True"))));
        assert!(!wants_manager_notification(Some(&json!("yes"))));
        assert!(!wants_manager_notification(Some(&json!(1))));
        assert!(!wants_manager_notification(Some(&json!(null))));
        assert!(!wants_manager_notification(None));
    }

    fn interview() -> InterviewRow {
        InterviewRow {
            id: Uuid::new_v4(),
            candidate_id: Uuid::new_v4(),
            position_id: None,
            job_position: "Backend Developer".to_string(),
            interviewer: "Dana Reyes".to_string(),
            scheduled_at: None,
            status: "Completed".to_string(),
            result: "Pass".to_string(),
            rating: 4,
            feedback: Some("Strong systems knowledge".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_message_template_fields() {
        let msg = render_manager_message("Ada Park", &interview());
        assert_eq!(msg.subject, "Interview update: Ada Park - Backend Developer");
        assert!(msg.body.contains("Ada Park (Backend Developer)"));
        assert!(msg.body.contains("Interviewer: Dana Reyes"));
        assert!(msg.body.contains("Status: Completed"));
        assert!(msg.body.contains("Result: Pass"));
        assert!(msg.body.contains("Rating: 4/5"));
        assert!(msg.body.contains("Feedback: Strong systems knowledge"));
    }

    #[test]
    fn test_message_template_without_feedback() {
        let mut iv = interview();
        iv.feedback = None;
        let msg = render_manager_message("Ada Park", &iv);
        assert!(msg.body.contains("Feedback: (none)"));
    }
}
