use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::purchase_order::PurchaseOrderRow;
use crate::pipeline::status::TransitionDenied;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoStatus {
    Pending,
    Approved,
    Rejected,
}

impl PoStatus {
    pub fn parse(s: &str) -> Option<PoStatus> {
        match s {
            "Pending" => Some(PoStatus::Pending),
            "Approved" => Some(PoStatus::Approved),
            "Rejected" => Some(PoStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PoStatus::Pending => "Pending",
            PoStatus::Approved => "Approved",
            PoStatus::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PoStatus::Approved | PoStatus::Rejected)
    }

    fn verb(&self) -> &'static str {
        match self {
            PoStatus::Pending => "reopen",
            PoStatus::Approved => "approve",
            PoStatus::Rejected => "reject",
        }
    }
}

/// What applying a requested status to the current one should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoDecision {
    /// Persist the requested status.
    Apply,
    /// Terminal order already carries the requested status; return it as-is.
    Noop,
}

/// Shared transition discipline with the pipeline: terminal states are
/// validated everywhere, but a repeated terminal status is idempotent
/// rather than an error.
pub fn decide(current: PoStatus, requested: PoStatus) -> Result<PoDecision, TransitionDenied> {
    if current.is_terminal() {
        if requested == current {
            return Ok(PoDecision::Noop);
        }
        return Err(TransitionDenied {
            action: requested.verb(),
            entity: "purchase order",
            status: current.as_str(),
        });
    }
    Ok(PoDecision::Apply)
}

/// Human-readable order number: date plus a short random suffix.
pub fn generate_po_number() -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(6)
        .collect::<String>()
        .to_uppercase();
    format!("PO-{}-{suffix}", Utc::now().format("%Y%m%d"))
}

pub async fn create(
    pool: &PgPool,
    vendor: &str,
    description: Option<&str>,
    amount: Option<f64>,
    created_by: Uuid,
) -> Result<PurchaseOrderRow, AppError> {
    Ok(sqlx::query_as(
        r#"
        INSERT INTO purchase_orders
            (id, po_number, vendor, description, amount, status, created_by)
        VALUES ($1, $2, $3, $4, $5, 'Pending', $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(generate_po_number())
    .bind(vendor)
    .bind(description)
    .bind(amount)
    .bind(created_by)
    .fetch_one(pool)
    .await?)
}

/// Applies an approve/reject decision. The row is locked while the decision
/// is made so concurrent calls serialize.
pub async fn apply_status(
    pool: &PgPool,
    id: Uuid,
    requested: PoStatus,
) -> Result<PurchaseOrderRow, AppError> {
    let mut tx = pool.begin().await?;

    let row: Option<PurchaseOrderRow> =
        sqlx::query_as("SELECT * FROM purchase_orders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let row = row.ok_or_else(|| AppError::NotFound(format!("Purchase order {id} not found")))?;

    let current = PoStatus::parse(&row.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "purchase order {id} carries unrecognized status '{}'",
            row.status
        ))
    })?;

    let updated = match decide(current, requested)
        .map_err(|denied| AppError::InvalidTransition(denied.to_string()))?
    {
        PoDecision::Noop => row,
        PoDecision::Apply => {
            sqlx::query_as(
                r#"
                UPDATE purchase_orders
                SET status = $2, updated_at = now()
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(id)
            .bind(requested.as_str())
            .fetch_one(&mut *tx)
            .await?
        }
    };

    tx.commit().await?;
    Ok(updated)
}

pub async fn list_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<PurchaseOrderRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM purchase_orders WHERE created_by = $1 ORDER BY created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_accepts_both_outcomes() {
        assert_eq!(decide(PoStatus::Pending, PoStatus::Approved), Ok(PoDecision::Apply));
        assert_eq!(decide(PoStatus::Pending, PoStatus::Rejected), Ok(PoDecision::Apply));
    }

    #[test]
    fn test_repeated_terminal_status_is_noop() {
        assert_eq!(decide(PoStatus::Approved, PoStatus::Approved), Ok(PoDecision::Noop));
        assert_eq!(decide(PoStatus::Rejected, PoStatus::Rejected), Ok(PoDecision::Noop));
    }

    #[test]
    fn test_crossing_terminal_states_denied() {
        let err = decide(PoStatus::Approved, PoStatus::Rejected).unwrap_err();
        assert_eq!(err.to_string(), "cannot reject an approved purchase order");
        assert!(decide(PoStatus::Rejected, PoStatus::Approved).is_err());
    }

    #[test]
    fn test_terminal_cannot_reopen() {
        assert!(decide(PoStatus::Approved, PoStatus::Pending).is_err());
    }

    #[test]
    fn test_po_number_shape() {
        let number = generate_po_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "PO");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_po_numbers_are_unique() {
        assert_ne!(generate_po_number(), generate_po_number());
    }
}
