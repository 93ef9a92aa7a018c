//! Axum route handlers for the purchase order gate.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{Capability, Principal};
use crate::errors::AppError;
use crate::models::purchase_order::PurchaseOrderRow;
use crate::purchase_orders::gate::{self, PoStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderRequest {
    #[serde(default)]
    pub vendor: String,
    pub description: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SetPoStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// POST /api/v1/purchase-orders
pub async fn handle_create_purchase_order(
    State(state): State<AppState>,
    principal: Principal,
    Json(request): Json<CreatePurchaseOrderRequest>,
) -> Result<(StatusCode, Json<PurchaseOrderRow>), AppError> {
    principal.require(Capability::ApprovePurchaseOrders)?;

    if request.vendor.trim().is_empty() {
        return Err(AppError::Validation("vendor is required".to_string()));
    }
    if let Some(amount) = request.amount {
        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::Validation(
                "amount must be a non-negative number".to_string(),
            ));
        }
    }

    let row = gate::create(
        &state.db,
        request.vendor.trim(),
        request.description.as_deref(),
        request.amount,
        principal.id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/purchase-orders
pub async fn handle_list_purchase_orders(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<PurchaseOrderRow>>, AppError> {
    principal.require(Capability::ApprovePurchaseOrders)?;
    let rows = gate::list_for_owner(&state.db, principal.id).await?;
    Ok(Json(rows))
}

/// PUT /api/v1/purchase-orders/:id
///
/// Body `{ "status": "Approved" | "Rejected" }`. Re-applying the status a
/// settled order already has returns it unchanged.
pub async fn handle_set_purchase_order_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(request): Json<SetPoStatusRequest>,
) -> Result<Json<PurchaseOrderRow>, AppError> {
    principal.require(Capability::ApprovePurchaseOrders)?;

    let requested = match PoStatus::parse(&request.status) {
        Some(status) if status.is_terminal() => status,
        _ => {
            return Err(AppError::Validation(format!(
                "status must be Approved or Rejected (got '{}')",
                request.status
            )))
        }
    };

    let row = gate::apply_status(&state.db, id, requested).await?;
    Ok(Json(row))
}
