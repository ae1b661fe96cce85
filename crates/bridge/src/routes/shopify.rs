//! Shopify order finalization route.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Serialize;

use crate::error::Result;
use crate::orders::{FinalizeOrderRequest, FinalizedOrder, finalize_order};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FinalizeOrderResponse {
    pub ok: bool,
    pub order: FinalizedOrder,
}

/// Turn a captured PayPal payment into a completed Shopify order.
pub async fn order_from_paypal(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FinalizeOrderRequest>, JsonRejection>,
) -> Result<Json<FinalizeOrderResponse>> {
    let Json(request) = payload?;
    let order = finalize_order(state.admin(), request).await?;
    Ok(Json(FinalizeOrderResponse { ok: true, order }))
}
