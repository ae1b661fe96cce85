//! PayPal checkout routes.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use paypal_shopify_bridge_core::{Amount, CurrencyCode, NormalizedAddress};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::paypal::capture;
use crate::state::AppState;

/// Longest PayPal order ID accepted from the browser.
const MAX_ORDER_ID_LEN: usize = 64;

#[derive(Debug, Serialize)]
pub struct ClientTokenResponse {
    pub ok: bool,
    pub client_token: String,
}

/// Issue a client token for the PayPal JS SDK.
pub async fn client_token(State(state): State<AppState>) -> Result<Json<ClientTokenResponse>> {
    let client_token = state.paypal().generate_client_token().await?;
    Ok(Json(ClientTokenResponse {
        ok: true,
        client_token,
    }))
}

/// Body of `POST /api/paypal/create-order`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateOrderRequest {
    /// Order total, as a decimal string or number.
    pub value: Option<Value>,
    /// ISO 4217 code; `USD` when absent.
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub ok: bool,
    #[serde(rename = "orderID")]
    pub order_id: String,
}

/// Create a CAPTURE-intent PayPal order for the given total.
pub async fn create_order(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>> {
    let Json(request) = payload?;

    let amount = match request.value {
        None | Some(Value::Null) => return Err(AppError::BadRequest("value is required".into())),
        Some(Value::String(s)) => Amount::parse(&s),
        Some(Value::Number(n)) => Amount::parse(&n.to_string()),
        Some(_) => {
            return Err(AppError::BadRequest(
                "value must be a number or a string".into(),
            ));
        }
    }
    .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let currency = match request.currency.as_deref().map(str::trim) {
        None | Some("") => CurrencyCode::default(),
        Some(code) => CurrencyCode::parse(code).map_err(|e| AppError::BadRequest(e.to_string()))?,
    };

    let order_id = state.paypal().create_order(&amount, &currency).await?;
    Ok(Json(CreateOrderResponse { ok: true, order_id }))
}

/// Body of `POST /api/paypal/capture`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CaptureRequest {
    #[serde(rename = "paypalOrderId")]
    pub paypal_order_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureResponse {
    pub ok: bool,
    pub capture_id: String,
    pub address: NormalizedAddress,
    pub raw: Value,
}

/// Capture an approved order and return the buyer's normalized address.
pub async fn capture(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CaptureRequest>, JsonRejection>,
) -> Result<Json<CaptureResponse>> {
    let Json(request) = payload?;

    let order_id = request
        .paypal_order_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("paypalOrderId is required".into()))?;

    if !is_valid_order_id(order_id) {
        return Err(AppError::BadRequest("paypalOrderId is malformed".into()));
    }

    let raw = state.paypal().capture_order(order_id).await?;
    let normalized = capture::normalize(&raw);

    tracing::info!(
        paypal_order_id = %order_id,
        capture_id = %normalized.capture_id,
        "PayPal payment captured"
    );

    Ok(Json(CaptureResponse {
        ok: true,
        capture_id: normalized.capture_id,
        address: normalized.address,
        raw,
    }))
}

/// PayPal order IDs are short alphanumeric tokens; anything else would be
/// interpolated into the capture URL path.
fn is_valid_order_id(id: &str) -> bool {
    id.len() <= MAX_ORDER_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
