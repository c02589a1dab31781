//! # Checkout Endpoint
//!
//! `POST /api/checkout` - the reason this server exists. Everything
//! else is catalog plumbing around it.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use saral_core::types::{CartLine, Rate};
use saral_core::validation::validate_discount_percent;
use saral_core::CoreError;
use saral_db::CheckoutRequest;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/checkout", post(checkout))
}

/// Request body for a checkout.
///
/// Everything but the cart is optional: a bare cart checks out as an
/// anonymous cash sale with no discount, taxed intra-state.
#[derive(Debug, Deserialize)]
pub struct CheckoutBody {
    pub cart: Vec<CartLine>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub customer_state: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Confirmation returned on success. All amounts are integer paise.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub bill_id: String,
    pub bill_number: String,
    pub customer_name: String,
    pub subtotal: i64,
    pub discount_amount: i64,
    pub gst_amount: i64,
    pub grand_total: i64,
}

/// POST /api/checkout - run one sale end to end.
pub async fn checkout(
    State(state): State<AppState>,
    Json(body): Json<CheckoutBody>,
) -> ApiResult<Json<CheckoutResponse>> {
    validate_discount_percent(body.discount_percent).map_err(CoreError::from)?;

    let request = CheckoutRequest {
        cart: body.cart,
        customer_id: body.customer_id,
        discount: Rate::from_percentage(body.discount_percent),
        customer_state: body.customer_state.unwrap_or_else(|| "Same".to_string()),
        payment_mode: body.payment_mode.unwrap_or_default(),
        user_id: body.user_id,
        username: body.username.unwrap_or_else(|| "Unknown".to_string()),
    };

    let receipt = state.db.checkout().process(request).await?;

    Ok(Json(CheckoutResponse {
        success: true,
        bill_id: receipt.bill_id,
        bill_number: receipt.bill_number,
        customer_name: receipt.customer_name,
        subtotal: receipt.totals.subtotal.paise(),
        discount_amount: receipt.totals.discount.paise(),
        gst_amount: receipt.totals.gst.paise(),
        grand_total: receipt.totals.grand_total.paise(),
    }))
}

// =============================================================================
// Handler Tests
// =============================================================================
