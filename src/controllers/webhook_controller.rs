use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{services::order_relay::SignalPayload, AppState};

// POST /webhook/tradingview
pub async fn post_tradingview_signal(
    State(state): State<AppState>,
    Json(payload): Json<SignalPayload>,
) -> Response {
    match state.relay.receive_signal(payload) {
        Ok(order_id) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Order received and queued for execution",
                "orderId": order_id,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "rejected trade signal");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid signal format" })),
            )
                .into_response()
        }
    }
}
