use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{services::order_relay::ManualOrderPayload, AppState};

// POST /api/execute-order
pub async fn post_execute_order(
    State(state): State<AppState>,
    Json(payload): Json<ManualOrderPayload>,
) -> Response {
    let order_id = match state.relay.receive_manual_order(payload) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "rejected manual order");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing required order fields" })),
            )
                .into_response();
        }
    };

    // The record exists (still Pending) before the intake call returned,
    // so this lookup cannot miss. Echoes the intake price/timestamp; the
    // actual execution outcome lands asynchronously.
    let Some(order) = state.relay.store().get(order_id) else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
            .into_response();
    };

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Order queued for execution",
            "orderId": order_id,
            "executionPrice": order.price,
            "executionTime": order.timestamp,
        })),
    )
        .into_response()
}

// GET /api/orders
pub async fn get_orders(State(state): State<AppState>) -> Response {
    let snapshot = state.relay.store().list();

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "pending": snapshot.pending,
            "total": snapshot.total,
            "orders": snapshot.orders,
        })),
    )
        .into_response()
}

// GET /api/orders/:id
pub async fn get_order(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.relay.store().get(id) {
        Some(order) => (
            StatusCode::OK,
            Json(json!({ "success": true, "order": order })),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Order not found" })),
        )
            .into_response(),
    }
}
