use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::AppState;

// GET /health — always 200 while the process is up; does not depend on
// the execution channel being configured or reachable.
pub async fn health(State(state): State<AppState>) -> Response {
    let (pending, total) = state.relay.store().counts();

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": Utc::now(),
            "pendingOrders": pending,
            "totalOrders": total,
        })),
    )
        .into_response()
}
