use axum::{
    routing::{get, post},
    Router,
};

use crate::{controllers::orders_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/execute-order", post(orders_controller::post_execute_order))
        .route("/api/orders", get(orders_controller::get_orders))
        .route("/api/orders/:id", get(orders_controller::get_order))
}
