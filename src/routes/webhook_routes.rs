use axum::{routing::post, Router};

use crate::{controllers::webhook_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/webhook/tradingview",
        post(webhook_controller::post_tradingview_signal),
    )
}
