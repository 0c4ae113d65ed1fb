use axum::Router;

use crate::AppState;

pub mod home_routes;
pub mod orders_routes;
pub mod webhook_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = webhook_routes::add_routes(router);
    let router = orders_routes::add_routes(router);

    router.with_state(state)
}
