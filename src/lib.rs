//! Library entrypoint for TradeRelay.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

pub mod config;
pub mod models;

pub mod services;

pub mod controllers;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use services::amp_client::AmpLiveClient;
use services::order_relay::OrderRelay;
use services::order_store::OrderStore;
use services::simulated_broker::SimulatedBroker;

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub relay: OrderRelay,
}

/// Wires the relay from settings: the AMP Live channel (configured or not,
/// depending on credentials), the simulated fallback and a fresh store.
pub fn build_state(settings: config::Settings) -> AppState {
    let channel = Arc::new(AmpLiveClient::from_settings(&settings));
    let simulator = SimulatedBroker::new(Duration::from_millis(settings.simulated_fill_delay_ms));

    let relay = OrderRelay::new(
        OrderStore::new(),
        channel,
        simulator,
        Duration::from_millis(settings.broker_timeout_ms),
    );

    AppState { settings, relay }
}
