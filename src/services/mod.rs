pub mod amp_client;
pub mod execution_channel;
pub mod order_relay;
pub mod order_store;
pub mod simulated_broker;
