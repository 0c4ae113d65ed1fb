use std::time::Duration;

use tokio::time;

use crate::models::{OrderRecord, OrderStatus};
use crate::services::execution_channel::{ExecutionError, ExecutionReceipt};

pub const SIMULATED_BROKER_TAG: &str = "Simulated Broker (AMP Live Unavailable)";

/// Deterministic stand-in execution path. No external I/O beyond an
/// artificial delay; fills at the order's own price. It exists so every
/// accepted order can reach a terminal status even with no broker
/// configured, and its broker tag keeps such fills unmistakably simulated.
#[derive(Debug, Clone)]
pub struct SimulatedBroker {
    fill_delay: Duration,
}

impl SimulatedBroker {
    pub fn new(fill_delay: Duration) -> Self {
        Self { fill_delay }
    }

    /// Always succeeds. The `Result` is only there so the relay can drive
    /// the defensive `Failed` transition should that ever stop holding.
    pub async fn execute(&self, order: &OrderRecord) -> Result<ExecutionReceipt, ExecutionError> {
        tracing::info!(order_id = order.id, symbol = %order.symbol, "simulating order execution");

        time::sleep(self.fill_delay).await;

        Ok(ExecutionReceipt {
            broker: SIMULATED_BROKER_TAG.to_string(),
            status: OrderStatus::Filled,
            execution_price: order.price,
            external_order_id: None,
        })
    }
}
