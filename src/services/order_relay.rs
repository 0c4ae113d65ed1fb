use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::time;

use crate::models::{OrderIntake, OrderRecord, OrderSource, ValidationError};
use crate::services::execution_channel::ExecutionChannel;
use crate::services::order_store::OrderStore;
use crate::services::simulated_broker::SimulatedBroker;

/// Inbound trade-signal notification (TradingView-style webhook body).
#[derive(Debug, Clone, Deserialize)]
pub struct SignalPayload {
    pub symbol: Option<String>,
    pub side: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    #[serde(rename = "orderType")]
    pub order_type: Option<String>,
    pub strategy: Option<String>,
    pub timeframe: Option<String>,
}

/// Direct manual submission body.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualOrderPayload {
    pub symbol: Option<String>,
    pub side: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub broker: Option<String>,
}

/// Accepts order intents, tracks them through the pending/history store and
/// drives each one through a single real-channel attempt with at most one
/// simulated fallback. Intake acknowledgment never waits on execution.
#[derive(Clone)]
pub struct OrderRelay {
    store: OrderStore,
    channel: Arc<dyn ExecutionChannel>,
    simulator: SimulatedBroker,
    broker_timeout: Duration,
    next_id: Arc<AtomicU64>,
}

impl OrderRelay {
    pub fn new(
        store: OrderStore,
        channel: Arc<dyn ExecutionChannel>,
        simulator: SimulatedBroker,
        broker_timeout: Duration,
    ) -> Self {
        Self {
            store,
            channel,
            simulator,
            broker_timeout,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    /// Whether the real execution channel is currently usable.
    pub fn channel_available(&self) -> bool {
        self.channel.is_available()
    }

    /// Signal intake: symbol, side and a positive price are required;
    /// quantity defaults to 1 when absent or non-positive.
    pub fn receive_signal(&self, payload: SignalPayload) -> Result<u64, ValidationError> {
        let symbol = payload
            .symbol
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField("symbol"))?;
        let side = payload
            .side
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField("side"))?;
        let price = match payload.price {
            Some(p) if p > 0.0 => p,
            _ => return Err(ValidationError::MissingField("price")),
        };
        let quantity = payload.quantity.filter(|q| *q > 0).unwrap_or(1);

        self.accept(OrderIntake {
            symbol,
            side,
            price,
            quantity,
            order_type: payload.order_type,
            source: OrderSource::SignalWebhook,
            strategy: Some(payload.strategy.unwrap_or_else(|| "Unknown".to_string())),
            timeframe: Some(payload.timeframe.unwrap_or_else(|| "Unknown".to_string())),
            broker: None,
        })
    }

    /// Manual intake: symbol, side and a positive quantity are required;
    /// price defaults to 0 (market execution decides the fill price).
    pub fn receive_manual_order(&self, payload: ManualOrderPayload) -> Result<u64, ValidationError> {
        let symbol = payload
            .symbol
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField("symbol"))?;
        let side = payload
            .side
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField("side"))?;
        let quantity = match payload.quantity {
            Some(q) if q > 0 => q,
            Some(_) => return Err(ValidationError::NonPositiveQuantity),
            None => return Err(ValidationError::MissingField("quantity")),
        };

        self.accept(OrderIntake {
            symbol,
            side,
            price: payload.price.unwrap_or(0.0),
            quantity,
            order_type: payload.order_type,
            source: OrderSource::ManualApi,
            strategy: None,
            timeframe: None,
            broker: Some(payload.broker.unwrap_or_else(|| "Unknown".to_string())),
        })
    }

    /// Validates the intake, tracks the record as pending and dispatches
    /// execution on its own task. Returns the assigned id immediately; on
    /// validation failure no record is created and nothing changes.
    fn accept(&self, intake: OrderIntake) -> Result<u64, ValidationError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = OrderRecord::new(id, intake)?;

        tracing::info!(
            order_id = id,
            symbol = %record.symbol,
            side = record.side.as_str(),
            quantity = record.quantity,
            source = ?record.source,
            "order accepted"
        );

        self.store.insert_pending(record.clone());

        let relay = self.clone();
        tokio::spawn(async move {
            relay.execute(record).await;
        });

        Ok(id)
    }

    /// One real-channel attempt (bounded by the submit timeout), then at
    /// most one simulated fallback. Every path ends with the record in
    /// history; `Failed` only happens if the simulator itself errors.
    async fn execute(&self, order: OrderRecord) {
        if self.channel.is_available() {
            match time::timeout(self.broker_timeout, self.channel.submit(&order)).await {
                Ok(Ok(receipt)) => {
                    tracing::info!(
                        order_id = order.id,
                        broker = %receipt.broker,
                        status = ?receipt.status,
                        "order handled by execution channel"
                    );
                    self.store.complete(order.id, &receipt);
                    return;
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        order_id = order.id,
                        channel = self.channel.name(),
                        error = %e,
                        "channel submission failed, falling back to simulation"
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        order_id = order.id,
                        channel = self.channel.name(),
                        timeout_ms = self.broker_timeout.as_millis() as u64,
                        "channel submission timed out, falling back to simulation"
                    );
                }
            }
        } else {
            tracing::info!(
                order_id = order.id,
                channel = self.channel.name(),
                "execution channel unavailable, falling back to simulation"
            );
        }

        match self.simulator.execute(&order).await {
            Ok(receipt) => self.store.complete(order.id, &receipt),
            Err(e) => {
                tracing::error!(order_id = order.id, error = %e, "simulated execution failed");
                self.store.fail(order.id, &e.to_string());
            }
        }
    }
}
