use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use traderelay::models::{OrderRecord, OrderStatus};
use traderelay::services::execution_channel::{ExecutionChannel, ExecutionError, ExecutionReceipt};
use traderelay::services::order_relay::{ManualOrderPayload, OrderRelay, SignalPayload};
use traderelay::services::order_store::OrderStore;
use traderelay::services::simulated_broker::SimulatedBroker;

struct AcceptingChannel;

#[async_trait]
impl ExecutionChannel for AcceptingChannel {
    fn name(&self) -> &str {
        "AMP Live"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn submit(&self, order: &OrderRecord) -> Result<ExecutionReceipt, ExecutionError> {
        Ok(ExecutionReceipt {
            broker: "AMP Live".to_string(),
            status: OrderStatus::Submitted,
            execution_price: order.price,
            external_order_id: Some(format!("amp-{}", order.id)),
        })
    }
}

struct RejectingChannel;

#[async_trait]
impl ExecutionChannel for RejectingChannel {
    fn name(&self) -> &str {
        "AMP Live"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn submit(&self, _order: &OrderRecord) -> Result<ExecutionReceipt, ExecutionError> {
        Err(ExecutionError::Rejected {
            status: 503,
            body: "venue offline".to_string(),
        })
    }
}

struct UnavailableChannel;

#[async_trait]
impl ExecutionChannel for UnavailableChannel {
    fn name(&self) -> &str {
        "AMP Live"
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn submit(&self, _order: &OrderRecord) -> Result<ExecutionReceipt, ExecutionError> {
        Err(ExecutionError::Unavailable)
    }
}

struct HangingChannel;

#[async_trait]
impl ExecutionChannel for HangingChannel {
    fn name(&self) -> &str {
        "AMP Live"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn submit(&self, _order: &OrderRecord) -> Result<ExecutionReceipt, ExecutionError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(ExecutionError::TimedOut)
    }
}

fn relay_with(channel: Arc<dyn ExecutionChannel>, broker_timeout: Duration) -> OrderRelay {
    OrderRelay::new(
        OrderStore::new(),
        channel,
        SimulatedBroker::new(Duration::from_millis(5)),
        broker_timeout,
    )
}

fn manual_payload(symbol: &str, side: &str, price: f64, quantity: i64) -> ManualOrderPayload {
    ManualOrderPayload {
        symbol: Some(symbol.to_string()),
        side: Some(side.to_string()),
        price: Some(price),
        quantity: Some(quantity),
        order_type: None,
        broker: None,
    }
}

async fn wait_for_terminal(relay: &OrderRelay, id: u64) -> OrderRecord {
    for _ in 0..400 {
        let record = relay.store().get(id).expect("accepted order must be tracked");
        if record.status.is_terminal() {
            return record;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("order {id} never left Pending");
}

#[tokio::test]
async fn real_channel_acceptance_lands_as_submitted() {
    let relay = relay_with(Arc::new(AcceptingChannel), Duration::from_millis(250));

    let id = relay
        .receive_manual_order(manual_payload("ES1!", "buy", 4500.0, 2))
        .unwrap();
    let record = wait_for_terminal(&relay, id).await;

    assert_eq!(record.status, OrderStatus::Submitted);
    assert_eq!(record.broker.as_deref(), Some("AMP Live"));
    assert_eq!(record.external_order_id.as_deref(), Some(format!("amp-{id}").as_str()));
    assert_eq!(record.execution_price, Some(4500.0));
    assert!(record.execution_time.is_some());

    let (pending, total) = relay.store().counts();
    assert_eq!((pending, total), (0, 1));
}

#[tokio::test]
async fn channel_rejection_falls_back_to_simulation() {
    let relay = relay_with(Arc::new(RejectingChannel), Duration::from_millis(250));

    let id = relay
        .receive_manual_order(manual_payload("ES1!", "sell", 4510.0, 1))
        .unwrap();
    let record = wait_for_terminal(&relay, id).await;

    assert_eq!(record.status, OrderStatus::Filled);
    assert!(record.broker.as_deref().unwrap().contains("Simulated"));
    assert_eq!(record.execution_price, Some(4510.0));
    assert!(record.external_order_id.is_none());
}

#[tokio::test]
async fn unavailable_channel_falls_back_to_simulation() {
    let relay = relay_with(Arc::new(UnavailableChannel), Duration::from_millis(250));

    let id = relay
        .receive_signal(SignalPayload {
            symbol: Some("NQ1!".to_string()),
            side: Some("buy".to_string()),
            price: Some(15000.0),
            quantity: None,
            order_type: None,
            strategy: None,
            timeframe: None,
        })
        .unwrap();
    let record = wait_for_terminal(&relay, id).await;

    assert_eq!(record.status, OrderStatus::Filled);
    assert_eq!(record.quantity, 1);
    assert!(record.broker.as_deref().unwrap().contains("Simulated"));
}

#[tokio::test]
async fn hung_channel_times_out_into_fallback() {
    let relay = relay_with(Arc::new(HangingChannel), Duration::from_millis(20));

    let id = relay
        .receive_manual_order(manual_payload("ES1!", "buy", 4500.0, 1))
        .unwrap();
    let record = wait_for_terminal(&relay, id).await;

    assert_eq!(record.status, OrderStatus::Filled);
    assert!(record.broker.as_deref().unwrap().contains("Simulated"));
}

#[tokio::test]
async fn accepted_order_is_pending_before_execution_completes() {
    // The hang keeps the real attempt in flight long enough to observe
    // the record in the pending collection.
    let relay = relay_with(Arc::new(HangingChannel), Duration::from_secs(30));

    let id = relay
        .receive_manual_order(manual_payload("ES1!", "buy", 4500.0, 1))
        .unwrap();

    let record = relay.store().get(id).unwrap();
    assert_eq!(record.status, OrderStatus::Pending);
    assert_eq!(relay.store().counts(), (1, 1));
}

#[tokio::test]
async fn ids_are_unique_and_monotonic() {
    let relay = relay_with(Arc::new(UnavailableChannel), Duration::from_millis(250));

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(
            relay
                .receive_manual_order(manual_payload("ES1!", "buy", 4500.0, 1))
                .unwrap(),
        );
    }

    let mut sorted = ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 5);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn validation_failure_leaves_collections_untouched() {
    let relay = relay_with(Arc::new(UnavailableChannel), Duration::from_millis(250));

    let err = relay.receive_manual_order(ManualOrderPayload {
        symbol: Some("ES1!".to_string()),
        side: Some("buy".to_string()),
        price: Some(4500.0),
        quantity: None,
        order_type: None,
        broker: None,
    });
    assert!(err.is_err());
    assert_eq!(relay.store().counts(), (0, 0));
}

#[tokio::test]
async fn every_order_sits_in_exactly_one_collection() {
    let relay = relay_with(Arc::new(UnavailableChannel), Duration::from_millis(250));

    let mut ids = Vec::new();
    for i in 0..4 {
        ids.push(
            relay
                .receive_manual_order(manual_payload("ES1!", "buy", 4500.0 + i as f64, 1))
                .unwrap(),
        );
    }

    for id in &ids {
        wait_for_terminal(&relay, *id).await;
    }

    let snapshot = relay.store().list();
    assert_eq!(snapshot.pending, 0);
    assert_eq!(snapshot.total, ids.len());

    let mut seen: Vec<u64> = snapshot.orders.iter().map(|o| o.id).collect();
    seen.sort_unstable();
    assert_eq!(seen, ids);

    let (pending, total) = relay.store().counts();
    assert_eq!(total, pending + snapshot.orders.iter().filter(|o| o.status.is_terminal()).count());
}
