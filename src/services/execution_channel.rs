use async_trait::async_trait;

use crate::models::{OrderRecord, OrderStatus};

/// Outcome reported by an execution channel for a single submission.
///
/// Whether acceptance means `Submitted` or an immediate `Filled` is up to
/// the venue; the relay applies whatever the receipt says.
#[derive(Debug, Clone)]
pub struct ExecutionReceipt {
    pub broker: String,
    pub status: OrderStatus,
    pub execution_price: f64,
    pub external_order_id: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ExecutionError {
    #[error("execution channel is not configured")]
    Unavailable,
    #[error("broker request failed: {0}")]
    Transport(String),
    #[error("broker rejected order: {status} {body}")]
    Rejected { status: u16, body: String },
    #[error("broker request timed out")]
    TimedOut,
}

/// Capability to place an order with an external trading venue.
///
/// Implementations report failures; they never substitute a simulated
/// execution themselves — fallback policy belongs to the relay.
#[async_trait]
pub trait ExecutionChannel: Send + Sync {
    fn name(&self) -> &str;

    /// True only while the channel holds usable connection state.
    fn is_available(&self) -> bool;

    async fn submit(&self, order: &OrderRecord) -> Result<ExecutionReceipt, ExecutionError>;
}
