use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::models::{OrderRecord, OrderStatus};
use crate::services::execution_channel::ExecutionReceipt;

/// In-memory order repository: two ordered maps keyed by id, one for
/// pending orders and one for history. Every tracked order lives in exactly
/// one of the two, and a record that reached history never comes back.
#[derive(Clone, Default)]
pub struct OrderStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    pending: BTreeMap<u64, OrderRecord>,
    history: BTreeMap<u64, OrderRecord>,
}

/// Snapshot returned by `list`, pending collection first.
#[derive(Debug, Clone)]
pub struct OrdersSnapshot {
    pub pending: usize,
    pub total: usize,
    pub orders: Vec<OrderRecord>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The store holds plain data, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Tracks a freshly created record. The record is visible to queries
    /// before the intake call that created it returns.
    pub fn insert_pending(&self, record: OrderRecord) {
        let mut inner = self.lock();
        inner.pending.insert(record.id, record);
    }

    /// Applies an execution receipt and moves the record to history.
    /// Ignored when the id is no longer pending, keeping transitions
    /// monotonic even if an execution path reports twice.
    pub fn complete(&self, id: u64, receipt: &ExecutionReceipt) {
        let mut inner = self.lock();
        let Some(mut record) = inner.pending.remove(&id) else {
            tracing::warn!(order_id = id, "completion for an order that is not pending");
            return;
        };

        record.status = receipt.status;
        record.broker = Some(receipt.broker.clone());
        record.execution_price = Some(receipt.execution_price);
        record.execution_time = Some(Utc::now());
        record.external_order_id = receipt.external_order_id.clone();

        inner.history.insert(id, record);
    }

    /// Marks the record `Failed` and moves it to history.
    pub fn fail(&self, id: u64, message: &str) {
        let mut inner = self.lock();
        let Some(mut record) = inner.pending.remove(&id) else {
            tracing::warn!(order_id = id, "failure for an order that is not pending");
            return;
        };

        record.status = OrderStatus::Failed;
        record.error = Some(message.to_string());
        record.execution_time = Some(Utc::now());

        inner.history.insert(id, record);
    }

    pub fn get(&self, id: u64) -> Option<OrderRecord> {
        let inner = self.lock();
        inner
            .pending
            .get(&id)
            .or_else(|| inner.history.get(&id))
            .cloned()
    }

    pub fn list(&self) -> OrdersSnapshot {
        let inner = self.lock();
        let orders: Vec<OrderRecord> = inner
            .pending
            .values()
            .chain(inner.history.values())
            .cloned()
            .collect();

        OrdersSnapshot {
            pending: inner.pending.len(),
            total: orders.len(),
            orders,
        }
    }

    /// (pending, total) counts without cloning the records.
    pub fn counts(&self) -> (usize, usize) {
        let inner = self.lock();
        (
            inner.pending.len(),
            inner.pending.len() + inner.history.len(),
        )
    }
}
