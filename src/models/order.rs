use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Parses a caller-supplied side string, case-insensitively.
    pub fn parse(s: &str) -> Option<OrderSide> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Some(OrderSide::Buy),
            "SELL" => Some(OrderSide::Sell),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Submitted,
    Filled,
    Failed,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSource {
    #[serde(rename = "TradingView Webhook")]
    SignalWebhook,
    #[serde(rename = "Manual API")]
    ManualApi,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("unrecognized side: {0:?}")]
    InvalidSide(String),
    #[error("quantity must be a positive integer")]
    NonPositiveQuantity,
    #[error("price must be positive for non-market orders")]
    NonPositivePrice,
}

/// Caller-supplied trade intent, after per-path defaulting but before
/// validation. Built by the relay from the webhook or manual payload.
#[derive(Debug, Clone)]
pub struct OrderIntake {
    pub symbol: String,
    pub side: String,
    pub price: f64,
    pub quantity: i64,
    pub order_type: Option<String>,
    pub source: OrderSource,
    pub strategy: Option<String>,
    pub timeframe: Option<String>,
    pub broker: Option<String>,
}

/// A validated, tracked order. Identity fields (id, timestamp, symbol, side,
/// price, quantity, type, source) never change after construction; the
/// execution attempt sets status and the execution fields exactly once.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub side: OrderSide,
    pub price: f64,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub order_type: String,
    pub status: OrderStatus,
    pub source: OrderSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OrderRecord {
    /// Validates the intake and constructs a `Pending` record.
    ///
    /// Symbol, side and a positive quantity are always required. Price must
    /// be positive unless the order type is "market" (the default), where a
    /// zero price is allowed and the fill price comes from execution.
    pub fn new(id: u64, intake: OrderIntake) -> Result<OrderRecord, ValidationError> {
        let symbol = intake.symbol.trim().to_string();
        if symbol.is_empty() {
            return Err(ValidationError::MissingField("symbol"));
        }

        if intake.side.trim().is_empty() {
            return Err(ValidationError::MissingField("side"));
        }
        let side = OrderSide::parse(&intake.side)
            .ok_or_else(|| ValidationError::InvalidSide(intake.side.clone()))?;

        if intake.quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity);
        }

        let order_type = intake
            .order_type
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "market".to_string());

        if intake.price <= 0.0 && order_type != "market" {
            return Err(ValidationError::NonPositivePrice);
        }

        Ok(OrderRecord {
            id,
            timestamp: Utc::now(),
            symbol,
            side,
            price: if intake.price > 0.0 { intake.price } else { 0.0 },
            quantity: intake.quantity,
            order_type,
            status: OrderStatus::Pending,
            source: intake.source,
            strategy: intake.strategy,
            timeframe: intake.timeframe,
            broker: intake.broker,
            execution_price: None,
            execution_time: None,
            external_order_id: None,
            error: None,
        })
    }
}
