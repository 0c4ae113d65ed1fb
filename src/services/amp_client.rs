use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::models::{OrderRecord, OrderStatus};
use crate::services::execution_channel::{ExecutionChannel, ExecutionError, ExecutionReceipt};

/// AMP Live order gateway. Built once at startup; when the API key or
/// secret is missing the client stays permanently unconfigured and
/// `is_available` is false for its whole lifetime.
#[derive(Clone)]
pub struct AmpLiveClient {
    http: Client,
    credentials: Option<AmpCredentials>,
}

#[derive(Clone)]
struct AmpCredentials {
    api_key: String,
    api_secret: String,
    account_id: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AmpOrderRequest<'a> {
    symbol: &'a str,
    side: &'static str,
    quantity: i64,
    order_type: String,
    price: f64,
    account_id: &'a str,
    time_in_force: &'static str,
}

#[derive(Debug, Deserialize)]
struct AmpOrderResponse {
    #[serde(rename = "orderId")]
    order_id: Option<String>,
}

impl AmpLiveClient {
    pub fn from_settings(settings: &Settings) -> Self {
        let credentials = if settings.amp_api_key.trim().is_empty()
            || settings.amp_api_secret.trim().is_empty()
        {
            None
        } else {
            Some(AmpCredentials {
                api_key: settings.amp_api_key.clone(),
                api_secret: settings.amp_api_secret.clone(),
                account_id: settings.amp_account_id.clone(),
                base_url: settings.amp_base_url.trim_end_matches('/').to_string(),
            })
        };

        Self {
            http: Client::new(),
            credentials,
        }
    }
}

#[async_trait]
impl ExecutionChannel for AmpLiveClient {
    fn name(&self) -> &str {
        "AMP Live"
    }

    fn is_available(&self) -> bool {
        self.credentials.is_some()
    }

    async fn submit(&self, order: &OrderRecord) -> Result<ExecutionReceipt, ExecutionError> {
        let Some(creds) = &self.credentials else {
            return Err(ExecutionError::Unavailable);
        };

        let body = AmpOrderRequest {
            symbol: &order.symbol,
            side: order.side.as_str(),
            quantity: order.quantity,
            order_type: order.order_type.to_uppercase(),
            price: order.price,
            account_id: &creds.account_id,
            time_in_force: "DAY",
        };

        tracing::info!(order_id = order.id, symbol = %order.symbol, "sending order to AMP Live");

        let res = self
            .http
            .post(format!("{}/v1/orders", creds.base_url))
            .bearer_auth(&creds.api_key)
            .header("X-API-Secret", &creds.api_secret)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExecutionError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ExecutionError::Rejected { status, body });
        }

        let parsed = res
            .json::<AmpOrderResponse>()
            .await
            .map_err(|e| ExecutionError::Transport(e.to_string()))?;

        // The venue acknowledges acceptance; a later fill is not reported
        // back through this endpoint, so the order lands as Submitted.
        Ok(ExecutionReceipt {
            broker: self.name().to_string(),
            status: OrderStatus::Submitted,
            execution_price: order.price,
            external_order_id: parsed.order_id,
        })
    }
}
