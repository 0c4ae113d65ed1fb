use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    pub amp_api_key: String,
    pub amp_api_secret: String,
    pub amp_account_id: String,
    pub amp_base_url: String,

    pub broker_timeout_ms: u64,
    pub simulated_fill_delay_ms: u64,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3001);

    // Broker credentials are optional: their absence selects the
    // unconfigured execution channel, never a startup failure.
    let amp_api_key = env::var("AMP_LIVE_API_KEY").unwrap_or_default();
    let amp_api_secret = env::var("AMP_LIVE_SECRET").unwrap_or_default();
    let amp_account_id = env::var("AMP_LIVE_ACCOUNT_ID").unwrap_or_default();

    let amp_base_url = env::var("AMP_LIVE_PAPER_URL")
        .unwrap_or_else(|_| "https://paper-api.ampletrader.com".to_string());

    let broker_timeout_ms = env::var("BROKER_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(10_000);

    let simulated_fill_delay_ms = env::var("SIMULATED_FILL_DELAY_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1_000);

    Settings {
        host,
        port,
        amp_api_key,
        amp_api_secret,
        amp_account_id,
        amp_base_url,
        broker_timeout_ms,
        simulated_fill_delay_ms,
    }
}
