use std::net::SocketAddr;

use traderelay::{build_state, config, routes};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();
    let state = build_state(settings.clone());

    if state.relay.channel_available() {
        tracing::info!("AMP Live execution channel configured");
    } else {
        tracing::warn!("AMP Live credentials not found, orders will fall back to simulation");
    }

    let app = routes::app(state);

    let addr = SocketAddr::from((
        settings.host.parse::<std::net::IpAddr>().unwrap(),
        settings.port,
    ));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
