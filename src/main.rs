mod config;
mod error;
mod handlers;
mod provider;
mod relay;
mod types;

use std::sync::Arc;

use log::info;

use config::Config;
use handlers::AppState;
use relay::Relay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();

    let config = Config::from_env()?;

    // Resolved once; a missing key or client failure leaves the relay in fake mode.
    let relay = Relay::new(provider::connect(&config.provider));
    if !relay.is_ready() {
        info!("Provider not configured, SMS and WhatsApp requests will be simulated");
    }

    let state = Arc::new(AppState { relay });
    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
