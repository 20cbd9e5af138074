use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use order_relay::api::{self, AppState};
use order_relay::config::Settings;
use order_relay::exchange::{BinanceExchange, Exchange};
use order_relay::relay::SubmissionGate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_missing = dotenv::dotenv().is_err();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("order_relay=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    if dotenv_missing {
        warn!("⚠️  No .env file found, using environment variables");
    }

    info!("🌐 Starting Order Relay HTTP Server");

    let settings = Settings::new().context("failed to load configuration")?;
    info!("📋 Configuration loaded successfully");

    let exchange: Arc<dyn Exchange> = Arc::new(
        BinanceExchange::new(&settings.exchange).context("failed to create exchange client")?,
    );
    info!("📡 Exchange client ready ({})", settings.exchange.api_url);

    let state = AppState {
        exchange,
        gate: Arc::new(SubmissionGate::new()),
    };
    let app = api::create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    info!("🚀 Order relay listening on http://{}", addr);
    info!("📡 Available endpoints:");
    info!("   POST /http_bnb_limit_order - Place a LIMIT GTC order");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
