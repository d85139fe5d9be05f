use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cvlift_api::config::Config;
use cvlift_api::routes::build_router;
use cvlift_api::sonar_client::{self, SonarClient};
use cvlift_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", crate_target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvlift API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Sonar completion client
    let sonar = SonarClient::new(config.sonar_base_url.clone());
    info!(
        "Sonar client initialized (model: {}, endpoint: {})",
        sonar_client::SONAR_MODEL,
        config.sonar_base_url
    );

    let state = AppState {
        sonar,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
