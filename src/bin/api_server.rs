// src/bin/api_server.rs

use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crowdsale_relay::infra::{config, logging};
use crowdsale_relay::transport;
use crowdsale_relay::CommandRelay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_tracing(config::log_json());

    // --- Relay Initialization ---
    tracing::info!("initializing command relay");
    let relay = Arc::new(CommandRelay::from_env()?);

    // A failed start is not fatal: the server still comes up and reports the state, and
    // POST /api/session/start retries once the wallet is reachable.
    let state = relay.start().await;
    if state.is_ready() {
        tracing::info!(?state, "relay started");
    } else {
        tracing::warn!(?state, "relay not ready; commands will be rejected until startup succeeds");
    }

    let app_state = transport::http::AppState {
        relay: relay.clone(),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let bind_addr = config::api_bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "API server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to install Ctrl+C handler");
            }
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
