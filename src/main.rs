//! AuthZ Gate - policy-enforcement gateway.
//!
//! Every request to a protected route is translated into a policy query,
//! answered by an external decision service under a hard deadline, and
//! either forwarded or rejected. Fail-closed: no verdict, no access.

use std::sync::Arc;

use tokio::net::TcpListener;

mod api;
mod config;
mod decision;
mod error;
mod gate;
mod identity;
mod logging;

use crate::api::build_router;
use crate::config::Config;
use crate::decision::HttpDecisionClient;
use crate::gate::GateState;
use crate::identity::RoleExtractor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    // Initialize logging
    logging::init();

    tracing::info!("Starting AuthZ Gate v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        decision_url = %config.decision.url,
        timeout_ms = config.decision.timeout_ms,
        max_retries = config.decision.max_retries,
        identity_source = ?config.identity.source,
        "Configuration loaded"
    );

    // Build the decision service client
    let client = HttpDecisionClient::new(config.decision.clone()).map_err(|e| {
        tracing::error!(error = %e, "Failed to build decision service client");
        anyhow::anyhow!("Decision client error: {}", e)
    })?;

    // Build the role extractor
    let extractor = RoleExtractor::new(&config.identity).map_err(|e| {
        tracing::error!(error = %e, "Failed to build role extractor");
        anyhow::anyhow!("Identity configuration error: {}", e)
    })?;

    // Build the gate and router
    let gate = GateState::new(Arc::new(client), extractor);
    let app = build_router(gate);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
