mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use triage_auth::GuardConfig;
use triage_core::TriageConfig;

use state::AppState;

/// Router serving access decisions for bearer credentials.
pub fn build_app(config: &TriageConfig) -> Router {
    let state = Arc::new(AppState {
        guard: GuardConfig::from(&config.access),
        jwt_secret: config.access.jwt_secret.clone(),
    });
    routes::build_router(state)
}

/// Start the access service on the configured listen address.
pub async fn start_web_server(config: &TriageConfig) -> anyhow::Result<()> {
    let app = build_app(config);

    let addr: SocketAddr = config.web.listen_addr.parse()?;
    tracing::info!("Starting access service on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
