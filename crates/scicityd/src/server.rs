//! HTTP server for scicityd.

use crate::config::GuideConfig;
use crate::gateway::{CredentialPool, LlmGateway};
use crate::routes;
use crate::sessions::SessionStore;
use anyhow::Result;
use axum::Router;
use scicity_common::venue::VenueRecord;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    pub venue: VenueRecord,
    pub sessions: SessionStore,
    pub gateway: LlmGateway,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: &GuideConfig, venue: VenueRecord) -> Self {
        let pool = CredentialPool::new(
            config.api_keys.clone(),
            config.max_errors_per_key,
            config.max_requests_per_key,
        );

        Self {
            venue,
            sessions: SessionStore::new(
                config.session_capacity,
                Duration::from_secs(config.session_ttl_secs),
            ),
            gateway: LlmGateway::new(pool, config.model.clone()),
            start_time: Instant::now(),
        }
    }
}

/// Assemble the router. Split out from [`run`] so tests can drive the
/// full HTTP surface in-process.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::page_routes())
        .merge(routes::chat_routes())
        .merge(routes::status_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until the process is stopped.
pub async fn run(config: GuideConfig, venue: VenueRecord) -> Result<()> {
    let addr = config.listen_addr.clone();
    let state = Arc::new(AppState::new(&config, venue));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
