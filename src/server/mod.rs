pub mod handlers;
pub mod types;

use crate::{Result, config::Config, prediction::HttpPredictionClient, session::SessionStore};
use axum::{
    Router,
    routing::{get, post},
};
use chrono::Utc;
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit_form))
        .route("/api/predict", post(handlers::predict_api))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drops idle sessions until the task is aborted.
pub fn spawn_session_sweeper(sessions: SessionStore, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match sessions.evict_idle(Utc::now()) {
                Ok(0) => {}
                Ok(evicted) => debug!(
                    "Evicted {} idle sessions, {} remaining",
                    evicted,
                    sessions.len().unwrap_or_default()
                ),
                Err(e) => warn!("Session sweep failed: {}", e),
            }
        }
    })
}

pub async fn run(config: Config) -> Result<()> {
    let client = HttpPredictionClient::new(&config.api)?;
    info!("Prediction endpoint: {}", client.predict_url());

    let sessions = SessionStore::with_limits(config.sessions.limits());
    let limits = sessions.limits();
    info!(
        "Sessions expire after {}s idle, at most {} kept",
        limits.idle_timeout.num_seconds(),
        limits.max_sessions
    );
    let sweeper = spawn_session_sweeper(
        sessions.clone(),
        Duration::from_secs(config.sessions.sweep_interval_secs),
    );

    let app = router(AppState::with_sessions(Arc::new(client), sessions));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app).await;
    sweeper.abort();
    served?;

    Ok(())
}
