//! Server router definition.
//!
//! The following routes are supported:
//!
//! - GET: `/health`
//! - POST: `/notify`
//! - POST: `/validate`

use crate::{
    config::Config,
    relay::{api::ZoomClient, router::relay_router},
};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{self, TraceLayer};
use tracing::Level;

pub const SERVICE_NAME: &str = "courier";

/// Dependencies shared by routes across requests. None of it is mutable.
#[derive(Clone)]
pub struct Deps {
    pub client: ZoomClient,
    pub config: Arc<Config>,
}

impl Deps {
    pub fn new(config: Config) -> Deps {
        Deps {
            client: ZoomClient::from_config(&config),
            config: Arc::new(config),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: String,
}

/// The current UTC time to whole seconds, e.g. `2024-01-31T09:30:00Z`.
pub fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Instantiate a new router with tracing.
pub fn new(deps: Deps) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(relay_router())
        .layer(trace_layer)
        // Exclude the health check route from tracing.
        .route("/health", get(health_handler))
        .with_state(deps)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: timestamp(),
    })
}
