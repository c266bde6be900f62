//! # HTTP API
//!
//! JSON endpoints for the dish recommender.
//!
//! ## Endpoints
//!
//! - `POST /recommend` - Recommend one dish for `{"query": "..."}`
//! - `GET /dishes` - The menu in catalog order
//! - `GET /health` - Service status, dish count and uptime
//! - `GET /metrics` - Prometheus text format metrics
//!
//! ## Example
//!
//! ```no_run
//! use dishpick::api::{create_router, AppState};
//! use dishpick::catalog::Catalog;
//! use dishpick::config::DishpickConfig;
//! use dishpick::recommend::Recommender;
//! use dishpick::selector::RuleSelector;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let recommender = Recommender::new(Arc::new(Catalog::builtin()), RuleSelector::default(), None);
//! let state = Arc::new(AppState::new(Arc::new(recommender), Arc::new(DishpickConfig::default())));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": "<message>"}`. The only error a
//! well-formed request can produce is `400 {"error": "empty query"}`.

mod dishes;
pub mod headers;
mod health;
mod recommend;
pub mod types;

pub use health::HealthResponse;
pub use types::*;

use crate::config::DishpickConfig;
use crate::metrics::PrometheusHandle;
use crate::recommend::Recommender;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (64 KiB).
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub config: Arc<DishpickConfig>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    /// Prometheus handle for rendering metrics
    pub prometheus: PrometheusHandle,
}

impl AppState {
    /// Create application state, installing the metrics recorder if needed.
    pub fn new(recommender: Arc<Recommender>, config: Arc<DishpickConfig>) -> Self {
        Self::with_prometheus(recommender, config, crate::metrics::setup_or_detached())
    }

    pub fn with_prometheus(
        recommender: Arc<Recommender>,
        config: Arc<DishpickConfig>,
        prometheus: PrometheusHandle,
    ) -> Self {
        Self {
            recommender,
            config,
            start_time: Instant::now(),
            prometheus,
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors_enabled = state.config.server.cors_enabled;

    let router = Router::new()
        .route("/recommend", post(recommend::handle))
        .route("/dishes", get(dishes::handle))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
