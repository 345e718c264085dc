//! # StaffDispatch API
//!
//! HTTP server for the StaffDispatch booking service: slot previews, and
//! reservations whose time slots are filled by assignment or
//! self-registration.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: request processing on top of the core slot logic
//! - **Middleware**: error mapping
//! - **Config**: environment configuration
//!
//! Storage is reached through [`ReservationStore`], so handlers can be
//! exercised against a mock.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use std::time::Duration;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, StatusCode},
};
use eyre::Result;
use staffdispatch_db::{
    DbPool,
    store::{PgReservationStore, ReservationStore},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub store: Arc<dyn ReservationStore>,
}

impl ApiState {
    pub fn new(store: impl ReservationStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Builds the router with every endpoint attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::slots::routes())
        .merge(routes::reservation::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_origin(origins)
}

async fn handle_timeout(err: BoxError) -> StatusCode {
    if err.is::<tower::timeout::error::Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        warn!("Unhandled middleware error: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Starts the API server on top of a Postgres pool.
///
/// Installs the global tracing subscriber, so call it once per process.
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(PgReservationStore::new(db_pool)));
    let app = app(state).layer(TraceLayer::new_for_http());

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
