pub mod api;
pub mod booking;
pub mod config;
pub mod console;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod panel;
pub mod session;
pub mod table;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use api::ApiClient;
use booking::BookingDesk;
use console::Console;
use session::SessionStore;

// Shared state for the whole application
pub struct AppState {
    pub config: config::Config,
    pub api: ApiClient,
    pub console: Console,
    pub desk: BookingDesk,
    pub session: SessionStore,
}

impl AppState {
    pub async fn new(config: config::Config) -> Result<Arc<Self>, Box<dyn std::error::Error + Send + Sync>> {
        let api = ApiClient::from_config(&config.api, &config.circuit_breaker)?;
        let session = SessionStore::load(config.session.file.clone(), api.clone()).await;
        let console = Console::new(api.clone());
        let desk = BookingDesk::new(api.clone(), config.booking.clone());

        Ok(Arc::new(Self {
            config,
            api,
            console,
            desk,
            session,
        }))
    }
}

/// The full HTTP surface: root, health and everything under `/api`.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Airline Ops console v0.1" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
