//! HTTP routes
//!
//! - `GET /bonjour`: constant greeting
//! - `GET /bonjour-php`: greeting composed with the name from the upstream service
//! - `GET /health`: liveness

use crate::error::BonjourError;
use crate::upstream::NameSource;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const GREETING: &str = "bonjour";

#[derive(Clone)]
pub struct AppState {
    pub names: Arc<dyn NameSource>,
}

impl AppState {
    pub fn new(names: impl NameSource + 'static) -> Self {
        Self {
            names: Arc::new(names),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/bonjour", get(bonjour))
        .route("/bonjour-php", get(bonjour_upstream))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Greeting followed by a single space and `name`, verbatim.
pub fn compose_greeting(name: &str) -> String {
    format!("{} {}", GREETING, name)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "rental-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn bonjour() -> &'static str {
    GREETING
}

async fn bonjour_upstream(State(state): State<AppState>) -> Result<String, BonjourError> {
    let name = state.names.fetch_name().await?;
    Ok(compose_greeting(&name))
}
