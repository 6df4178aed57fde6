use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

pub mod fuel_entry_routes;
pub mod vehicle_routes;

/// Router completo de la API con CORS y trazas HTTP
pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.is_development() {
        cors_middleware()
    } else {
        if state.config.is_production() && state.config.cors_origins.is_empty() {
            warn!("⚠️ Producción sin CORS_ORIGINS: ningún navegador podrá llamar a la API");
        }
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/fuel-entries", fuel_entry_routes::create_fuel_entry_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fuel-tracker",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
