// handlers/system.rs - Service index and health probe

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service index
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Winetime API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "catalog": [
                "/api/wines",
                "/api/grapes",
                "/api/producers",
                "/api/regions",
                "/api/countries",
                "/api/wine_types"
            ],
            "auth": ["/api/register", "/api/login", "/api/logout", "/api/user/{username}"]
        }
    }))
}

/// GET /health - 200 when the database answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "database": "connected",
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "database": "disconnected",
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
        }
    }
}
