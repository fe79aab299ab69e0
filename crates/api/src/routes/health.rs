//! Health check routes.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use irs_db::repositories::FichaRepo;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// Database health response payload.
#[derive(Serialize)]
pub struct DatabaseHealthResponse {
    pub status: &'static str,
    /// Total fiche rows, proving the main table answers queries.
    pub fichas: i64,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = irs_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// GET /health/database -- round-trips a count through the fiche table.
async fn database_check(
    State(state): State<AppState>,
) -> Result<Json<DatabaseHealthResponse>, crate::error::AppError> {
    let fichas = FichaRepo::count(&state.pool).await?;
    Ok(Json(DatabaseHealthResponse {
        status: "ok",
        fichas,
    }))
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/database", get(database_check))
}
