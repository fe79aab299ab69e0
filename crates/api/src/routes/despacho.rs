//! Route definitions for dispatch validation.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::despacho;
use crate::state::AppState;

/// Routes mounted at `/despacho`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validar", post(despacho::validar))
        .route("/ficha/{id}", get(despacho::por_ficha))
}
