//! Route definitions for user administration.

use axum::routing::get;
use axum::Router;

use crate::handlers::usuarios;
use crate::state::AppState;

/// Routes mounted at `/usuarios`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(usuarios::list).post(usuarios::create))
        .route(
            "/{id}",
            get(usuarios::get_by_id)
                .put(usuarios::update)
                .delete(usuarios::deactivate),
        )
}
