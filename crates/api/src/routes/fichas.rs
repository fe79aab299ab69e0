//! Route definitions for the fiche resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::fichas;
use crate::state::AppState;

/// Routes mounted at `/fichas`.
///
/// The named views sit above `/{id}` so fixed segments win over the id
/// capture.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fichas::list).post(fichas::create))
        .route("/buscar", get(fichas::search))
        .route("/rango-fechas", get(fichas::list_by_date_range))
        .route("/dia-actual", get(fichas::list_today))
        .route("/concluidas", get(fichas::list_concluded))
        .route("/borradores", get(fichas::list_drafts))
        .route("/borradores/buscar", get(fichas::search_drafts))
        .route("/estadisticas", get(fichas::estadisticas))
        .route(
            "/{id}",
            get(fichas::get_by_id)
                .put(fichas::update)
                .delete(fichas::delete),
        )
}
