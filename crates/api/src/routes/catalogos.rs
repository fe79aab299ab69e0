//! Route definitions for the catalog lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalogos;
use crate::state::AppState;

/// Routes mounted at `/catalogos`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sectores", get(catalogos::sectores))
        .route("/subsectores", get(catalogos::subsectores))
        .route(
            "/subsectores/sector/{id}",
            get(catalogos::subsectores_por_sector),
        )
        .route("/prioridades", get(catalogos::prioridades))
        .route("/condiciones", get(catalogos::condiciones))
        .route("/informaciones", get(catalogos::informaciones))
        .route("/municipios", get(catalogos::municipios))
        .route("/delegaciones", get(catalogos::delegaciones))
        .route("/medidas-seguridad", get(catalogos::medidas_seguridad))
}
