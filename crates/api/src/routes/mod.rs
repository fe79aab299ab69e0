pub mod auth;
pub mod catalogos;
pub mod despacho;
pub mod fichas;
pub mod health;
pub mod usuarios;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                   WebSocket (fiche event push)
///
/// /auth/login                           login (public)
/// /auth/perfil                          own profile (requires auth)
/// /auth/cambiar-contrasena              change password
///
/// /fichas                               list (published view), create
/// /fichas/buscar                        free-text search
/// /fichas/rango-fechas                  inclusive day-range view
/// /fichas/dia-actual                    today view
/// /fichas/concluidas                    concluded view
/// /fichas/borradores                    draft view
/// /fichas/borradores/buscar             draft search
/// /fichas/estadisticas                  statistics snapshot
/// /fichas/{id}                          get, update, delete
///
/// /despacho/validar                     validate with measures (POST)
/// /despacho/ficha/{id}                  dispatch records of one fiche
///
/// /catalogos/sectores                   sector catalog
/// /catalogos/subsectores                active subsectors
/// /catalogos/subsectores/sector/{id}    active subsectors of one sector
/// /catalogos/prioridades                priority catalog
/// /catalogos/condiciones                condition catalog
/// /catalogos/informaciones              information-kind catalog
/// /catalogos/municipios                 municipality catalog
/// /catalogos/delegaciones               delegation catalog
/// /catalogos/medidas-seguridad          active safety measures
///
/// /roles                                role catalog
///
/// /usuarios                             list active, create
/// /usuarios/{id}                        get, update, deactivate
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Authentication routes.
        .nest("/auth", auth::router())
        // Fiche capture, listings, and statistics.
        .nest("/fichas", fichas::router())
        // Dispatch validation.
        .nest("/despacho", despacho::router())
        // Catalog lookups.
        .nest("/catalogos", catalogos::router())
        .route("/roles", get(handlers::catalogos::roles))
        // User administration.
        .nest("/usuarios", usuarios::router())
}
