//! Handlers for the `/catalogos` lookups feeding the capture-form dropdowns.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use irs_core::types::DbId;
use irs_db::repositories::CatalogRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/catalogos/sectores
pub async fn sectores(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = CatalogRepo::list_sectors(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/catalogos/subsectores
pub async fn subsectores(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = CatalogRepo::list_subsectors(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/catalogos/subsectores/sector/{id}
pub async fn subsectores_por_sector(
    State(state): State<AppState>,
    Path(id_sector): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let data = CatalogRepo::list_subsectors_by_sector(&state.pool, id_sector).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/catalogos/prioridades
pub async fn prioridades(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = CatalogRepo::list_priorities(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/catalogos/condiciones
pub async fn condiciones(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = CatalogRepo::list_conditions(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/catalogos/informaciones
pub async fn informaciones(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = CatalogRepo::list_information_kinds(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/catalogos/municipios
pub async fn municipios(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = CatalogRepo::list_municipalities(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/catalogos/delegaciones
pub async fn delegaciones(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = CatalogRepo::list_delegations(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/catalogos/medidas-seguridad
///
/// Active measures only; the dispatch screen never offers retired ones.
pub async fn medidas_seguridad(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = CatalogRepo::list_active_measures(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/roles
pub async fn roles(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = CatalogRepo::list_roles(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}
