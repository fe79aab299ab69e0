//! Handlers for the `/fichas` resource: CRUD, the named listing views, free
//! text search, and the statistics snapshot.
//!
//! The named views (general, today, concluded, range, drafts) fetch the full
//! fiche set and select rows with the pure classifier from `irs_core`. The
//! table is dashboard-sized; pushing these filters into SQL is a known
//! optimization left on the table so the counting semantics stay in one
//! place.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use irs_core::classification;
use irs_core::error::CoreError;
use irs_core::stats;
use irs_core::types::DbId;
use irs_db::models::ficha::{DraftListItem, Ficha, FichaInput, FichaListItem};
use irs_db::repositories::FichaRepo;
use irs_events::{FichaEvent, FichaEventKind};

use crate::error::{AppError, AppResult};
use crate::query::{DateRangeParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Capture user recorded when a request carries none (legacy kiosk clients
/// do not authenticate).
const DEFAULT_CAPTURE_USER: DbId = 1;

fn list_items(fichas: Vec<Ficha>, keep: impl Fn(&Ficha) -> bool) -> Vec<FichaListItem> {
    fichas
        .into_iter()
        .filter(|f| keep(f))
        .map(|f| f.to_list_item())
        .collect()
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// GET /api/v1/fichas
///
/// The general listing. Uses the published predicate, which (deliberately,
/// see `irs_core::classification`) still admits drafts.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let fichas = FichaRepo::list_all(&state.pool).await?;
    let items = list_items(fichas, |f| classification::is_published(&f.snapshot()));
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/fichas/dia-actual
///
/// Fiches elaborated on the current UTC day, drafts excluded.
pub async fn list_today(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let fichas = FichaRepo::list_all(&state.pool).await?;
    let items = list_items(fichas, |f| classification::is_today(&f.snapshot(), now));
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/fichas/concluidas
///
/// Fiches satisfying the exact concluded predicate.
pub async fn list_concluded(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let fichas = FichaRepo::list_all(&state.pool).await?;
    let items = list_items(fichas, |f| classification::is_concluded(&f.snapshot()));
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/fichas/rango-fechas?fechaInicio=yyyy-MM-dd&fechaFin=yyyy-MM-dd
///
/// Published fiches elaborated within the inclusive day range.
pub async fn list_by_date_range(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> AppResult<impl IntoResponse> {
    let (desde, hasta) = params.parse()?;
    let fichas = FichaRepo::list_all(&state.pool).await?;
    let items = list_items(fichas, |f| {
        classification::in_date_range(&f.snapshot(), desde, hasta)
    });
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/fichas/borradores
pub async fn list_drafts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let fichas = FichaRepo::list_all(&state.pool).await?;
    let items: Vec<DraftListItem> = fichas
        .into_iter()
        .filter(|f| classification::is_draft(&f.snapshot()))
        .map(|f| f.to_draft_item())
        .collect();
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/fichas/borradores/buscar?criterio=
///
/// A blank criterio degrades to the full draft listing.
pub async fn search_drafts(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let criterio = params.criterio.unwrap_or_default();
    let fichas = if criterio.trim().is_empty() {
        let all = FichaRepo::list_all(&state.pool).await?;
        all.into_iter()
            .filter(|f| classification::is_draft(&f.snapshot()))
            .collect()
    } else {
        FichaRepo::search_drafts(&state.pool, &criterio).await?
    };
    let items: Vec<DraftListItem> = fichas.into_iter().map(|f| f.to_draft_item()).collect();
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/fichas/buscar?criterio=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let criterio = params.criterio.unwrap_or_default();
    let fichas = FichaRepo::search(&state.pool, criterio.trim()).await?;
    let items: Vec<_> = fichas.iter().map(Ficha::to_summary).collect();
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// GET /api/v1/fichas/estadisticas
///
/// The dashboard snapshot: summary counters, delegation breakdown, monthly
/// series, and the two-year trend, computed over the entire fiche set.
pub async fn estadisticas(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let fichas = FichaRepo::list_all(&state.pool).await?;
    let snapshots: Vec<_> = fichas.iter().map(Ficha::snapshot).collect();
    let estadisticas = stats::compute(&snapshots, Utc::now());
    Ok(Json(DataResponse { data: estadisticas }))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/fichas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ficha = FichaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Ficha", id }))?;
    Ok(Json(DataResponse { data: ficha }))
}

/// POST /api/v1/fichas
///
/// Creates a fiche, defaulting the elaboration timestamp and capture user
/// when the client omits them, and broadcasts `FichaCreada`.
pub async fn create(
    State(state): State<AppState>,
    Json(mut input): Json<FichaInput>,
) -> AppResult<impl IntoResponse> {
    if input.fecha_elaboracion.is_none() {
        input.fecha_elaboracion = Some(Utc::now());
    }
    if input.id_usuario.is_none() || input.id_usuario == Some(0) {
        input.id_usuario = Some(DEFAULT_CAPTURE_USER);
    }

    let ficha = FichaRepo::create(&state.pool, &input).await?;
    tracing::info!(ficha_id = ficha.id, activo = ficha.activo, "Ficha created");

    publish(&state, FichaEventKind::Creada, &ficha);
    Ok((StatusCode::CREATED, Json(DataResponse { data: ficha })))
}

/// PUT /api/v1/fichas/{id}
///
/// Full-row replacement and a `FichaActualizada` broadcast.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<FichaInput>,
) -> AppResult<impl IntoResponse> {
    let ficha = FichaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Ficha", id }))?;
    tracing::info!(ficha_id = ficha.id, activo = ficha.activo, "Ficha updated");

    publish(&state, FichaEventKind::Actualizada, &ficha);
    Ok(Json(DataResponse { data: ficha }))
}

/// DELETE /api/v1/fichas/{id}
///
/// Hard delete and a `FichaEliminada` broadcast.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FichaRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Ficha", id }));
    }
    tracing::info!(ficha_id = id, "Ficha deleted");

    state
        .event_bus
        .publish(FichaEvent::new(FichaEventKind::Eliminada, id));
    Ok(StatusCode::NO_CONTENT)
}

/// Publish a fiche event carrying the row as payload. Serialization of a row
/// we just built cannot fail; if it ever does, the push is dropped and the
/// write still succeeds.
fn publish(state: &AppState, kind: FichaEventKind, ficha: &Ficha) {
    let payload = serde_json::to_value(ficha).unwrap_or_default();
    let mut event = FichaEvent::new(kind, ficha.id).with_payload(payload);
    if let Some(actor) = ficha.id_usuario {
        event = event.with_actor(actor);
    }
    state.event_bus.publish(event);
}
