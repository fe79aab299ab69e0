//! Handlers for the `/despacho` resource: dispatch validation of a fiche
//! against a set of safety measures.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use irs_core::error::CoreError;
use irs_core::types::DbId;
use irs_db::models::despacho::{DispatchBatch, DispatchRecordView};
use irs_db::repositories::{DespachoRepo, FichaRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for validating a fiche with one or more safety measures.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidarFichaRequest {
    pub id_ficha: DbId,
    #[serde(default)]
    pub ids_medidas_seguridad: Vec<DbId>,
    #[serde(default)]
    pub comentario: String,
    pub evidencia: Option<String>,
    pub id_usuario: Option<DbId>,
}

/// POST /api/v1/despacho/validar
///
/// Writes one dispatch record per measure id, all-or-nothing, then returns
/// the label-joined view of every created record.
pub async fn validar(
    State(state): State<AppState>,
    Json(input): Json<ValidarFichaRequest>,
) -> AppResult<impl IntoResponse> {
    if input.ids_medidas_seguridad.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Debe seleccionar al menos una medida de seguridad".to_string(),
        )));
    }

    // Reject unknown fiches up front with a 404 instead of a raw FK error.
    FichaRepo::find_by_id(&state.pool, input.id_ficha)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ficha",
            id: input.id_ficha,
        }))?;

    let batch = DispatchBatch {
        id_ficha: input.id_ficha,
        medidas: input.ids_medidas_seguridad,
        comentario: input.comentario,
        evidencia: input.evidencia,
        id_usuario: input.id_usuario,
    };
    let ids = DespachoRepo::create_batch(&state.pool, &batch).await?;

    let mut views: Vec<DispatchRecordView> = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(view) = DespachoRepo::find_view_by_id(&state.pool, id).await? {
            views.push(view);
        }
    }

    tracing::info!(
        ficha_id = batch.id_ficha,
        medidas = batch.medidas.len(),
        "Ficha validated with safety measures"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: views })))
}

/// GET /api/v1/despacho/ficha/{id}
///
/// All dispatch records for one fiche, newest validation first.
pub async fn por_ficha(
    State(state): State<AppState>,
    Path(id_ficha): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let views = DespachoRepo::list_views_by_ficha(&state.pool, id_ficha).await?;
    Ok(Json(DataResponse { data: views }))
}
