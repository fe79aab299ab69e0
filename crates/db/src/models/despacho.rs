//! Dispatch validation records: one row per safety measure applied to a
//! fiche. Append-only; there is no update or delete path.

use serde::Serialize;
use sqlx::FromRow;

use irs_core::types::{DbId, Timestamp};

/// Raw row from the `fichas_despacho` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRecord {
    pub id_ficha_despacho: DbId,
    pub id_ficha: DbId,
    pub id_cat_medida: DbId,
    pub comentario: String,
    pub evidencia: Option<String>,
    pub fecha_validacion: Timestamp,
    pub id_usuario: Option<DbId>,
}

/// Dispatch record joined with its safety-measure label; the shape returned
/// to clients. A measure that has since vanished from the catalog resolves
/// to an empty label.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRecordView {
    pub id_ficha_despacho: DbId,
    pub id_ficha: DbId,
    pub id_cat_medida: DbId,
    pub medida_seguridad: String,
    pub comentario: String,
    pub evidencia: Option<String>,
    pub fecha_validacion: Timestamp,
    pub id_usuario: Option<DbId>,
}

/// Input of the transactional batch write: one record per measure id, in
/// input order, no dedup.
#[derive(Debug, Clone)]
pub struct DispatchBatch {
    pub id_ficha: DbId,
    pub medidas: Vec<DbId>,
    pub comentario: String,
    /// Opaque evidence blob (the capture form joins base64 images with `|`).
    pub evidencia: Option<String>,
    pub id_usuario: Option<DbId>,
}
