//! Repository for the `fichas_despacho` table.

use sqlx::PgPool;

use irs_core::types::DbId;

use crate::models::despacho::{DispatchBatch, DispatchRecordView};

/// View columns: record joined with its safety-measure label. A measure
/// missing from the catalog resolves to an empty label rather than dropping
/// the record.
const VIEW_COLUMNS: &str = "fd.id_ficha_despacho, fd.id_ficha, fd.id_cat_medida, \
    COALESCE(m.medida, '') AS medida_seguridad, fd.comentario, fd.evidencia, \
    fd.fecha_validacion, fd.id_usuario";

/// Provides the transactional batch write and the read views for dispatch
/// validation records.
pub struct DespachoRepo;

impl DespachoRepo {
    /// Insert one dispatch record per measure id, in input order, within a
    /// single transaction. A failure on any insert rolls back the whole
    /// batch. Each record's `fecha_validacion` is stamped server-side at its
    /// own insert.
    ///
    /// Returns the new record ids in insertion order. Callers must reject an
    /// empty measure list before getting here.
    pub async fn create_batch(
        pool: &PgPool,
        batch: &DispatchBatch,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut ids = Vec::with_capacity(batch.medidas.len());

        for &id_medida in &batch.medidas {
            let (id,): (DbId,) = sqlx::query_as(
                "INSERT INTO fichas_despacho \
                    (id_ficha, id_cat_medida, comentario, evidencia, fecha_validacion, id_usuario) \
                 VALUES ($1, $2, $3, $4, NOW(), $5) \
                 RETURNING id_ficha_despacho",
            )
            .bind(batch.id_ficha)
            .bind(id_medida)
            .bind(&batch.comentario)
            .bind(&batch.evidencia)
            .bind(batch.id_usuario)
            .fetch_one(&mut *tx)
            .await?;
            ids.push(id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    /// Find a single dispatch record view by id.
    pub async fn find_view_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DispatchRecordView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM fichas_despacho fd \
             LEFT JOIN cat_medida_seguridad m ON m.id_cat_medida = fd.id_cat_medida \
             WHERE fd.id_ficha_despacho = $1"
        );
        sqlx::query_as::<_, DispatchRecordView>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all dispatch record views for one fiche, newest validation first.
    pub async fn list_views_by_ficha(
        pool: &PgPool,
        id_ficha: DbId,
    ) -> Result<Vec<DispatchRecordView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM fichas_despacho fd \
             LEFT JOIN cat_medida_seguridad m ON m.id_cat_medida = fd.id_cat_medida \
             WHERE fd.id_ficha = $1 \
             ORDER BY fd.fecha_validacion DESC"
        );
        sqlx::query_as::<_, DispatchRecordView>(&query)
            .bind(id_ficha)
            .fetch_all(pool)
            .await
    }
}
