//! Repository for the `ficha_informativa` table.
//!
//! Listings fetch full rows ordered newest-first; the named views (today,
//! drafts, concluded, ranges) are selected in application memory by the
//! classifier in `irs-core`, so this repository stays a plain store.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use irs_core::types::DbId;

use crate::models::ficha::{Ficha, FichaInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id_ficha, cedula, delegacion, municipio, lugar, latitud, longitud, \
    hora_suceso_inicio, hora_suceso_fin, fecha_suceso, sector, subsector, num_asistentes, \
    fecha_elaboracion, hora_elaboracion, prioridad, condicion, informacion, asunto, hechos, \
    acuerdos, id_informo, id_usuario, id_autorizo, fecha_recepcion, hora_recepcion, \
    id_estado_actual, motivo_cancelacion, activo, folio_interno, direccion, visto, \
    id_ficha_anterior, fecha_validacion";

/// Bind every [`FichaInput`] column in declaration order.
///
/// Shared by create (placeholders start at `$1`) and update (start after the
/// id); bind order is what matters, not placeholder numbers.
fn bind_input<'q>(
    query: QueryAs<'q, Postgres, Ficha, PgArguments>,
    input: &'q FichaInput,
) -> QueryAs<'q, Postgres, Ficha, PgArguments> {
    query
        .bind(input.cedula)
        .bind(&input.delegacion)
        .bind(&input.municipio)
        .bind(&input.lugar)
        .bind(&input.latitud)
        .bind(&input.longitud)
        .bind(input.hora_suceso_inicio)
        .bind(input.hora_suceso_fin)
        .bind(input.fecha_suceso)
        .bind(&input.sector)
        .bind(&input.subsector)
        .bind(input.num_asistentes)
        .bind(input.fecha_elaboracion)
        .bind(input.hora_elaboracion)
        .bind(&input.prioridad)
        .bind(&input.condicion)
        .bind(&input.informacion)
        .bind(&input.asunto)
        .bind(&input.hechos)
        .bind(&input.acuerdos)
        .bind(input.id_informo)
        .bind(input.id_usuario)
        .bind(input.id_autorizo)
        .bind(input.fecha_recepcion)
        .bind(input.hora_recepcion)
        .bind(input.id_estado_actual)
        .bind(&input.motivo_cancelacion)
        .bind(input.activo)
        .bind(&input.folio_interno)
        .bind(&input.direccion)
        .bind(input.visto)
        .bind(input.id_ficha_anterior)
        .bind(input.fecha_validacion)
}

/// Provides CRUD and search operations for fiches.
pub struct FichaRepo;

impl FichaRepo {
    /// Insert a new fiche, returning the created row.
    pub async fn create(pool: &PgPool, input: &FichaInput) -> Result<Ficha, sqlx::Error> {
        let query = format!(
            "INSERT INTO ficha_informativa (cedula, delegacion, municipio, lugar, latitud, \
                longitud, hora_suceso_inicio, hora_suceso_fin, fecha_suceso, sector, subsector, \
                num_asistentes, fecha_elaboracion, hora_elaboracion, prioridad, condicion, \
                informacion, asunto, hechos, acuerdos, id_informo, id_usuario, id_autorizo, \
                fecha_recepcion, hora_recepcion, id_estado_actual, motivo_cancelacion, activo, \
                folio_interno, direccion, visto, id_ficha_anterior, fecha_validacion)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, \
                $32, $33)
             RETURNING {COLUMNS}"
        );
        bind_input(sqlx::query_as::<_, Ficha>(&query), input)
            .fetch_one(pool)
            .await
    }

    /// Find a fiche by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ficha>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ficha_informativa WHERE id_ficha = $1");
        sqlx::query_as::<_, Ficha>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every fiche, newest elaboration first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Ficha>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ficha_informativa ORDER BY fecha_elaboracion DESC NULLS LAST"
        );
        sqlx::query_as::<_, Ficha>(&query).fetch_all(pool).await
    }

    /// Replace every column of an existing fiche.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &FichaInput,
    ) -> Result<Option<Ficha>, sqlx::Error> {
        let query = format!(
            "UPDATE ficha_informativa SET
                cedula = $2, delegacion = $3, municipio = $4, lugar = $5, latitud = $6,
                longitud = $7, hora_suceso_inicio = $8, hora_suceso_fin = $9, fecha_suceso = $10,
                sector = $11, subsector = $12, num_asistentes = $13, fecha_elaboracion = $14,
                hora_elaboracion = $15, prioridad = $16, condicion = $17, informacion = $18,
                asunto = $19, hechos = $20, acuerdos = $21, id_informo = $22, id_usuario = $23,
                id_autorizo = $24, fecha_recepcion = $25, hora_recepcion = $26,
                id_estado_actual = $27, motivo_cancelacion = $28, activo = $29,
                folio_interno = $30, direccion = $31, visto = $32, id_ficha_anterior = $33,
                fecha_validacion = $34
             WHERE id_ficha = $1
             RETURNING {COLUMNS}"
        );
        bind_input(sqlx::query_as::<_, Ficha>(&query).bind(id), input)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a fiche. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ficha_informativa WHERE id_ficha = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over delegation, place, sector, and
    /// subject, newest first.
    pub async fn search(pool: &PgPool, criterio: &str) -> Result<Vec<Ficha>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ficha_informativa
             WHERE delegacion ILIKE $1 OR lugar ILIKE $1 OR sector ILIKE $1 OR asunto ILIKE $1
             ORDER BY fecha_elaboracion DESC NULLS LAST"
        );
        sqlx::query_as::<_, Ficha>(&query)
            .bind(format!("%{criterio}%"))
            .fetch_all(pool)
            .await
    }

    /// Substring search restricted to drafts, matching the columns the draft
    /// screen displays.
    pub async fn search_drafts(pool: &PgPool, criterio: &str) -> Result<Vec<Ficha>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ficha_informativa
             WHERE activo = 2
               AND (delegacion LIKE $1 OR sector LIKE $1 OR prioridad LIKE $1
                    OR condicion LIKE $1 OR lugar LIKE $1 OR asunto LIKE $1)
             ORDER BY fecha_elaboracion DESC NULLS LAST"
        );
        sqlx::query_as::<_, Ficha>(&query)
            .bind(format!("%{criterio}%"))
            .fetch_all(pool)
            .await
    }

    /// Count all fiches (used by the database health endpoint).
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ficha_informativa")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
