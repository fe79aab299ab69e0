//! Read-only lookups over the `cat_*` reference tables, each ordered by its
//! display label.

use sqlx::PgPool;

use irs_core::types::DbId;

use crate::models::catalog::{
    Condicion, Delegacion, Informacion, MedidaSeguridad, Municipio, Prioridad, Rol, Sector,
    Subsector,
};

/// Provides the catalog lookups backing the capture-form dropdowns.
pub struct CatalogRepo;

impl CatalogRepo {
    pub async fn list_sectors(pool: &PgPool) -> Result<Vec<Sector>, sqlx::Error> {
        sqlx::query_as("SELECT id_cat_sector, sector FROM cat_sector ORDER BY sector")
            .fetch_all(pool)
            .await
    }

    /// Active subsectors only (`estatus = 1`).
    pub async fn list_subsectors(pool: &PgPool) -> Result<Vec<Subsector>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id_cat_subsector, id_cat_sector, subsector, estatus \
             FROM cat_subsector WHERE estatus = 1 ORDER BY subsector",
        )
        .fetch_all(pool)
        .await
    }

    /// Active subsectors of one sector.
    pub async fn list_subsectors_by_sector(
        pool: &PgPool,
        id_sector: DbId,
    ) -> Result<Vec<Subsector>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id_cat_subsector, id_cat_sector, subsector, estatus \
             FROM cat_subsector WHERE id_cat_sector = $1 AND estatus = 1 ORDER BY subsector",
        )
        .bind(id_sector)
        .fetch_all(pool)
        .await
    }

    pub async fn list_priorities(pool: &PgPool) -> Result<Vec<Prioridad>, sqlx::Error> {
        sqlx::query_as("SELECT id_cat_prioridad, prioridad FROM cat_prioridad ORDER BY prioridad")
            .fetch_all(pool)
            .await
    }

    pub async fn list_conditions(pool: &PgPool) -> Result<Vec<Condicion>, sqlx::Error> {
        sqlx::query_as("SELECT id_cat_condicion, condicion FROM cat_condicion ORDER BY condicion")
            .fetch_all(pool)
            .await
    }

    pub async fn list_information_kinds(pool: &PgPool) -> Result<Vec<Informacion>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id_cat_informacion, informacion FROM cat_informacion ORDER BY informacion",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_municipalities(pool: &PgPool) -> Result<Vec<Municipio>, sqlx::Error> {
        sqlx::query_as("SELECT id_cat_municipio, municipio FROM cat_municipio ORDER BY municipio")
            .fetch_all(pool)
            .await
    }

    pub async fn list_delegations(pool: &PgPool) -> Result<Vec<Delegacion>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id_cat_delegacion, delegacion FROM cat_delegacion ORDER BY delegacion",
        )
        .fetch_all(pool)
        .await
    }

    /// Active safety measures only (`estatus = 1`).
    pub async fn list_active_measures(pool: &PgPool) -> Result<Vec<MedidaSeguridad>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id_cat_medida, medida, estatus \
             FROM cat_medida_seguridad WHERE estatus = 1 ORDER BY medida",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_roles(pool: &PgPool) -> Result<Vec<Rol>, sqlx::Error> {
        sqlx::query_as("SELECT id_cat_rol, rol FROM cat_rol ORDER BY rol")
            .fetch_all(pool)
            .await
    }
}
