//! Catalog rows: small, mostly static reference lists with an id and a
//! display label. Subsectors and safety measures additionally carry an
//! `estatus` flag that filters listings.

use serde::Serialize;
use sqlx::FromRow;

use irs_core::types::DbId;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id_cat_sector: DbId,
    pub sector: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsector {
    pub id_cat_subsector: DbId,
    pub id_cat_sector: DbId,
    pub subsector: String,
    pub estatus: i32,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prioridad {
    pub id_cat_prioridad: DbId,
    pub prioridad: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condicion {
    pub id_cat_condicion: DbId,
    pub condicion: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Informacion {
    pub id_cat_informacion: DbId,
    pub informacion: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Municipio {
    pub id_cat_municipio: DbId,
    pub municipio: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegacion {
    pub id_cat_delegacion: DbId,
    pub delegacion: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedidaSeguridad {
    pub id_cat_medida: DbId,
    pub medida: String,
    pub estatus: i32,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rol {
    pub id_cat_rol: DbId,
    pub rol: String,
}
