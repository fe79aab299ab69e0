//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use irs_core::types::{DbId, Timestamp};

/// Full user row from the `usuario` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`UserWithRole`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    #[sqlx(rename = "id_usuario")]
    pub id: DbId,
    pub nombre: Option<String>,
    pub app: Option<String>,
    pub apm: Option<String>,
    pub alias: Option<String>,
    pub usuario: String,
    pub password: String,
    pub status: Option<i32>,
    pub status_list: Option<i32>,
    pub ultimo_acceso: Timestamp,
    pub intento: Option<i32>,
    pub ip: String,
    pub fecha_hora_creacion: Option<Timestamp>,
    pub id_rol: Option<DbId>,
}

/// Safe user representation for API responses: no password hash, role label
/// resolved through `cat_rol`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRole {
    pub id_usuario: DbId,
    pub nombre: Option<String>,
    pub app: Option<String>,
    pub apm: Option<String>,
    pub alias: Option<String>,
    pub usuario: String,
    pub status: Option<i32>,
    pub status_list: Option<i32>,
    pub ultimo_acceso: Timestamp,
    pub intento: Option<i32>,
    pub ip: String,
    pub fecha_hora_creacion: Option<Timestamp>,
    pub id_rol: Option<DbId>,
    pub nombre_rol: String,
}

/// DTO for inserting a new user. The password arrives here already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub nombre: Option<String>,
    pub app: Option<String>,
    pub apm: Option<String>,
    pub alias: Option<String>,
    pub usuario: String,
    pub password_hash: String,
    pub status: i32,
    pub ip: String,
    pub id_rol: Option<DbId>,
}

/// DTO for updating an existing user. Only non-`None` fields are applied;
/// `password_hash`, when present, is a freshly hashed replacement.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub nombre: Option<String>,
    pub app: Option<String>,
    pub apm: Option<String>,
    pub alias: Option<String>,
    pub usuario: Option<String>,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub status: Option<i32>,
    pub id_rol: Option<DbId>,
}
