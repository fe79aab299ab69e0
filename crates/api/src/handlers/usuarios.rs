//! Handlers for the `/usuarios` resource: user administration.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use irs_core::error::CoreError;
use irs_core::types::DbId;
use irs_db::models::user::{CreateUser, UpdateUser};
use irs_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating a user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub nombre: Option<String>,
    pub app: Option<String>,
    pub apm: Option<String>,
    pub alias: Option<String>,
    #[validate(length(min = 1, message = "El campo 'usuario' es requerido"))]
    pub usuario: String,
    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres"))]
    pub password: String,
    pub status: Option<i32>,
    pub id_rol: Option<DbId>,
}

/// Request body for updating a user; every field optional, `password` when
/// present replaces the stored hash.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub nombre: Option<String>,
    pub app: Option<String>,
    pub apm: Option<String>,
    pub alias: Option<String>,
    pub usuario: Option<String>,
    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres"))]
    pub password: Option<String>,
    pub status: Option<i32>,
    pub id_rol: Option<DbId>,
}

fn validation_error(e: validator::ValidationErrors) -> AppError {
    AppError::Core(CoreError::Validation(e.to_string()))
}

/// Best-effort client address for the audit column: the first
/// `x-forwarded-for` hop when present.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "0.0.0.0".to_string())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/usuarios
///
/// Active users only (soft-deleted rows are hidden), role labels resolved.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let usuarios = UserRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: usuarios }))
}

/// GET /api/v1/usuarios/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let usuario = UserRepo::find_with_role(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Usuario",
            id,
        }))?;
    Ok(Json(DataResponse { data: usuario }))
}

/// POST /api/v1/usuarios
///
/// Creates a user with a freshly hashed password. A duplicate username trips
/// the unique constraint and surfaces as a 409.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(validation_error)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let created = UserRepo::create(
        &state.pool,
        &CreateUser {
            nombre: input.nombre,
            app: input.app,
            apm: input.apm,
            alias: input.alias,
            usuario: input.usuario,
            password_hash,
            status: input.status.unwrap_or(1),
            ip: client_ip(&headers),
            id_rol: input.id_rol,
        },
    )
    .await?;
    tracing::info!(user_id = created.id, "Usuario created");

    let view = UserRepo::find_with_role(&state.pool, created.id)
        .await?
        .expect("just created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// PUT /api/v1/usuarios/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(validation_error)?;

    let password_hash = match &input.password {
        Some(password) => Some(
            hash_password(password)
                .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?,
        ),
        None => None,
    };

    UserRepo::update(
        &state.pool,
        id,
        &UpdateUser {
            nombre: input.nombre,
            app: input.app,
            apm: input.apm,
            alias: input.alias,
            usuario: input.usuario,
            password_hash,
            status: input.status,
            id_rol: input.id_rol,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Usuario",
        id,
    }))?;

    let view = UserRepo::find_with_role(&state.pool, id)
        .await?
        .expect("just updated");
    Ok(Json(DataResponse { data: view }))
}

/// DELETE /api/v1/usuarios/{id}
///
/// Soft delete: flips `status` to 0; the row (and its audit trail) survives.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        tracing::info!(user_id = id, "Usuario deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Usuario",
            id,
        }))
    }
}
