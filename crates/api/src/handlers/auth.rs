//! Handlers for `/auth`: login and password change.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use irs_core::error::CoreError;
use irs_core::types::DbId;
use irs_db::models::user::UserWithRole;
use irs_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_new_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login payload: the safe user view plus a Bearer token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub usuario: UserWithRole,
    pub token: String,
}

/// Request body for `POST /auth/cambiar-contrasena`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiarContrasenaRequest {
    pub id_usuario: DbId,
    #[serde(default)]
    pub contrasena_actual: String,
    #[serde(default)]
    pub contrasena_nueva: String,
    #[serde(default)]
    pub confirmar_contrasena: String,
}

/// POST /api/v1/auth/login
///
/// Verifies credentials against the stored Argon2id hash. A failed attempt
/// bumps the user's `intento` counter; a successful one resets it and stamps
/// `ultimo_acceso`.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    if input.usuario.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "El campo 'usuario' es requerido".to_string(),
        )));
    }
    if input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "El campo 'password' es requerido".to_string(),
        )));
    }

    let invalid =
        || AppError::Core(CoreError::Unauthorized("Usuario o contraseña incorrectos".into()));

    let user = UserRepo::find_by_username(&state.pool, &input.usuario)
        .await?
        .filter(|u| u.status == Some(1))
        .ok_or_else(invalid)?;

    let valid = verify_password(&input.password, &user.password)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        UserRepo::increment_failed_login(&state.pool, user.id).await?;
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(invalid());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let view = UserRepo::find_with_role(&state.pool, user.id)
        .await?
        .expect("user verified above");
    let token = generate_access_token(view.id_usuario, &view.nombre_rol, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = view.id_usuario, "Login succeeded");
    Ok(Json(DataResponse {
        data: LoginResponse {
            usuario: view,
            token,
        },
    }))
}

/// GET /api/v1/auth/perfil
///
/// The authenticated user's own view, resolved from the Bearer token.
pub async fn perfil(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let view = UserRepo::find_with_role(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Usuario",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/auth/cambiar-contrasena
///
/// Change-password rules, all enforced server-side: the current password
/// must verify, the new one must meet the minimum length and match its
/// confirmation, and must differ from the current one.
pub async fn cambiar_contrasena(
    State(state): State<AppState>,
    Json(input): Json<CambiarContrasenaRequest>,
) -> AppResult<impl IntoResponse> {
    if input.contrasena_actual.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "La contraseña actual es requerida".to_string(),
        )));
    }

    let errores = validate_new_password(&input.contrasena_nueva, &input.confirmar_contrasena);
    if !errores.is_empty() {
        return Err(AppError::Core(CoreError::Validation(errores.join("; "))));
    }

    let user = UserRepo::find_by_id(&state.pool, input.id_usuario)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Usuario",
            id: input.id_usuario,
        }))?;

    let actual_valida = verify_password(&input.contrasena_actual, &user.password)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !actual_valida {
        return Err(AppError::Core(CoreError::Validation(
            "La contraseña actual es incorrecta".to_string(),
        )));
    }

    let repetida = verify_password(&input.contrasena_nueva, &user.password)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if repetida {
        return Err(AppError::Core(CoreError::Validation(
            "La nueva contraseña debe ser diferente a la actual".to_string(),
        )));
    }

    let hash = hash_password(&input.contrasena_nueva)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &hash).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(Json(DataResponse {
        data: serde_json::json!({ "mensaje": "Contraseña actualizada exitosamente" }),
    }))
}
