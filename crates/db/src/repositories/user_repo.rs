//! Repository for the `usuario` table.

use sqlx::PgPool;

use irs_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User, UserWithRole};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id_usuario, nombre, app, apm, alias, usuario, password, status, \
    status_list, ultimo_acceso, intento, ip, fecha_hora_creacion, id_rol";

/// View columns: user joined with its role label (password excluded).
const VIEW_COLUMNS: &str = "u.id_usuario, u.nombre, u.app, u.apm, u.alias, u.usuario, \
    u.status, u.status_list, u.ultimo_acceso, u.intento, u.ip, u.fecha_hora_creacion, \
    u.id_rol, COALESCE(r.rol, 'Sin rol') AS nombre_rol";

/// Provides CRUD operations for users. Deletion is soft: `status` flips to 0.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// The `uq_usuario_usuario` unique constraint surfaces duplicate
    /// usernames as a database error the API layer maps to a conflict.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO usuario (nombre, app, apm, alias, usuario, password, status, \
                status_list, ultimo_acceso, intento, ip, fecha_hora_creacion, id_rol)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 1, NOW(), 0, $8, NOW(), $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.nombre)
            .bind(&input.app)
            .bind(&input.apm)
            .bind(&input.alias)
            .bind(&input.usuario)
            .bind(&input.password_hash)
            .bind(input.status)
            .bind(&input.ip)
            .bind(input.id_rol)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal id, password hash included.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM usuario WHERE id_usuario = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive), password hash included.
    pub async fn find_by_username(
        pool: &PgPool,
        usuario: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM usuario WHERE usuario = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(usuario)
            .fetch_optional(pool)
            .await
    }

    /// Find the safe role-joined view of a user.
    pub async fn find_with_role(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserWithRole>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM usuario u \
             LEFT JOIN cat_rol r ON r.id_cat_rol = u.id_rol \
             WHERE u.id_usuario = $1"
        );
        sqlx::query_as::<_, UserWithRole>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active users (status = 1) with role labels, newest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<UserWithRole>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM usuario u \
             LEFT JOIN cat_rol r ON r.id_cat_rol = u.id_rol \
             WHERE u.status = 1 \
             ORDER BY u.fecha_hora_creacion DESC NULLS LAST"
        );
        sqlx::query_as::<_, UserWithRole>(&query).fetch_all(pool).await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE usuario SET
                nombre = COALESCE($2, nombre),
                app = COALESCE($3, app),
                apm = COALESCE($4, apm),
                alias = COALESCE($5, alias),
                usuario = COALESCE($6, usuario),
                password = COALESCE($7, password),
                status = COALESCE($8, status),
                id_rol = COALESCE($9, id_rol)
             WHERE id_usuario = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(&input.app)
            .bind(&input.apm)
            .bind(&input.alias)
            .bind(&input.usuario)
            .bind(&input.password_hash)
            .bind(input.status)
            .bind(input.id_rol)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a user by flipping `status` to 0.
    ///
    /// Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE usuario SET status = 0 WHERE id_usuario = $1 AND status = 1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the failed login counter by 1.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE usuario SET intento = COALESCE(intento, 0) + 1 WHERE id_usuario = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset the attempt counter and stamp
    /// `ultimo_acceso`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE usuario SET intento = 0, ultimo_acceso = NOW() WHERE id_usuario = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Replace a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE usuario SET password = $2, ultimo_acceso = NOW() WHERE id_usuario = $1")
                .bind(id)
                .bind(password_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
