//! HTTP-level integration tests for user administration and authentication.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, get_auth, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

fn user_body(usuario: &str, password: &str) -> serde_json::Value {
    json!({
        "nombre": "Ana",
        "app": "García",
        "usuario": usuario,
        "password": password,
        "idRol": 2,
    })
}

async fn create_user(app: &axum::Router, usuario: &str, password: &str) -> i64 {
    let response = post_json(app.clone(), "/api/v1/usuarios", user_body(usuario, password)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["idUsuario"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// User administration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_user_resolves_role_and_hides_password(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/v1/usuarios",
        user_body("agarcia", "contraseña-segura"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["usuario"], "agarcia");
    assert_eq!(json["data"]["nombreRol"], "Operador");
    assert!(json["data"].get("password").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_username_returns_conflict(pool: PgPool) {
    let app = build_test_app(pool);
    create_user(&app, "duplicado", "contraseña-segura").await;

    let response = post_json(
        app,
        "/api/v1/usuarios",
        user_body("duplicado", "otra-contraseña"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn short_password_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/usuarios", user_body("corto", "corta")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivation_hides_user_from_listing(pool: PgPool) {
    let app = build_test_app(pool);
    let id = create_user(&app, "baja", "contraseña-segura").await;

    let response = delete(app.clone(), &format!("/api/v1/usuarios/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let listing = body_json(get(app.clone(), "/api/v1/usuarios").await).await;
    assert!(listing["data"].as_array().unwrap().is_empty());

    // A second deactivation finds nothing active.
    let again = delete(app, &format!("/api/v1/usuarios/{id}")).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_changes_only_supplied_fields(pool: PgPool) {
    let app = build_test_app(pool);
    let id = create_user(&app, "parcial", "contraseña-segura").await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/usuarios/{id}"),
        json!({ "alias": "La Jefa" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["alias"], "La Jefa");
    assert_eq!(json["data"]["nombre"], "Ana");
    assert_eq!(json["data"]["usuario"], "parcial");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_user_view_and_token(pool: PgPool) {
    let app = build_test_app(pool);
    create_user(&app, "ana", "contraseña-segura").await;

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "usuario": "ana", "password": "contraseña-segura" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["usuario"]["usuario"], "ana");
    assert_eq!(json["data"]["usuario"]["nombreRol"], "Operador");
    assert!(json["data"]["token"].as_str().unwrap().contains('.'));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn perfil_requires_a_valid_token(pool: PgPool) {
    let app = build_test_app(pool);
    create_user(&app, "ana", "contraseña-segura").await;

    let login = body_json(
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "usuario": "ana", "password": "contraseña-segura" }),
        )
        .await,
    )
    .await;
    let token = login["data"]["token"].as_str().unwrap().to_string();

    let perfil = get_auth(app.clone(), "/api/v1/auth/perfil", &token).await;
    assert_eq!(perfil.status(), StatusCode::OK);
    assert_eq!(body_json(perfil).await["data"]["usuario"], "ana");

    let without_token = get(app.clone(), "/api/v1/auth/perfil").await;
    assert_eq!(without_token.status(), StatusCode::UNAUTHORIZED);

    let bad_token = get_auth(app, "/api/v1/auth/perfil", "no-es-un-jwt").await;
    assert_eq!(bad_token.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_login_increments_attempts_and_success_resets(pool: PgPool) {
    let app = build_test_app(pool);
    let id = create_user(&app, "ana", "contraseña-segura").await;

    let wrong = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "usuario": "ana", "password": "incorrecta" }),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let view = body_json(get(app.clone(), &format!("/api/v1/usuarios/{id}")).await).await;
    assert_eq!(view["data"]["intento"], 1);

    let ok = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "usuario": "ana", "password": "contraseña-segura" }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);

    let view = body_json(get(app, &format!("/api/v1/usuarios/{id}")).await).await;
    assert_eq!(view["data"]["intento"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_or_deactivated_users_cannot_login(pool: PgPool) {
    let app = build_test_app(pool);

    let unknown = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "usuario": "nadie", "password": "lo-que-sea" }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);

    let id = create_user(&app, "baja", "contraseña-segura").await;
    delete(app.clone(), &format!("/api/v1/usuarios/{id}")).await;

    let deactivated = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "usuario": "baja", "password": "contraseña-segura" }),
    )
    .await;
    assert_eq!(deactivated.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_credentials_are_a_validation_error(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "usuario": "", "password": "x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Change password
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn change_password_enforces_every_rule(pool: PgPool) {
    let app = build_test_app(pool);
    let id = create_user(&app, "ana", "contraseña-segura").await;

    // Wrong current password.
    let wrong_current = post_json(
        app.clone(),
        "/api/v1/auth/cambiar-contrasena",
        json!({
            "idUsuario": id,
            "contrasenaActual": "incorrecta",
            "contrasenaNueva": "nueva-contraseña",
            "confirmarContrasena": "nueva-contraseña",
        }),
    )
    .await;
    assert_eq!(wrong_current.status(), StatusCode::BAD_REQUEST);

    // Confirmation mismatch.
    let mismatch = post_json(
        app.clone(),
        "/api/v1/auth/cambiar-contrasena",
        json!({
            "idUsuario": id,
            "contrasenaActual": "contraseña-segura",
            "contrasenaNueva": "nueva-contraseña",
            "confirmarContrasena": "otra-cosa",
        }),
    )
    .await;
    assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);

    // Same as the current one.
    let unchanged = post_json(
        app.clone(),
        "/api/v1/auth/cambiar-contrasena",
        json!({
            "idUsuario": id,
            "contrasenaActual": "contraseña-segura",
            "contrasenaNueva": "contraseña-segura",
            "confirmarContrasena": "contraseña-segura",
        }),
    )
    .await;
    assert_eq!(unchanged.status(), StatusCode::BAD_REQUEST);

    // Valid change, then the new password logs in.
    let ok = post_json(
        app.clone(),
        "/api/v1/auth/cambiar-contrasena",
        json!({
            "idUsuario": id,
            "contrasenaActual": "contraseña-segura",
            "contrasenaNueva": "nueva-contraseña",
            "confirmarContrasena": "nueva-contraseña",
        }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);

    let login = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "usuario": "ana", "password": "nueva-contraseña" }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn change_password_unknown_user_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/cambiar-contrasena",
        json!({
            "idUsuario": 9999,
            "contrasenaActual": "algo",
            "contrasenaNueva": "nueva-contraseña",
            "confirmarContrasena": "nueva-contraseña",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
