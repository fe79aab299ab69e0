//! HTTP-level integration tests for the fiche resource: CRUD, the named
//! listing views, range validation, and the statistics endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Minimal fiche body; lifecycle and state codes are supplied per test.
fn ficha_body(
    asunto: &str,
    activo: i64,
    estado: Option<i64>,
    fecha_elaboracion: Option<&str>,
) -> serde_json::Value {
    let mut body = json!({
        "delegacion": "Delegación Centro",
        "municipio": "Centro",
        "lugar": "Plaza de armas",
        "sector": "Comercio",
        "prioridad": "ALTA",
        "condicion": "NUEVO",
        "asunto": asunto,
        "activo": activo,
    });
    if let Some(e) = estado {
        body["idEstadoActual"] = json!(e);
    }
    if let Some(f) = fecha_elaboracion {
        body["fechaElaboracion"] = json!(f);
    }
    body
}

async fn create_ficha(app: &axum::Router, body: serde_json::Value) -> i64 {
    let response = post_json(app.clone(), "/api/v1/fichas", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_defaults_elaboration_timestamp_and_capture_user(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/v1/fichas",
        ficha_body("Sin fecha explícita", 3, Some(3), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["data"]["fechaElaboracion"].is_string());
    assert_eq!(json["data"]["idUsuario"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_update_delete_roundtrip(pool: PgPool) {
    let app = build_test_app(pool);
    let id = create_ficha(
        &app,
        ficha_body("Original", 3, Some(3), Some("2026-03-10T12:00:00Z")),
    )
    .await;

    let fetched = get(app.clone(), &format!("/api/v1/fichas/{id}")).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["data"]["asunto"], "Original");

    let mut replacement = ficha_body("Editado", 3, Some(2), Some("2026-03-10T12:00:00Z"));
    replacement["condicion"] = json!("CONCLUIDO");
    let updated = put_json(app.clone(), &format!("/api/v1/fichas/{id}"), replacement).await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated_json = body_json(updated).await;
    assert_eq!(updated_json["data"]["asunto"], "Editado");
    assert_eq!(updated_json["data"]["condicion"], "CONCLUIDO");

    let deleted = delete(app.clone(), &format!("/api/v1/fichas/{id}")).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = get(app, &format!("/api/v1/fichas/{id}")).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_ficha_returns_404_envelope(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/fichas/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Listing views
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn general_listing_admits_drafts_but_filters_invisible_states(pool: PgPool) {
    let app = build_test_app(pool);

    // Draft with a visible state: listed (current behavior, intentional).
    create_ficha(
        &app,
        ficha_body("Borrador visible", 2, Some(3), Some("2026-03-10T12:00:00Z")),
    )
    .await;
    // Validated with a visible state: listed.
    create_ficha(
        &app,
        ficha_body("Publicada", 3, Some(3), Some("2026-03-11T12:00:00Z")),
    )
    .await;
    // New (activo = 0): never listed.
    create_ficha(
        &app,
        ficha_body("Recién capturada", 0, Some(3), Some("2026-03-12T12:00:00Z")),
    )
    .await;
    // Validated but with no state code: never listed.
    create_ficha(
        &app,
        ficha_body("Sin estado", 3, None, Some("2026-03-13T12:00:00Z")),
    )
    .await;

    let response = get(app, "/api/v1/fichas").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let asuntos: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["asunto"].as_str().unwrap())
        .collect();
    assert_eq!(asuntos, vec!["Publicada", "Borrador visible"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn today_view_excludes_drafts_and_other_days(pool: PgPool) {
    let app = build_test_app(pool);

    // Elaborated "now" (server default), validated: in the view.
    create_ficha(&app, ficha_body("De hoy", 3, Some(3), None)).await;
    // Elaborated "now" but a draft: excluded.
    create_ficha(&app, ficha_body("Borrador de hoy", 2, Some(3), None)).await;
    // Another day: excluded.
    create_ficha(
        &app,
        ficha_body("De ayer", 3, Some(3), Some("2020-01-01T12:00:00Z")),
    )
    .await;

    let json = body_json(get(app, "/api/v1/fichas/dia-actual").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["asunto"], "De hoy");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concluded_view_requires_the_exact_predicate(pool: PgPool) {
    let app = build_test_app(pool);

    let mut concluida = ficha_body("Concluida", 3, Some(2), Some("2026-03-10T12:00:00Z"));
    concluida["condicion"] = json!("CONCLUIDO");
    concluida["cedula"] = json!(5);
    create_ficha(&app, concluida.clone()).await;

    // Lowercase condition label: excluded.
    let mut minuscula = concluida.clone();
    minuscula["asunto"] = json!("Minúscula");
    minuscula["condicion"] = json!("concluido");
    create_ficha(&app, minuscula).await;

    // No cedula: excluded.
    let mut sin_cedula = concluida.clone();
    sin_cedula["asunto"] = json!("Sin cédula");
    sin_cedula["cedula"] = serde_json::Value::Null;
    create_ficha(&app, sin_cedula).await;

    let json = body_json(get(app, "/api/v1/fichas/concluidas").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["asunto"], "Concluida");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn draft_listing_uses_fallback_labels(pool: PgPool) {
    let app = build_test_app(pool);

    let mut draft = ficha_body("Borrador", 2, Some(3), Some("2026-03-10T12:00:00Z"));
    draft["delegacion"] = json!("");
    draft["prioridad"] = json!("");
    create_ficha(&app, draft).await;

    let json = body_json(get(app, "/api/v1/fichas/borradores").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["estado"], "Sin delegación");
    assert_eq!(data[0]["prioridad"], "Sin prioridad");
    assert_eq!(data[0]["horaSuceso"], "Sin hora");
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn date_range_is_inclusive_through_the_last_instant(pool: PgPool) {
    let app = build_test_app(pool);

    create_ficha(
        &app,
        ficha_body("Al filo", 3, Some(3), Some("2026-03-15T23:59:59.999Z")),
    )
    .await;
    create_ficha(
        &app,
        ficha_body("Un día después", 3, Some(3), Some("2026-03-16T00:00:00Z")),
    )
    .await;

    let json = body_json(
        get(
            app,
            "/api/v1/fichas/rango-fechas?fechaInicio=2026-03-01&fechaFin=2026-03-15",
        )
        .await,
    )
    .await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["asunto"], "Al filo");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn date_range_rejects_missing_malformed_and_inverted_params(pool: PgPool) {
    let app = build_test_app(pool);

    let missing = get(app.clone(), "/api/v1/fichas/rango-fechas?fechaInicio=2026-03-01").await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(missing).await["code"], "VALIDATION_ERROR");

    let malformed = get(
        app.clone(),
        "/api/v1/fichas/rango-fechas?fechaInicio=01/03/2026&fechaFin=2026-03-15",
    )
    .await;
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

    let inverted = get(
        app,
        "/api/v1/fichas/rango-fechas?fechaInicio=2026-03-15&fechaFin=2026-03-01",
    )
    .await;
    assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn search_returns_compact_summaries(pool: PgPool) {
    let app = build_test_app(pool);
    create_ficha(
        &app,
        ficha_body("Bloqueo carretero", 3, Some(3), Some("2026-03-10T12:00:00Z")),
    )
    .await;

    let json = body_json(get(app, "/api/v1/fichas/buscar?criterio=BLOQUEO").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["delegacion"], "Delegación Centro");
    // Summaries carry no folio or narrative fields.
    assert!(data[0].get("folio").is_none());
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn estadisticas_returns_all_four_sections(pool: PgPool) {
    let app = build_test_app(pool);

    // Empty table: zeroed summary, fully labeled series.
    let empty = body_json(get(app.clone(), "/api/v1/fichas/estadisticas").await).await;
    assert_eq!(empty["data"]["resumen"]["totalFichas"], 0);
    assert_eq!(empty["data"]["resumen"]["crecimientoMensual"], 0.0);
    assert_eq!(empty["data"]["fichasPorMes"]["labels"].as_array().unwrap().len(), 12);
    assert_eq!(
        empty["data"]["tendenciaMensual"]["datasets"]
            .as_array()
            .unwrap()
            .len(),
        2
    );

    create_ficha(&app, ficha_body("Contada", 3, Some(3), None)).await;
    create_ficha(&app, ficha_body("Borrador contado", 2, Some(3), None)).await;

    // Statistics run over the entire set, drafts included.
    let loaded = body_json(get(app, "/api/v1/fichas/estadisticas").await).await;
    assert_eq!(loaded["data"]["resumen"]["totalFichas"], 2);
    assert_eq!(loaded["data"]["resumen"]["fichasHoy"], 2);
    assert_eq!(
        loaded["data"]["fichasPorEstado"]["labels"][0],
        "Delegación Centro"
    );
}
