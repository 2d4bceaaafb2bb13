//! Submission, listing, and transition integration tests.

mod common;

use common::{form, form_with_attachment, TestHarness};

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn submit_without_attachment_creates_pending_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/solicitudes")
        .multipart(form("Laura Gomez", "Suministros SA", "1500.50", "Transferencia"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Solicitud enviada exitosamente.");

    let listed: serde_json::Value = harness.server.get("/api/solicitudes").await.json();
    let rows = listed.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["responsable"], "Laura Gomez");
    assert_eq!(rows[0]["estado"], "Pendiente");
    assert_eq!(rows[0]["valor"].as_f64(), Some(1500.50));
    assert!(rows[0]["cotizacion"].is_null());
    assert!(rows[0]["id"].as_i64().is_some());
}

#[tokio::test]
async fn submit_with_attachment_stores_and_serves_the_file() {
    let harness = TestHarness::new();

    harness
        .server
        .post("/api/solicitudes")
        .multipart(form_with_attachment("Laura Gomez", "cotizacion enero.pdf", b"%PDF-1.4"))
        .await
        .assert_status_ok();

    let listed: serde_json::Value = harness.server.get("/api/solicitudes").await.json();
    let reference = listed[0]["cotizacion"].as_str().unwrap().to_string();
    assert!(reference.starts_with("/uploads/"));

    // The stored file is served back under its reference.
    let download = harness.server.get(&reference).await;
    download.assert_status_ok();
    assert_eq!(download.as_bytes().as_ref(), b"%PDF-1.4");
}

#[tokio::test]
async fn submit_negative_amount_is_rejected_without_a_row() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/solicitudes")
        .multipart(form("Laura Gomez", "Suministros SA", "-5", "Transferencia"))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("valor"));

    let listed: serde_json::Value = harness.server.get("/api/solicitudes").await.json();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn submit_reports_every_missing_field() {
    let harness = TestHarness::new();

    let incomplete = axum_test::multipart::MultipartForm::new().add_text("valor", "100");
    let response = harness
        .server
        .post("/api/solicitudes")
        .multipart(incomplete)
        .await;

    response.assert_status_bad_request();
    let error = response.json::<serde_json::Value>()["error"]
        .as_str()
        .unwrap()
        .to_string();
    for field in ["responsable", "correo", "proveedor", "nit", "medioPago"] {
        assert!(error.contains(field), "missing {field} in: {error}");
    }
}

#[tokio::test]
async fn submit_disallowed_file_type_is_rejected() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/solicitudes")
        .multipart(form_with_attachment("Laura Gomez", "script.exe", b"MZ"))
        .await;

    response.assert_status_bad_request();

    let listed: serde_json::Value = harness.server.get("/api/solicitudes").await.json();
    assert!(listed.as_array().unwrap().is_empty());
}

// ============================================================================
// Transitions
// ============================================================================

#[tokio::test]
async fn approve_updates_status_and_confirms() {
    let harness = TestHarness::new();
    let id = harness
        .submit("Laura Gomez", "Suministros SA", "1500", "Transferencia")
        .await;

    let response = harness.decide(id, "Aprobado").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Solicitud Aprobado correctamente.");

    let listed: serde_json::Value = harness.server.get("/api/solicitudes").await.json();
    assert_eq!(listed[0]["estado"], "Aprobado");
}

#[tokio::test]
async fn repeated_transition_is_rejected() {
    let harness = TestHarness::new();
    let id = harness
        .submit("Laura Gomez", "Suministros SA", "1500", "Transferencia")
        .await;

    harness.decide(id, "Aprobado").await.assert_status_ok();

    let second = harness.decide(id, "Rechazado").await;
    second.assert_status(axum::http::StatusCode::CONFLICT);

    // The first decision stands.
    let listed: serde_json::Value = harness.server.get("/api/solicitudes").await.json();
    assert_eq!(listed[0]["estado"], "Aprobado");
}

#[tokio::test]
async fn transition_on_unknown_id_is_not_found() {
    let harness = TestHarness::new();

    let response = harness.decide(9999, "Aprobado").await;
    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "No se encontró la solicitud");
}

#[tokio::test]
async fn unrecognized_estado_is_bad_request() {
    let harness = TestHarness::new();
    let id = harness
        .submit("Laura Gomez", "Suministros SA", "1500", "Transferencia")
        .await;

    let response = harness.decide(id, "Pendiente").await;
    response.assert_status_bad_request();

    // Still pending and approvable.
    harness.decide(id, "Aprobado").await.assert_status_ok();
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn listing_orders_pending_then_approved_then_rejected() {
    let harness = TestHarness::new();

    // A(approved, oldest), B(pending), C(rejected, newest) => [B, A, C].
    let a = harness
        .submit("Ana", "Ferretodo", "100", "Efectivo")
        .await;
    harness.decide(a, "Aprobado").await.assert_status_ok();
    let b = harness
        .submit("Ben", "Electrohogar", "200", "Tarjeta")
        .await;
    let c = harness
        .submit("Carla", "Papeleria Sur", "300", "Efectivo")
        .await;
    harness.decide(c, "Rechazado").await.assert_status_ok();

    let listed: serde_json::Value = harness.server.get("/api/solicitudes").await.json();
    let ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![b, a, c]);
}

#[tokio::test]
async fn status_filter_returns_only_pending_newest_first() {
    let harness = TestHarness::new();

    let a = harness
        .submit("Ana", "Ferretodo", "100", "Efectivo")
        .await;
    harness.decide(a, "Aprobado").await.assert_status_ok();
    let b = harness
        .submit("Ben", "Electrohogar", "200", "Tarjeta")
        .await;
    let c = harness
        .submit("Carla", "Papeleria Sur", "300", "Efectivo")
        .await;

    let listed: serde_json::Value = harness
        .server
        .get("/api/solicitudes")
        .add_query_param("estado", "Pendiente")
        .await
        .json();
    let ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![c, b]);
}

#[tokio::test]
async fn filters_combine_with_and() {
    let harness = TestHarness::new();
    harness.submit("Ana", "Ferretodo", "100", "Efectivo").await;
    harness.submit("Ben", "Electrohogar", "200", "Tarjeta").await;
    harness
        .submit("Carla", "Ferreteria Norte", "300", "Tarjeta")
        .await;

    // Case-insensitive substring over vendor OR requester.
    let listed: serde_json::Value = harness
        .server
        .get("/api/solicitudes")
        .add_query_param("proveedor", "FERRE")
        .await
        .json();
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let listed: serde_json::Value = harness
        .server
        .get("/api/solicitudes")
        .add_query_param("proveedor", "ferre")
        .add_query_param("medio", "Tarjeta")
        .await
        .json();
    let rows = listed.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["responsable"], "Carla");
}

#[tokio::test]
async fn date_range_filter_is_inclusive_of_today() {
    let harness = TestHarness::new();
    harness.submit("Ana", "Ferretodo", "100", "Efectivo").await;

    let today = chrono::Utc::now().date_naive().to_string();
    let listed: serde_json::Value = harness
        .server
        .get("/api/solicitudes")
        .add_query_param("inicio", &today)
        .add_query_param("fin", &today)
        .await
        .json();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let listed: serde_json::Value = harness
        .server
        .get("/api/solicitudes")
        .add_query_param("inicio", "2001-01-01")
        .add_query_param("fin", "2001-01-31")
        .await
        .json();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_date_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/api/solicitudes")
        .add_query_param("inicio", "not-a-date")
        .add_query_param("fin", "2024-01-31")
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn unknown_estado_filter_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/api/solicitudes")
        .add_query_param("estado", "Cancelado")
        .await;
    response.assert_status_bad_request();
}
