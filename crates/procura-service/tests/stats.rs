//! Aggregate statistics integration tests.

mod common;

use common::TestHarness;

#[tokio::test]
async fn empty_store_reports_zeroes() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/stats").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["pendientes"], 0);
    assert_eq!(body["aprobadas"], 0);
    assert_eq!(body["rechazadas"], 0);
    assert_eq!(body["valorTotal"].as_f64(), Some(0.0));
    assert_eq!(body["valorPendiente"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn counts_and_sums_follow_status() {
    let harness = TestHarness::new();

    // One pending at 100, one approved at 200.
    harness.submit("Ana", "Ferretodo", "100", "Efectivo").await;
    let approved = harness
        .submit("Ben", "Electrohogar", "200", "Tarjeta")
        .await;
    harness.decide(approved, "Aprobado").await.assert_status_ok();

    let body: serde_json::Value = harness.server.get("/api/stats").await.json();
    assert_eq!(body["pendientes"], 1);
    assert_eq!(body["aprobadas"], 1);
    assert_eq!(body["rechazadas"], 0);
    assert_eq!(body["valorTotal"].as_f64(), Some(200.0));
    assert_eq!(body["valorPendiente"].as_f64(), Some(100.0));
}

#[tokio::test]
async fn rejected_amounts_count_in_neither_sum() {
    let harness = TestHarness::new();

    let rejected = harness
        .submit("Carla", "Papeleria Sur", "999.99", "Efectivo")
        .await;
    harness
        .decide(rejected, "Rechazado")
        .await
        .assert_status_ok();

    let body: serde_json::Value = harness.server.get("/api/stats").await.json();
    assert_eq!(body["pendientes"], 0);
    assert_eq!(body["aprobadas"], 0);
    assert_eq!(body["rechazadas"], 1);
    assert_eq!(body["valorTotal"].as_f64(), Some(0.0));
    assert_eq!(body["valorPendiente"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn fractional_amounts_survive_the_round_trip() {
    let harness = TestHarness::new();

    harness
        .submit("Ana", "Ferretodo", "1500.50", "Transferencia")
        .await;

    let body: serde_json::Value = harness.server.get("/api/stats").await.json();
    assert_eq!(body["valorPendiente"].as_f64(), Some(1500.50));
}
