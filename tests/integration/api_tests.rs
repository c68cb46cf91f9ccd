//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo test --test api_tests -- --ignored`

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000/api/v1";

fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

fn parse_date(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .expect("Date is not a string")
        .parse()
        .expect("Invalid RFC 3339 date")
}

/// Register equipment and return (equipment, plan)
async fn create_equipment(client: &Client, body: Value) -> (Value, Value) {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    (body["equipment"].clone(), body["plan"].clone())
}

async fn get_plan(client: &Client, plan_id: i64) -> Value {
    client
        .get(format!("{}/plans/{}", BASE_URL, plan_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response")
}

async fn history_for(client: &Client, plan_id: i64) -> Vec<Value> {
    let body: Value = client
        .get(format!("{}/lubrication/history?plan_id={}&limit=100", BASE_URL, plan_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    body.as_array().cloned().unwrap_or_default()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_reports_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
#[ignore]
async fn test_skf_calculator() {
    let client = Client::new();

    let response = client
        .get(format!("{}/lubrication/skf?diameter_mm=20&width_mm=10", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["quantity_grams"], 1.0);

    let response = client
        .get(format!("{}/lubrication/skf?diameter_mm=0&width_mm=10", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_create_equipment_creates_plan() {
    let client = Client::new();

    let (equipment, plan) = create_equipment(
        &client,
        json!({
            "name": unique_name("Conveyor C-7"),
            "criticality": "critical",
            "interval_days": 30,
            "bearing_diameter_mm": 52,
            "bearing_width_mm": 15
        }),
    )
    .await;

    assert_eq!(equipment["status"], "active");
    assert_eq!(plan["equipment_id"], equipment["id"]);
    assert_eq!(plan["quantity_grams"], 3.9);

    let last = parse_date(&plan["last_service_date"]);
    let next = parse_date(&plan["next_due_date"]);
    assert_eq!(next - last, Duration::days(30));
}

#[tokio::test]
#[ignore]
async fn test_duplicate_equipment_name_conflicts() {
    let client = Client::new();
    let name = unique_name("Gearbox G-1");

    create_equipment(&client, json!({ "name": name })).await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_register_execution_advances_plan() {
    let client = Client::new();

    let (_, plan) = create_equipment(
        &client,
        json!({ "name": unique_name("Pump P-101"), "interval_days": 30 }),
    )
    .await;
    let plan_id = plan["id"].as_i64().expect("No plan ID");
    let t0 = parse_date(&plan["last_service_date"]);
    let executed_at = t0 + Duration::days(35);

    let response = client
        .post(format!("{}/lubrication/plans/{}/executions", BASE_URL, plan_id))
        .json(&json!({
            "executed_at": executed_at,
            "quantity_applied": 12.5,
            "technician": "R. Gómez",
            "notes": "Purged old grease"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let entry: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(entry["plan_id"], plan_id);
    assert_eq!(entry["quantity_applied"], 12.5);

    let plan = get_plan(&client, plan_id).await;
    assert_eq!(parse_date(&plan["last_service_date"]), executed_at);
    assert_eq!(parse_date(&plan["next_due_date"]), t0 + Duration::days(65));

    let history = history_for(&client, plan_id).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["quantity_applied"], 12.5);
}

#[tokio::test]
#[ignore]
async fn test_update_plan_interval_recomputes_due_date() {
    let client = Client::new();

    let (_, plan) = create_equipment(
        &client,
        json!({ "name": unique_name("Blower B-9"), "interval_days": 30 }),
    )
    .await;
    let plan_id = plan["id"].as_i64().expect("No plan ID");
    let last = parse_date(&plan["last_service_date"]);

    let response = client
        .put(format!("{}/plans/{}", BASE_URL, plan_id))
        .json(&json!({ "interval_days": 12 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["interval_days"], 12);
    assert_eq!(parse_date(&updated["last_service_date"]), last);
    assert_eq!(parse_date(&updated["next_due_date"]), last + Duration::days(12));

    let stored = get_plan(&client, plan_id).await;
    assert_eq!(parse_date(&stored["next_due_date"]), last + Duration::days(12));

    for interval in [0, 3651] {
        let response = client
            .put(format!("{}/plans/{}", BASE_URL, plan_id))
            .json(&json!({ "interval_days": interval }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 400);
    }
}

#[tokio::test]
#[ignore]
async fn test_create_equipment_rejects_huge_interval() {
    let client = Client::new();

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({ "name": unique_name("Press R-5"), "interval_days": 2_000_000_000 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_register_execution_unknown_plan() {
    let client = Client::new();

    let response = client
        .post(format!("{}/lubrication/plans/{}/executions", BASE_URL, i32::MAX))
        .json(&json!({ "quantity_applied": 5.0, "technician": "Ana" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_register_execution_rejects_invalid_input() {
    let client = Client::new();

    let (_, plan) = create_equipment(&client, json!({ "name": unique_name("Fan F-3") })).await;
    let plan_id = plan["id"].as_i64().expect("No plan ID");

    for body in [
        json!({ "quantity_applied": 0.0, "technician": "Ana" }),
        json!({ "quantity_applied": -2.0, "technician": "Ana" }),
        json!({ "quantity_applied": 3.0, "technician": "  " }),
    ] {
        let response = client
            .post(format!("{}/lubrication/plans/{}/executions", BASE_URL, plan_id))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 400);
    }

    let unchanged = get_plan(&client, plan_id).await;
    assert_eq!(unchanged["next_due_date"], plan["next_due_date"]);
    assert!(history_for(&client, plan_id).await.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_concurrent_registrations_serialize() {
    let client = Client::new();

    let (_, plan) = create_equipment(
        &client,
        json!({ "name": unique_name("Crusher K-2"), "interval_days": 10 }),
    )
    .await;
    let plan_id = plan["id"].as_i64().expect("No plan ID");
    let url = format!("{}/lubrication/plans/{}/executions", BASE_URL, plan_id);

    let first = client
        .post(&url)
        .json(&json!({ "quantity_applied": 4.0, "technician": "Shift A" }))
        .send();
    let second = client
        .post(&url)
        .json(&json!({ "quantity_applied": 4.0, "technician": "Shift B" }))
        .send();
    let (first, second) = tokio::join!(first, second);

    let mut succeeded = 0;
    for response in [first, second] {
        let status = response.expect("Failed to send request").status();
        assert!(status == 201 || status == 409, "unexpected status {}", status);
        if status == 201 {
            succeeded += 1;
        }
    }
    assert!(succeeded >= 1);

    let plan = get_plan(&client, plan_id).await;
    let last = parse_date(&plan["last_service_date"]);
    let next = parse_date(&plan["next_due_date"]);
    assert_eq!(next - last, Duration::days(10));
    assert_eq!(history_for(&client, plan_id).await.len(), succeeded);
}

#[tokio::test]
#[ignore]
async fn test_upcoming_excludes_inactive_equipment() {
    let client = Client::new();

    let (equipment, plan) = create_equipment(
        &client,
        json!({ "name": unique_name("Mixer X-4"), "interval_days": 2 }),
    )
    .await;
    let plan_id = plan["id"].clone();

    let upcoming: Value = client
        .get(format!("{}/lubrication/upcoming?days=7", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let entry = upcoming
        .as_array()
        .expect("Expected array")
        .iter()
        .find(|p| p["plan_id"] == plan_id)
        .cloned()
        .expect("Plan missing from upcoming list");
    assert_eq!(entry["urgency"], "DUE_NOW");

    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let upcoming: Value = client
        .get(format!("{}/lubrication/upcoming?days=7", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(!upcoming
        .as_array()
        .expect("Expected array")
        .iter()
        .any(|p| p["plan_id"] == plan_id));
}

#[tokio::test]
#[ignore]
async fn test_upcoming_rejects_zero_horizon() {
    let client = Client::new();

    let response = client
        .get(format!("{}/lubrication/upcoming?days=0", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
