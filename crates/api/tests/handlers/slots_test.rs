use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use staffdispatch_db::store::MockReservationStore;

use crate::test_utils::server;

#[test_log::test(tokio::test)]
async fn test_health_and_version() {
    let server = server(MockReservationStore::new());

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.json::<Value>(), json!({ "status": "ok" }));

    let version = server.get("/version").await;
    assert_eq!(version.json::<Value>()["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_calculate_slots() {
    let server = server(MockReservationStore::new());

    let response = server
        .post("/api/slots/calculate")
        .json(&json!({
            "start_time": "10:00",
            "end_time": "12:00",
            "service_duration": 30,
            "break_duration": 10,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["valid"], true);
    assert_eq!(body["total_minutes"], 120);
    assert_eq!(body["slot_count"], 3);
    assert_eq!(body["used_minutes"], 110);
    assert_eq!(body["remaining_minutes"], 10);
    assert_eq!(body["error"], Value::Null);
    assert_eq!(
        body["slots"][1],
        json!({
            "slot": 2,
            "start_time": "10:40",
            "end_time": "11:10",
            "duration": 30,
            "is_filled": false,
        })
    );
}

#[tokio::test]
async fn test_calculate_with_participant_cap() {
    let server = server(MockReservationStore::new());

    let body = server
        .post("/api/slots/calculate")
        .json(&json!({
            "start_time": "10:00",
            "end_time": "14:00",
            "service_duration": 30,
            "break_duration": 10,
            "max_participants": 2,
        }))
        .await
        .json::<Value>();

    assert_eq!(body["physical_slot_count"], 6);
    assert_eq!(body["slot_count"], 2);
    assert_eq!(body["slots"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_calculate_failure_is_still_ok() {
    let server = server(MockReservationStore::new());

    let response = server
        .post("/api/slots/calculate")
        .json(&json!({
            "start_time": "10:00",
            "end_time": "10:05",
            "service_duration": 30,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["valid"], false);
    assert_eq!(
        body["error"],
        "service duration (30 min) exceeds the total window (5 min)"
    );
    assert_eq!(body["slots"], json!([]));
}

#[tokio::test]
async fn test_calculate_refuses_window_longer_than_a_day() {
    let server = server(MockReservationStore::new());

    let response = server
        .post("/api/slots/calculate")
        .json(&json!({
            "start_time": "00:00",
            "end_time": "99999999999:00",
            "service_duration": 1,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["valid"], false);
    assert_eq!(
        body["error"],
        "service window of 5999999999940 min is longer than a day"
    );
    assert_eq!(body["slots"], json!([]));
}

#[rstest]
#[case(3, 3, 1, false, "this reservation is fully booked (all 3 slots are filled)")]
#[case(3, 2, 4, false, "invalid slot number, valid range is 1..3")]
#[case(3, 2, 3, true, "")]
#[tokio::test]
async fn test_validate_slot(
    #[case] slot_count: i64,
    #[case] slots_filled: i64,
    #[case] requested_slot: i64,
    #[case] admitted: bool,
    #[case] message: &str,
) {
    let server = server(MockReservationStore::new());

    let response = server
        .post("/api/slots/validate")
        .json(&json!({
            "slot_count": slot_count,
            "slots_filled": slots_filled,
            "requested_slot": requested_slot,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "admitted": admitted, "message": message })
    );
}
