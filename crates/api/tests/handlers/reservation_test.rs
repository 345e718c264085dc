use axum::http::StatusCode;
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use staffdispatch_core::models::reservation::{
    Reservation, ReservationChange, UpdateReservationRequest,
};
use staffdispatch_db::store::MockReservationStore;
use uuid::Uuid;

use crate::test_utils::{employee, reservation, server, stored, walk_in};

/// Makes `modify_reservation` apply the change to `fixture`, as the
/// Postgres store does inside its transaction.
fn apply_to(store: &mut MockReservationStore, fixture: Reservation) {
    let id = fixture.id;
    store
        .expect_modify_reservation()
        .with(predicate::eq(id), predicate::always())
        .returning(move |_, change| {
            let mut reservation = fixture.clone();
            change.apply(&mut reservation)?;
            Ok(Some(reservation))
        });
}

#[tokio::test]
async fn test_create_reservation_plans_slots() {
    let mut store = MockReservationStore::new();
    store
        .expect_create_reservation()
        .withf(|_, slots| slots.slot_count == 2 && slots.total_duration == Some(120))
        .times(1)
        .returning(|request, slots| Ok(stored(request, slots)));
    let server = server(store);

    let response = server
        .post("/api/reservations")
        .json(&json!({
            "company_id": Uuid::new_v4(),
            "office_name": "Head Office",
            "reservation_date": "2025/10/30",
            "start_time": "10:00",
            "end_time": "12:00",
            "max_participants": 2,
            "service_duration": 30,
            "break_duration": 10,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["slot_count"], 2);
    assert_eq!(body["slots_filled"], 0);
    assert_eq!(body["status"], "recruiting");
    assert_eq!(body["time_slots"][1]["start_time"], "10:40");
}

#[tokio::test]
async fn test_create_reservation_rejects_impossible_layout() {
    // No expectations: the store must not be reached
    let server = server(MockReservationStore::new());

    let response = server
        .post("/api/reservations")
        .json(&json!({
            "company_id": Uuid::new_v4(),
            "office_name": "Head Office",
            "reservation_date": "2025/10/30",
            "start_time": "10:00",
            "end_time": "10:05",
            "service_duration": 30,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "service duration (30 min) exceeds the total window (5 min)" })
    );
}

#[tokio::test]
async fn test_create_reservation_rejects_window_longer_than_a_day() {
    let server = server(MockReservationStore::new());

    let response = server
        .post("/api/reservations")
        .json(&json!({
            "company_id": Uuid::new_v4(),
            "office_name": "Head Office",
            "reservation_date": "2025/10/30",
            "start_time": "00:00",
            "end_time": "99999999999:00",
            "service_duration": 1,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "service window of 5999999999940 min is longer than a day"
    );
}

#[tokio::test]
async fn test_get_reservation() {
    let fixture = reservation(3);
    let id = fixture.id;
    let mut store = MockReservationStore::new();
    store
        .expect_get_reservation()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(fixture.clone())));
    let server = server(store);

    let response = server.get(&format!("/api/reservations/{id}")).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["id"], json!(id));
}

#[tokio::test]
async fn test_get_missing_reservation() {
    let id = Uuid::new_v4();
    let mut store = MockReservationStore::new();
    store.expect_get_reservation().returning(|_| Ok(None));
    let server = server(store);

    let response = server.get(&format!("/api/reservations/{id}")).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"],
        format!("Resource not found: Reservation with ID {id} not found")
    );
}

#[tokio::test]
async fn test_database_failure_is_internal_error() {
    let mut store = MockReservationStore::new();
    store
        .expect_get_reservation()
        .returning(|_| Err(eyre::eyre!("connection refused")));
    let server = server(store);

    let response = server
        .get(&format!("/api/reservations/{}", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_update_sends_change_and_recalculates() {
    let fixture = reservation(10);
    let id = fixture.id;
    let mut store = MockReservationStore::new();
    store
        .expect_modify_reservation()
        .with(
            predicate::eq(id),
            predicate::eq(ReservationChange::Update(UpdateReservationRequest {
                end_time: Some("14:00".to_string()),
                ..Default::default()
            })),
        )
        .returning(move |_, change| {
            let mut reservation = fixture.clone();
            change.apply(&mut reservation)?;
            Ok(Some(reservation))
        });
    let server = server(store);

    let response = server
        .put(&format!("/api/reservations/{id}"))
        .json(&json!({ "end_time": "14:00" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["end_time"], "14:00");
    assert_eq!(body["total_duration"], 240);
    assert_eq!(body["slot_count"], 6);
}

#[tokio::test]
async fn test_update_with_bad_layout_is_rejected() {
    let fixture = reservation(3);
    let id = fixture.id;
    let mut store = MockReservationStore::new();
    apply_to(&mut store, fixture);
    let server = server(store);

    let response = server
        .put(&format!("/api/reservations/{id}"))
        .json(&json!({ "service_duration": 500 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "service duration (500 min) exceeds the total window (120 min)"
    );
}

#[tokio::test]
async fn test_assign_employee() {
    let fixture = reservation(3);
    let id = fixture.id;
    let staff = employee(fixture.company_id);
    let staff_id = staff.id;
    let staff_name = staff.name.clone();

    let mut store = MockReservationStore::new();
    let stored_reservation = fixture.clone();
    store
        .expect_get_reservation()
        .returning(move |_| Ok(Some(stored_reservation.clone())));
    store
        .expect_get_employee()
        .with(predicate::eq(staff_id))
        .returning(move |_| Ok(Some(staff.clone())));
    apply_to(&mut store, fixture);
    let server = server(store);

    let response = server
        .post(&format!("/api/reservations/{id}/assign-employee"))
        .json(&json!({ "employee_id": staff_id, "slot_number": 2 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["slots_filled"], 1);
    let slot = &body["time_slots"][1];
    assert_eq!(slot["is_filled"], true);
    assert_eq!(slot["employee_id"], json!(staff_id));
    assert_eq!(slot["employee_name"], json!(staff_name));
    assert_eq!(slot["employee_department"], "Sales");
}

#[tokio::test]
async fn test_assign_employee_from_other_company() {
    let fixture = reservation(3);
    let id = fixture.id;
    let outsider = employee(Uuid::new_v4());
    let outsider_id = outsider.id;

    let mut store = MockReservationStore::new();
    store
        .expect_get_reservation()
        .returning(move |_| Ok(Some(fixture.clone())));
    store
        .expect_get_employee()
        .returning(move |_| Ok(Some(outsider.clone())));
    let server = server(store);

    let response = server
        .post(&format!("/api/reservations/{id}/assign-employee"))
        .json(&json!({ "employee_id": outsider_id, "slot_number": 1 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assign_unknown_employee() {
    let fixture = reservation(3);
    let id = fixture.id;
    let mut store = MockReservationStore::new();
    store
        .expect_get_reservation()
        .returning(move |_| Ok(Some(fixture.clone())));
    store.expect_get_employee().returning(|_| Ok(None));
    let server = server(store);

    let response = server
        .post(&format!("/api/reservations/{id}/assign-employee"))
        .json(&json!({ "employee_id": Uuid::new_v4(), "slot_number": 1 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assign_out_of_range_slot() {
    let fixture = reservation(3);
    let id = fixture.id;
    let staff = employee(fixture.company_id);
    let staff_id = staff.id;

    let mut store = MockReservationStore::new();
    let stored_reservation = fixture.clone();
    store
        .expect_get_reservation()
        .returning(move |_| Ok(Some(stored_reservation.clone())));
    store
        .expect_get_employee()
        .returning(move |_| Ok(Some(staff.clone())));
    apply_to(&mut store, fixture);
    let server = server(store);

    let response = server
        .post(&format!("/api/reservations/{id}/assign-employee"))
        .json(&json!({ "employee_id": staff_id, "slot_number": 4 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "invalid slot number, valid range is 1..3"
    );
}

#[tokio::test]
async fn test_register_employee() {
    let fixture = reservation(3);
    let id = fixture.id;
    let mut store = MockReservationStore::new();
    apply_to(&mut store, fixture);
    let server = server(store);

    let response = server
        .post(&format!("/api/reservations/{id}/register"))
        .json(&json!({
            "employee_name": "Chika Mori",
            "department": "Design",
            "position": "Lead",
            "slot_number": 3,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["slots_filled"], 1);
    assert_eq!(body["time_slots"][2]["employee_name"], "Chika Mori");
    assert_eq!(body["time_slots"][2]["employee_position"], "Lead");
    assert_eq!(body["notes"], "[registration] Chika Mori (Design - Lead)");
}

#[tokio::test]
async fn test_register_requires_slot_number() {
    let server = server(MockReservationStore::new());

    let response = server
        .post(&format!("/api/reservations/{}/register", Uuid::new_v4()))
        .json(&json!({ "employee_name": "Chika Mori", "department": "Design" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: slot number is required"
    );
}

#[tokio::test]
async fn test_register_into_full_reservation() {
    let mut fixture = reservation(1);
    let mut book = fixture.time_slots.clone();
    book.register(1, walk_in("Daichi Ono")).unwrap();
    fixture.set_time_slots(book);
    let id = fixture.id;

    let mut store = MockReservationStore::new();
    apply_to(&mut store, fixture);
    let server = server(store);

    let response = server
        .post(&format!("/api/reservations/{id}/register"))
        .json(&json!({
            "employee_name": "Chika Mori",
            "department": "Design",
            "slot_number": 1,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "this reservation is fully booked (all 1 slots are filled)"
    );
}

#[tokio::test]
async fn test_release_slot() {
    let mut fixture = reservation(3);
    let mut book = fixture.time_slots.clone();
    book.register(2, walk_in("Daichi Ono")).unwrap();
    fixture.set_time_slots(book);
    let id = fixture.id;

    let mut store = MockReservationStore::new();
    store
        .expect_modify_reservation()
        .with(
            predicate::eq(id),
            predicate::eq(ReservationChange::Release { slot_number: 2 }),
        )
        .returning(move |_, change| {
            let mut reservation = fixture.clone();
            change.apply(&mut reservation)?;
            Ok(Some(reservation))
        });
    let server = server(store);

    let response = server
        .delete(&format!("/api/reservations/{id}/slots/2/employee"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["slots_filled"], 0);
    assert_eq!(
        body["time_slots"][1],
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
async fn test_release_on_missing_reservation() {
    let mut store = MockReservationStore::new();
    store.expect_modify_reservation().returning(|_, _| Ok(None));
    let server = server(store);

    let response = server
        .delete(&format!("/api/reservations/{}/slots/1/employee", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
