use std::sync::Arc;

use axum_test::TestServer;
use chrono::Utc;
use fake::{Fake, faker::name::en::Name};
use staffdispatch_api::{ApiState, app};
use staffdispatch_core::{
    models::{
        employee::Employee,
        reservation::{CreateReservationRequest, Reservation, ReservationSlots, ReservationStatus},
    },
    slots::{SlotAssignee, SlotBook, calculate_time_slots},
};
use staffdispatch_db::store::MockReservationStore;
use uuid::Uuid;

pub fn server(store: MockReservationStore) -> TestServer {
    let state = Arc::new(ApiState::new(store));
    TestServer::new(app(state)).expect("router should build a test server")
}

/// A 10:00-12:00 reservation with 30 minute services and 10 minute breaks,
/// capped at `max_participants` slots.
pub fn reservation(max_participants: i64) -> Reservation {
    let result = calculate_time_slots("10:00", "12:00", 30, 10, Some(max_participants));
    assert!(result.valid);

    Reservation {
        id: Uuid::new_v4(),
        company_id: Uuid::new_v4(),
        office_name: "Head Office".to_string(),
        office_address: Some("1-2-3 Marunouchi".to_string()),
        reservation_date: "2025/10/30".to_string(),
        start_time: "10:00".to_string(),
        end_time: "12:00".to_string(),
        application_deadline: None,
        max_participants,
        service_duration: Some(30),
        break_duration: 10,
        total_duration: Some(result.total_minutes),
        slot_count: result.slot_count,
        time_slots: SlotBook::from_slots(result.slots),
        slots_filled: 0,
        hourly_rate: Some(1500),
        status: ReservationStatus::Recruiting,
        notes: None,
        requirements: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// What the store would persist for a create request.
pub fn stored(request: &CreateReservationRequest, slots: &ReservationSlots) -> Reservation {
    Reservation {
        id: Uuid::new_v4(),
        company_id: request.company_id,
        office_name: request.office_name.clone(),
        office_address: request.office_address.clone(),
        reservation_date: request.reservation_date.clone(),
        start_time: request.start_time.clone(),
        end_time: request.end_time.clone(),
        application_deadline: request.application_deadline.clone(),
        max_participants: request.max_participants,
        service_duration: request.service_duration,
        break_duration: request.break_duration.unwrap_or(0),
        total_duration: slots.total_duration,
        slot_count: slots.slot_count,
        time_slots: slots.time_slots.clone(),
        slots_filled: slots.slots_filled(),
        hourly_rate: request.hourly_rate,
        status: request.status,
        notes: request.notes.clone(),
        requirements: request.requirements.clone(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// An employee of `company_id` with a random name.
pub fn employee(company_id: Uuid) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        company_id,
        name: Name().fake(),
        department: Some("Sales".to_string()),
        position: None,
        created_at: Utc::now(),
    }
}

pub fn walk_in(name: &str) -> SlotAssignee {
    SlotAssignee {
        employee_id: None,
        employee_name: name.to_string(),
        employee_department: Some("Finance".to_string()),
        employee_position: None,
    }
}
