use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use staffdispatch_core::{
    errors::DispatchError,
    models::reservation::{
        AssignEmployeeRequest, CreateReservationRequest, EmployeeRegistrationRequest, Reservation,
        ReservationChange, UpdateReservationRequest,
    },
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

fn reservation_not_found(id: Uuid) -> DispatchError {
    DispatchError::NotFound(format!("Reservation with ID {} not found", id))
}

/// Runs one change against the stored reservation.
async fn modify(
    state: &ApiState,
    id: Uuid,
    change: ReservationChange,
) -> Result<Json<Reservation>, AppError> {
    let reservation = state
        .store
        .modify_reservation(id, change)
        .await?
        .ok_or_else(|| reservation_not_found(id))?;

    Ok(Json(reservation))
}

#[axum::debug_handler]
pub async fn create_reservation(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let slots = payload.plan_slots()?;
    let reservation = state.store.create_reservation(&payload, &slots).await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

#[axum::debug_handler]
pub async fn get_reservation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, AppError> {
    let reservation = state
        .store
        .get_reservation(id)
        .await?
        .ok_or_else(|| reservation_not_found(id))?;

    Ok(Json(reservation))
}

#[axum::debug_handler]
pub async fn update_reservation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReservationRequest>,
) -> Result<Json<Reservation>, AppError> {
    modify(&state, id, ReservationChange::Update(payload)).await
}

#[axum::debug_handler]
pub async fn assign_employee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignEmployeeRequest>,
) -> Result<Json<Reservation>, AppError> {
    let reservation = state
        .store
        .get_reservation(id)
        .await?
        .ok_or_else(|| reservation_not_found(id))?;

    let employee = state
        .store
        .get_employee(payload.employee_id)
        .await?
        .ok_or_else(|| {
            DispatchError::NotFound(format!("Employee with ID {} not found", payload.employee_id))
        })?;

    if employee.company_id != reservation.company_id {
        return Err(DispatchError::Validation(
            "employee does not belong to this reservation's company".to_string(),
        )
        .into());
    }

    tracing::info!(
        "Assigning employee {} to slot {} of reservation {}",
        employee.id,
        payload.slot_number,
        id
    );

    modify(
        &state,
        id,
        ReservationChange::AssignEmployee {
            slot_number: payload.slot_number,
            assignee: employee.assignee(),
        },
    )
    .await
}

#[axum::debug_handler]
pub async fn register_employee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EmployeeRegistrationRequest>,
) -> Result<Json<Reservation>, AppError> {
    let slot_number = payload
        .slot_number
        .ok_or_else(|| DispatchError::Validation("slot number is required".to_string()))?;

    tracing::info!(
        "Registering {} into slot {} of reservation {}",
        payload.employee_name,
        slot_number,
        id
    );

    modify(
        &state,
        id,
        ReservationChange::Register {
            slot_number,
            registration: payload,
        },
    )
    .await
}

#[axum::debug_handler]
pub async fn release_slot(
    State(state): State<Arc<ApiState>>,
    Path((id, slot_number)): Path<(Uuid, i64)>,
) -> Result<Json<Reservation>, AppError> {
    tracing::info!("Releasing slot {} of reservation {}", slot_number, id);
    modify(&state, id, ReservationChange::Release { slot_number }).await
}
