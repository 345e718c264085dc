use axum::Json;
use staffdispatch_core::{
    models::reservation::{CalculateSlotsRequest, ValidateSlotRequest},
    slots::{SlotAdmission, SlotCalculationResult},
};

/// Previews a partition. Always answers 200; failures travel in the body.
/// Windows longer than a day are refused before any slot is laid out.
#[axum::debug_handler]
pub async fn calculate_slots(
    Json(payload): Json<CalculateSlotsRequest>,
) -> Json<SlotCalculationResult> {
    let result = payload
        .spec
        .partition_within_day(&payload.start_time, &payload.end_time);

    tracing::debug!(
        "Calculated slots for {}-{}: valid={}, slot_count={}",
        payload.start_time,
        payload.end_time,
        result.valid,
        result.slot_count
    );

    Json(result)
}

#[axum::debug_handler]
pub async fn validate_slot(Json(payload): Json<ValidateSlotRequest>) -> Json<SlotAdmission> {
    Json(SlotAdmission::check(
        payload.slot_count,
        payload.slots_filled,
        payload.requested_slot,
    ))
}
