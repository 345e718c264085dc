use crate::models::DbReservation;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres, types::Json};
use staffdispatch_core::models::reservation::{
    CreateReservationRequest, Reservation, ReservationChange, ReservationSlots,
};
use uuid::Uuid;

pub async fn create_reservation(
    pool: &Pool<Postgres>,
    request: &CreateReservationRequest,
    slots: &ReservationSlots,
) -> Result<Reservation> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating reservation: id={}, company_id={}, window={}-{}, slot_count={}",
        id,
        request.company_id,
        request.start_time,
        request.end_time,
        slots.slot_count
    );

    let row = sqlx::query_as::<_, DbReservation>(
        r#"
        INSERT INTO reservations (
            id, company_id, office_name, office_address, reservation_date,
            start_time, end_time, application_deadline, max_participants,
            service_duration, break_duration, total_duration, slot_count,
            time_slots, slots_filled, hourly_rate, status, notes, requirements,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $20)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(request.company_id)
    .bind(&request.office_name)
    .bind(&request.office_address)
    .bind(&request.reservation_date)
    .bind(&request.start_time)
    .bind(&request.end_time)
    .bind(&request.application_deadline)
    .bind(request.max_participants)
    .bind(request.service_duration)
    .bind(request.break_duration.unwrap_or(0))
    .bind(slots.total_duration)
    .bind(slots.slot_count)
    .bind(Json(&slots.time_slots))
    .bind(slots.slots_filled())
    .bind(request.hourly_rate)
    .bind(request.status.as_str())
    .bind(&request.notes)
    .bind(&request.requirements)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::info!("Reservation created: id={}", id);
    row.into_reservation()
}

pub async fn get_reservation_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Reservation>> {
    tracing::debug!("Getting reservation by id: {}", id);

    let row = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT *
        FROM reservations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(row.into_reservation()?)),
        None => {
            tracing::debug!("Reservation not found: id={}", id);
            Ok(None)
        }
    }
}

/// Applies `change` to the stored reservation under a row lock and writes
/// the result back. Returns `None` if the reservation does not exist.
///
/// A change that fails validation rolls the transaction back; the error
/// carries the `SlotError` for the caller to downcast.
pub async fn modify_reservation(
    pool: &Pool<Postgres>,
    id: Uuid,
    change: ReservationChange,
) -> Result<Option<Reservation>> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT *
        FROM reservations
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        tracing::debug!("Reservation not found: id={}", id);
        return Ok(None);
    };

    let mut reservation = row.into_reservation()?;
    tracing::debug!("Applying change to reservation {}: {:?}", id, change);
    change.apply(&mut reservation)?;

    let row = sqlx::query_as::<_, DbReservation>(
        r#"
        UPDATE reservations
        SET office_name = $2,
            office_address = $3,
            reservation_date = $4,
            start_time = $5,
            end_time = $6,
            application_deadline = $7,
            max_participants = $8,
            service_duration = $9,
            break_duration = $10,
            total_duration = $11,
            slot_count = $12,
            time_slots = $13,
            slots_filled = $14,
            hourly_rate = $15,
            status = $16,
            notes = $17,
            requirements = $18,
            updated_at = $19
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&reservation.office_name)
    .bind(&reservation.office_address)
    .bind(&reservation.reservation_date)
    .bind(&reservation.start_time)
    .bind(&reservation.end_time)
    .bind(&reservation.application_deadline)
    .bind(reservation.max_participants)
    .bind(reservation.service_duration)
    .bind(reservation.break_duration)
    .bind(reservation.total_duration)
    .bind(reservation.slot_count)
    .bind(Json(&reservation.time_slots))
    .bind(reservation.slots_filled)
    .bind(reservation.hourly_rate)
    .bind(reservation.status.as_str())
    .bind(&reservation.notes)
    .bind(&reservation.requirements)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        "Reservation updated: id={}, slots_filled={}/{}",
        id,
        row.slots_filled,
        row.slot_count
    );
    Ok(Some(row.into_reservation()?))
}
