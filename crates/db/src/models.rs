use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use staffdispatch_core::{
    models::{
        employee::Employee,
        reservation::{Reservation, ReservationStatus},
    },
    slots::SlotBook,
};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
    pub id: Uuid,
    pub company_id: Uuid,
    pub office_name: String,
    pub office_address: Option<String>,
    pub reservation_date: String,
    pub start_time: String,
    pub end_time: String,
    pub application_deadline: Option<String>,
    pub max_participants: i64,
    pub service_duration: Option<i64>,
    pub break_duration: i64,
    pub total_duration: Option<i64>,
    pub slot_count: i64,
    pub time_slots: Json<SlotBook>,
    pub slots_filled: i64,
    pub hourly_rate: Option<i64>,
    pub status: String,
    pub notes: Option<String>,
    pub requirements: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbReservation {
    pub fn into_reservation(self) -> Result<Reservation> {
        let status = self
            .status
            .parse::<ReservationStatus>()
            .map_err(|e: String| eyre!("Reservation {} has a bad status: {}", self.id, e))?;

        Ok(Reservation {
            id: self.id,
            company_id: self.company_id,
            office_name: self.office_name,
            office_address: self.office_address,
            reservation_date: self.reservation_date,
            start_time: self.start_time,
            end_time: self.end_time,
            application_deadline: self.application_deadline,
            max_participants: self.max_participants,
            service_duration: self.service_duration,
            break_duration: self.break_duration,
            total_duration: self.total_duration,
            slot_count: self.slot_count,
            time_slots: self.time_slots.0,
            slots_filled: self.slots_filled,
            hourly_rate: self.hourly_rate,
            status,
            notes: self.notes,
            requirements: self.requirements,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DbEmployee> for Employee {
    fn from(employee: DbEmployee) -> Self {
        Self {
            id: employee.id,
            company_id: employee.company_id,
            name: employee.name,
            department: employee.department,
            position: employee.position,
            created_at: employee.created_at,
        }
    }
}
