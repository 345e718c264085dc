use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::errors::SlotError;
use crate::slots::{SlotAssignee, SlotBook, SlotSpec};

/// Lifecycle of a reservation, from recruiting staff to closing the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Recruiting,
    Assigning,
    Confirmed,
    ServiceCompleted,
    Evaluated,
    Closed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recruiting => "recruiting",
            Self::Assigning => "assigning",
            Self::Confirmed => "confirmed",
            Self::ServiceCompleted => "service_completed",
            Self::Evaluated => "evaluated",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recruiting" => Ok(Self::Recruiting),
            "assigning" => Ok(Self::Assigning),
            "confirmed" => Ok(Self::Confirmed),
            "service_completed" => Ok(Self::ServiceCompleted),
            "evaluated" => Ok(Self::Evaluated),
            "closed" => Ok(Self::Closed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown reservation status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub company_id: Uuid,
    pub office_name: String,
    pub office_address: Option<String>,
    /// Calendar date of the visit, e.g. `2025/10/30`.
    pub reservation_date: String,
    pub start_time: String,
    pub end_time: String,
    pub application_deadline: Option<String>,
    pub max_participants: i64,
    pub service_duration: Option<i64>,
    pub break_duration: i64,
    pub total_duration: Option<i64>,
    pub slot_count: i64,
    pub time_slots: SlotBook,
    pub slots_filled: i64,
    pub hourly_rate: Option<i64>,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub requirements: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_max_participants() -> i64 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub company_id: Uuid,
    pub office_name: String,
    pub office_address: Option<String>,
    pub reservation_date: String,
    pub start_time: String,
    pub end_time: String,
    pub application_deadline: Option<String>,
    #[serde(default = "default_max_participants")]
    pub max_participants: i64,
    pub service_duration: Option<i64>,
    pub break_duration: Option<i64>,
    pub hourly_rate: Option<i64>,
    #[serde(default)]
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub requirements: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    pub office_name: Option<String>,
    pub office_address: Option<String>,
    pub reservation_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub application_deadline: Option<String>,
    pub max_participants: Option<i64>,
    pub service_duration: Option<i64>,
    pub break_duration: Option<i64>,
    pub hourly_rate: Option<i64>,
    pub status: Option<ReservationStatus>,
    pub notes: Option<String>,
    pub requirements: Option<String>,
}

/// Body of an employee's own registration into a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRegistrationRequest {
    pub employee_name: String,
    pub department: String,
    pub position: Option<String>,
    pub notes: Option<String>,
    pub slot_number: Option<i64>,
}

impl EmployeeRegistrationRequest {
    pub fn assignee(&self) -> SlotAssignee {
        SlotAssignee {
            employee_id: None,
            employee_name: self.employee_name.clone(),
            employee_department: Some(self.department.clone()),
            employee_position: self.position.clone(),
        }
    }

    /// Line appended to the reservation notes for this registration.
    pub fn note_line(&self) -> String {
        let mut line = format!("[registration] {} ({}", self.employee_name, self.department);
        if let Some(position) = &self.position {
            line.push_str(&format!(" - {position}"));
        }
        line.push(')');
        if let Some(notes) = &self.notes {
            line.push_str(&format!(" - {notes}"));
        }
        line
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignEmployeeRequest {
    pub employee_id: Uuid,
    pub slot_number: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateSlotsRequest {
    pub start_time: String,
    pub end_time: String,
    #[serde(flatten)]
    pub spec: SlotSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateSlotRequest {
    pub slot_count: i64,
    pub slots_filled: i64,
    pub requested_slot: i64,
}

/// Slot columns of a reservation, as computed from its window and durations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReservationSlots {
    pub total_duration: Option<i64>,
    pub slot_count: i64,
    pub time_slots: SlotBook,
}

impl ReservationSlots {
    pub fn slots_filled(&self) -> i64 {
        self.time_slots.filled_count()
    }
}

fn plan_slots(
    start_time: &str,
    end_time: &str,
    service_duration: i64,
    break_duration: i64,
    max_participants: i64,
) -> Result<ReservationSlots, SlotError> {
    let spec = SlotSpec {
        service_duration,
        break_duration,
        max_participants: Some(max_participants),
    };
    let plan = spec.partition_within_day(start_time, end_time).into_plan()?;

    Ok(ReservationSlots {
        total_duration: Some(plan.total_minutes),
        slot_count: plan.slot_count,
        time_slots: SlotBook::from_slots(plan.slots),
    })
}

impl CreateReservationRequest {
    /// Slots for a new reservation. Without a positive service duration the
    /// reservation carries no slots.
    pub fn plan_slots(&self) -> Result<ReservationSlots, SlotError> {
        match self.service_duration {
            Some(service_duration) if service_duration > 0 => plan_slots(
                &self.start_time,
                &self.end_time,
                service_duration,
                self.break_duration.unwrap_or(0),
                self.max_participants,
            ),
            _ => Ok(ReservationSlots::default()),
        }
    }
}

impl UpdateReservationRequest {
    pub fn touches_slot_layout(&self) -> bool {
        self.start_time.is_some()
            || self.end_time.is_some()
            || self.service_duration.is_some()
            || self.break_duration.is_some()
            || self.max_participants.is_some()
    }
}

impl Reservation {
    /// Recomputes the slot layout for `update`, or `None` when the update
    /// leaves the layout alone. Assignments survive on slot numbers that
    /// still exist.
    pub fn replan_slots(
        &self,
        update: &UpdateReservationRequest,
    ) -> Result<Option<ReservationSlots>, SlotError> {
        if !update.touches_slot_layout() {
            return Ok(None);
        }

        let Some(service_duration) = update
            .service_duration
            .or(self.service_duration)
            .filter(|minutes| *minutes > 0)
        else {
            return Ok(None);
        };

        let mut slots = plan_slots(
            update.start_time.as_deref().unwrap_or(&self.start_time),
            update.end_time.as_deref().unwrap_or(&self.end_time),
            service_duration,
            update.break_duration.unwrap_or(self.break_duration),
            update.max_participants.unwrap_or(self.max_participants),
        )?;
        slots.time_slots.carry_assignments_from(&self.time_slots);

        Ok(Some(slots))
    }

    /// Applies an update in place. Nothing changes if the new layout is
    /// invalid.
    pub fn apply_update(&mut self, update: UpdateReservationRequest) -> Result<(), SlotError> {
        let slots = self.replan_slots(&update)?;

        if let Some(slots) = slots {
            self.total_duration = slots.total_duration;
            self.slot_count = slots.slot_count;
            self.set_time_slots(slots.time_slots);
        }

        let UpdateReservationRequest {
            office_name,
            office_address,
            reservation_date,
            start_time,
            end_time,
            application_deadline,
            max_participants,
            service_duration,
            break_duration,
            hourly_rate,
            status,
            notes,
            requirements,
        } = update;

        if let Some(office_name) = office_name {
            self.office_name = office_name;
        }
        if let Some(reservation_date) = reservation_date {
            self.reservation_date = reservation_date;
        }
        if let Some(start_time) = start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = end_time {
            self.end_time = end_time;
        }
        if let Some(max_participants) = max_participants {
            self.max_participants = max_participants;
        }
        if let Some(break_duration) = break_duration {
            self.break_duration = break_duration;
        }
        if let Some(status) = status {
            self.status = status;
        }
        self.office_address = office_address.or(self.office_address.take());
        self.application_deadline = application_deadline.or(self.application_deadline.take());
        self.service_duration = service_duration.or(self.service_duration);
        self.hourly_rate = hourly_rate.or(self.hourly_rate);
        self.notes = notes.or(self.notes.take());
        self.requirements = requirements.or(self.requirements.take());

        Ok(())
    }

    /// Replaces the slot list and recounts `slots_filled` from it.
    pub fn set_time_slots(&mut self, time_slots: SlotBook) {
        self.slots_filled = time_slots.filled_count();
        self.time_slots = time_slots;
    }

    pub fn append_note(&mut self, line: &str) {
        self.notes = Some(match self.notes.take() {
            Some(notes) if !notes.is_empty() => format!("{notes}\n{line}"),
            _ => line.to_string(),
        });
    }
}

/// A mutation of a stored reservation, applied while its row is locked.
#[derive(Debug, Clone, PartialEq)]
pub enum ReservationChange {
    Update(UpdateReservationRequest),
    AssignEmployee {
        slot_number: i64,
        assignee: SlotAssignee,
    },
    Register {
        slot_number: i64,
        registration: EmployeeRegistrationRequest,
    },
    Release {
        slot_number: i64,
    },
}

impl ReservationChange {
    /// Applies the change. On error the reservation is left untouched.
    pub fn apply(self, reservation: &mut Reservation) -> Result<(), SlotError> {
        match self {
            Self::Update(update) => reservation.apply_update(update),
            Self::AssignEmployee {
                slot_number,
                assignee,
            } => {
                let mut book = reservation.time_slots.clone();
                book.assign(slot_number, assignee)?;
                reservation.set_time_slots(book);
                Ok(())
            }
            Self::Register {
                slot_number,
                registration,
            } => {
                let mut book = reservation.time_slots.clone();
                book.register(slot_number, registration.assignee())?;
                reservation.set_time_slots(book);
                reservation.append_note(&registration.note_line());
                Ok(())
            }
            Self::Release { slot_number } => {
                let mut book = reservation.time_slots.clone();
                book.release(slot_number)?;
                reservation.set_time_slots(book);
                Ok(())
            }
        }
    }
}
