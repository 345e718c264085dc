use thiserror::Error;

/// Errors produced by slot arithmetic, assignment checks and slot book mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("invalid time format: {0} (expected HH:MM)")]
    InvalidTimeFormat(String),

    #[error("{0}")]
    InvalidDuration(String),

    #[error("service duration ({service} min) exceeds the total window ({total} min)")]
    WindowTooShort { service: i64, total: i64 },

    #[error("cannot create any slot with this configuration (total: {total} min, service: {service} min)")]
    NoSlotFits { total: i64, service: i64 },

    #[error(
        "not enough time: required {required} min (service {service} min x {slot_count} slots plus {break_duration} min breaks), available {available} min, excess {excess} min"
    )]
    CapacityArithmeticMismatch {
        required: i64,
        available: i64,
        excess: i64,
        service: i64,
        break_duration: i64,
        slot_count: i64,
    },

    #[error("service window of {total} min is longer than a day")]
    WindowTooLong { total: i64 },

    #[error("cannot lay out {slot_count} slots")]
    TooManySlots { slot_count: i64 },

    #[error("this reservation is fully booked (all {slot_count} slots are filled)")]
    SlotFull { slot_count: i64 },

    #[error("invalid slot number, valid range is 1..{slot_count}")]
    InvalidSlotNumber { slot_count: i64 },

    #[error("this reservation has no time slots configured")]
    NoSlotsConfigured,

    #[error("slot {0} is already filled")]
    SlotAlreadyFilled(i64),

    #[error("{0} is already registered for this reservation")]
    AlreadyRegistered(String),
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Slot error: {0}")]
    Slot(#[from] SlotError),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
