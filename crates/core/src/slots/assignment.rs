use serde::{Deserialize, Serialize};

use crate::errors::SlotError;

/// Decides whether `requested_slot` may be assigned given the reservation's
/// slot and fill counts.
///
/// This is an advisory pre-check. The authoritative check has to be repeated
/// inside the transaction that records the assignment.
pub fn validate_slot_assignment(
    slot_count: i64,
    slots_filled: i64,
    requested_slot: i64,
) -> Result<(), SlotError> {
    if slots_filled >= slot_count {
        return Err(SlotError::SlotFull { slot_count });
    }

    if requested_slot < 1 || requested_slot > slot_count {
        return Err(SlotError::InvalidSlotNumber { slot_count });
    }

    Ok(())
}

/// Pair form of [`validate_slot_assignment`]: an empty message on admission,
/// the rejection reason otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAdmission {
    pub admitted: bool,
    pub message: String,
}

impl SlotAdmission {
    pub fn check(slot_count: i64, slots_filled: i64, requested_slot: i64) -> Self {
        validate_slot_assignment(slot_count, slots_filled, requested_slot).into()
    }
}

impl From<Result<(), SlotError>> for SlotAdmission {
    fn from(outcome: Result<(), SlotError>) -> Self {
        match outcome {
            Ok(()) => Self {
                admitted: true,
                message: String::new(),
            },
            Err(error) => Self {
                admitted: false,
                message: error.to_string(),
            },
        }
    }
}
