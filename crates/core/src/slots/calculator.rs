//! # Slot Calculator
//!
//! Partitions a service window into fixed-length appointment slots separated
//! by breaks. The number of slots that fit is the largest `n` with
//!
//! ```text
//! n * service + (n - 1) * break <= total
//! ```
//!
//! which is computed as `(total + break) / (service + break)`: the last slot
//! needs no trailing break, so one synthetic break is added to the numerator.
//!
//! The calculator never fails outward. Every problem is reported through
//! [`SlotCalculationResult::error`] with `valid == false`.

use serde::{Deserialize, Serialize, Serializer};

use crate::errors::SlotError;
use crate::slots::time::{MINUTES_PER_DAY, TimeWindow, add_minutes};

/// One appointment slot as emitted by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// 1-based ordinal, in temporal order.
    pub slot: i64,
    pub start_time: String,
    pub end_time: String,
    /// Always the service duration in minutes.
    pub duration: i64,
    #[serde(default)]
    pub is_filled: bool,
}

/// Parameters for partitioning a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpec {
    pub service_duration: i64,
    #[serde(default)]
    pub break_duration: i64,
    #[serde(default)]
    pub max_participants: Option<i64>,
}

impl SlotSpec {
    pub fn partition(&self, start_time: &str, end_time: &str) -> SlotCalculationResult {
        calculate_time_slots(
            start_time,
            end_time,
            self.service_duration,
            self.break_duration,
            self.max_participants,
        )
    }

    /// Like [`partition`](Self::partition), but refuses windows longer than a
    /// day. A window on real clock times spans at most 1439 minutes, so only
    /// out-of-range hours can get here.
    pub fn partition_within_day(&self, start_time: &str, end_time: &str) -> SlotCalculationResult {
        if let Ok(window) = TimeWindow::parse(start_time, end_time) {
            let total_minutes = window.total_minutes();
            if total_minutes > MINUTES_PER_DAY {
                return SlotCalculationResult {
                    total_minutes,
                    ..Default::default()
                }
                .fail(SlotError::WindowTooLong {
                    total: total_minutes,
                });
            }
        }

        self.partition(start_time, end_time)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotCalculationResult {
    pub valid: bool,
    #[serde(serialize_with = "serialize_error_message")]
    pub error: Option<SlotError>,
    /// Logical count, after clamping to `max_participants`.
    pub slot_count: i64,
    /// Slots the window can physically hold, ignoring any cap.
    pub physical_slot_count: i64,
    pub slots: Vec<Slot>,
    pub total_minutes: i64,
    pub used_minutes: i64,
    pub remaining_minutes: i64,
}

/// The successful part of a calculation, for callers that store slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlan {
    pub total_minutes: i64,
    pub slot_count: i64,
    pub slots: Vec<Slot>,
}

impl SlotCalculationResult {
    fn fail(mut self, error: SlotError) -> Self {
        self.valid = false;
        self.error = Some(error);
        self
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Converts the result into a plan, or the error it carries.
    pub fn into_plan(self) -> Result<SlotPlan, SlotError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(SlotPlan {
                total_minutes: self.total_minutes,
                slot_count: self.slot_count,
                slots: self.slots,
            }),
        }
    }
}

fn serialize_error_message<S>(error: &Option<SlotError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(error) => serializer.serialize_some(&error.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Computes the slot layout for a window.
///
/// Checks run in a fixed order and stop at the first failure: durations,
/// time format, window length, then the slot arithmetic. `total_minutes` is
/// filled in once the times parse and `physical_slot_count` once at least one
/// slot fits.
pub fn calculate_time_slots(
    start_time: &str,
    end_time: &str,
    service_duration: i64,
    break_duration: i64,
    max_participants: Option<i64>,
) -> SlotCalculationResult {
    let result = SlotCalculationResult::default();

    if service_duration <= 0 {
        return result.fail(SlotError::InvalidDuration(
            "service duration must be at least 1 minute".to_string(),
        ));
    }

    if break_duration < 0 {
        return result.fail(SlotError::InvalidDuration(
            "break duration must be at least 0 minutes".to_string(),
        ));
    }

    let window = match TimeWindow::parse(start_time, end_time) {
        Ok(window) => window,
        Err(error) => return result.fail(error),
    };
    let total_minutes = window.total_minutes();
    let mut result = SlotCalculationResult {
        total_minutes,
        ..result
    };

    if service_duration > total_minutes {
        return result.fail(SlotError::WindowTooShort {
            service: service_duration,
            total: total_minutes,
        });
    }

    // Unreachable while service_duration >= 1, kept as an explicit guard.
    if service_duration.checked_add(break_duration) == Some(0) {
        return result.fail(SlotError::InvalidDuration(
            "service duration plus break duration must be at least 1 minute".to_string(),
        ));
    }

    let physical_slot_count = physical_slot_count(total_minutes, service_duration, break_duration);
    if physical_slot_count < 1 {
        return result.fail(SlotError::NoSlotFits {
            total: total_minutes,
            service: service_duration,
        });
    }
    result.physical_slot_count = physical_slot_count;

    let slot_count = match max_participants {
        Some(cap) if cap > 0 => physical_slot_count.min(cap),
        _ => physical_slot_count,
    };

    let used_minutes = service_duration * slot_count + break_duration * (slot_count - 1);
    if used_minutes > total_minutes {
        result.slot_count = slot_count;
        result.used_minutes = used_minutes;
        return result.fail(SlotError::CapacityArithmeticMismatch {
            required: used_minutes,
            available: total_minutes,
            excess: used_minutes - total_minutes,
            service: service_duration,
            break_duration,
            slot_count,
        });
    }

    let slots = match build_slots(window, slot_count, service_duration, break_duration) {
        Ok(slots) => slots,
        Err(error) => return result.fail(error),
    };

    SlotCalculationResult {
        valid: true,
        error: None,
        slot_count,
        slots,
        used_minutes,
        remaining_minutes: total_minutes - used_minutes,
        ..result
    }
}

fn physical_slot_count(total_minutes: i64, service_duration: i64, break_duration: i64) -> i64 {
    // Widened so that an absurd break cannot overflow the numerator.
    let span = i128::from(total_minutes) + i128::from(break_duration);
    let cycle = i128::from(service_duration) + i128::from(break_duration);
    i64::try_from(span / cycle).unwrap_or(i64::MAX)
}

fn build_slots(
    window: TimeWindow,
    slot_count: i64,
    service_duration: i64,
    break_duration: i64,
) -> Result<Vec<Slot>, SlotError> {
    let mut slots: Vec<Slot> = Vec::new();
    usize::try_from(slot_count)
        .ok()
        .and_then(|capacity| slots.try_reserve_exact(capacity).ok())
        .ok_or(SlotError::TooManySlots { slot_count })?;
    let mut current = window.start.to_string();

    for ordinal in 1..=slot_count {
        let end = add_minutes(&current, service_duration)?;
        let next = add_minutes(&current, service_duration.saturating_add(break_duration))?;

        slots.push(Slot {
            slot: ordinal,
            start_time: current,
            end_time: end,
            duration: service_duration,
            is_filled: false,
        });

        current = next;
    }

    Ok(slots)
}
