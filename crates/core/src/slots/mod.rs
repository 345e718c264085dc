//! Slot partitioning and slot assignment.

pub mod assignment;
pub mod book;
pub mod calculator;
pub mod time;

pub use assignment::{SlotAdmission, validate_slot_assignment};
pub use book::{SlotAssignee, SlotBook, TimeSlot};
pub use calculator::{Slot, SlotCalculationResult, SlotPlan, SlotSpec, calculate_time_slots};
pub use time::{TimeOfDay, TimeWindow, add_minutes, format_time_of_day, parse_time_of_day, total_minutes};
