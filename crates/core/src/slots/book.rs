//! Stored slot list of a reservation and the operations that fill it.
//!
//! Every mutation goes through [`SlotBook`], so `is_filled` flags and the
//! filled count can never disagree. Persisting the book (and serializing
//! concurrent claims) is the caller's job.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SlotError;
use crate::slots::assignment::validate_slot_assignment;
use crate::slots::calculator::Slot;

/// The person occupying a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<Uuid>,
    pub employee_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_position: Option<String>,
}

/// A slot as stored on a reservation. Assignee fields sit next to the slot
/// fields in the same JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(flatten)]
    pub slot: Slot,
    #[serde(flatten)]
    pub assignee: Option<SlotAssignee>,
}

impl From<Slot> for TimeSlot {
    fn from(slot: Slot) -> Self {
        Self {
            slot,
            assignee: None,
        }
    }
}

impl TimeSlot {
    pub fn is_filled(&self) -> bool {
        self.slot.is_filled
    }

    fn fill(&mut self, assignee: SlotAssignee) {
        self.slot.is_filled = true;
        self.assignee = Some(assignee);
    }

    fn clear(&mut self) -> Option<SlotAssignee> {
        self.slot.is_filled = false;
        self.assignee.take()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotBook {
    slots: Vec<TimeSlot>,
}

impl SlotBook {
    pub fn from_slots(slots: Vec<Slot>) -> Self {
        Self {
            slots: slots.into_iter().map(TimeSlot::from).collect(),
        }
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<TimeSlot> {
        self.slots
    }

    pub fn slot_count(&self) -> i64 {
        i64::try_from(self.slots.len()).unwrap_or(i64::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn filled_count(&self) -> i64 {
        let filled = self.slots.iter().filter(|slot| slot.is_filled()).count();
        i64::try_from(filled).unwrap_or(i64::MAX)
    }

    pub fn get(&self, slot_number: i64) -> Option<&TimeSlot> {
        self.index_of(slot_number).ok().map(|index| &self.slots[index])
    }

    fn index_of(&self, slot_number: i64) -> Result<usize, SlotError> {
        if self.slots.is_empty() {
            return Err(SlotError::NoSlotsConfigured);
        }

        let slot_count = self.slot_count();
        if slot_number < 1 || slot_number > slot_count {
            return Err(SlotError::InvalidSlotNumber { slot_count });
        }

        usize::try_from(slot_number - 1).map_err(|_| SlotError::InvalidSlotNumber { slot_count })
    }

    /// Puts `assignee` on a slot, replacing whoever held it.
    pub fn assign(&mut self, slot_number: i64, assignee: SlotAssignee) -> Result<&TimeSlot, SlotError> {
        let index = self.index_of(slot_number)?;
        self.slots[index].fill(assignee);
        Ok(&self.slots[index])
    }

    /// Self-registration: the reservation must have room, the slot must be
    /// free, and the same person may hold only one slot.
    pub fn register(&mut self, slot_number: i64, assignee: SlotAssignee) -> Result<&TimeSlot, SlotError> {
        if self.slots.is_empty() {
            return Err(SlotError::NoSlotsConfigured);
        }

        let already_booked = self
            .slots
            .iter()
            .filter_map(|slot| slot.assignee.as_ref())
            .any(|existing| existing.employee_name == assignee.employee_name);
        if already_booked {
            return Err(SlotError::AlreadyRegistered(assignee.employee_name));
        }

        validate_slot_assignment(self.slot_count(), self.filled_count(), slot_number)?;

        let index = self.index_of(slot_number)?;
        if self.slots[index].is_filled() {
            return Err(SlotError::SlotAlreadyFilled(slot_number));
        }

        self.slots[index].fill(assignee);
        Ok(&self.slots[index])
    }

    /// Frees a slot, returning whoever held it.
    pub fn release(&mut self, slot_number: i64) -> Result<Option<SlotAssignee>, SlotError> {
        let index = self.index_of(slot_number)?;
        Ok(self.slots[index].clear())
    }

    /// Copies fill state from a previous layout onto slots with the same
    /// number. Slots that no longer exist lose their assignee.
    pub fn carry_assignments_from(&mut self, previous: &SlotBook) {
        for (current, old) in self.slots.iter_mut().zip(previous.slots.iter()) {
            current.slot.is_filled = old.slot.is_filled;
            current.assignee = old.assignee.clone();
        }
    }
}

impl From<Vec<TimeSlot>> for SlotBook {
    fn from(slots: Vec<TimeSlot>) -> Self {
        Self { slots }
    }
}
