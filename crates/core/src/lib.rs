//! Domain core of the staff dispatch service: slot partitioning, slot
//! assignment rules and the reservation models built on them.
//!
//! Nothing in this crate performs I/O.

pub mod errors;
pub mod models;
pub mod slots;
