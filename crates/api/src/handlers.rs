pub mod reservation;
pub mod slots;
