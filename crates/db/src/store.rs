use async_trait::async_trait;
use eyre::Result;
use staffdispatch_core::models::{
    employee::Employee,
    reservation::{CreateReservationRequest, Reservation, ReservationChange, ReservationSlots},
};
use uuid::Uuid;

use crate::DbPool;
use crate::repositories::{employee, reservation};

/// Storage seen by the HTTP layer.
#[mockall::automock]
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
        slots: &ReservationSlots,
    ) -> Result<Reservation>;

    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>>;

    /// Applies `change` atomically. `None` if the reservation does not exist.
    async fn modify_reservation(
        &self,
        id: Uuid,
        change: ReservationChange,
    ) -> Result<Option<Reservation>>;

    async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>>;
}

#[derive(Clone)]
pub struct PgReservationStore {
    pool: DbPool,
}

impl PgReservationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for PgReservationStore {
    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
        slots: &ReservationSlots,
    ) -> Result<Reservation> {
        reservation::create_reservation(&self.pool, request, slots).await
    }

    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>> {
        reservation::get_reservation_by_id(&self.pool, id).await
    }

    async fn modify_reservation(
        &self,
        id: Uuid,
        change: ReservationChange,
    ) -> Result<Option<Reservation>> {
        reservation::modify_reservation(&self.pool, id, change).await
    }

    async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>> {
        employee::get_employee_by_id(&self.pool, id).await
    }
}
