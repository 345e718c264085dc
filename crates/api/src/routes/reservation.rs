use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::reservation};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/reservations", post(reservation::create_reservation))
        .route(
            "/api/reservations/:id",
            get(reservation::get_reservation).put(reservation::update_reservation),
        )
        .route(
            "/api/reservations/:id/assign-employee",
            post(reservation::assign_employee),
        )
        .route(
            "/api/reservations/:id/register",
            post(reservation::register_employee),
        )
        .route(
            "/api/reservations/:id/slots/:slot_number/employee",
            delete(reservation::release_slot),
        )
}
