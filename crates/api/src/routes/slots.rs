use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots/calculate", post(handlers::slots::calculate_slots))
        .route("/api/slots/validate", post(handlers::slots::validate_slot))
}
