//! # Error Handling Middleware
//!
//! Maps `DispatchError` values to HTTP status codes and a JSON body of the
//! form `{"error": message}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use staffdispatch_core::errors::{DispatchError, SlotError};

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use staffdispatch_api::middleware::error_handling::AppError;
/// use staffdispatch_core::errors::DispatchError;
///
/// async fn handler(name: Option<String>) -> Result<Json<String>, AppError> {
///     let name = name.ok_or_else(|| DispatchError::Validation("name is required".into()))?;
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub DispatchError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DispatchError::NotFound(_) => StatusCode::NOT_FOUND,
            DispatchError::Validation(_) | DispatchError::Slot(_) => StatusCode::BAD_REQUEST,
            DispatchError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        // Slot errors are shown to users as-is, without the category prefix
        let message = match &self.0 {
            DispatchError::Slot(err) => err.to_string(),
            other => other.to_string(),
        };
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        AppError(err)
    }
}

impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(DispatchError::Slot(err))
    }
}

/// Repository errors become `Database` errors, except a `SlotError` raised
/// inside a slot transaction, which is recovered so it still maps to 400.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        match err.downcast::<SlotError>() {
            Ok(slot_error) => AppError(DispatchError::Slot(slot_error)),
            Err(err) => AppError(DispatchError::Database(err)),
        }
    }
}
