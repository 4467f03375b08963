//! # Error Handling Middleware
//!
//! Maps booking-engine errors to HTTP status codes and JSON error bodies of the
//! form `{"error": "<message>"}`. Extractor rejections from
//! [`crate::middleware::extract`] arrive as `Validation`.
//!
//! | Error | Status |
//! |---|---|
//! | `InvalidSchedule`, `OutsideWorkingHours`, `Validation` | 400 |
//! | `Authentication` | 401 |
//! | `Authorization` | 403 |
//! | `NotFound` | 404 |
//! | `SlotConflict` | 409 |
//! | `Database`, `Internal` | 500 |

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinic_core::errors::ClinicError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use clinic_api::middleware::error_handling::AppError;
/// use clinic_core::errors::ClinicError;
///
/// async fn handler(name: String) -> Result<Json<String>, AppError> {
///     if name.is_empty() {
///         return Err(AppError(ClinicError::Validation("name is required".to_string())));
///     }
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ClinicError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ClinicError::InvalidSchedule(_) => StatusCode::BAD_REQUEST,
            ClinicError::OutsideWorkingHours(_) => StatusCode::BAD_REQUEST,
            ClinicError::Validation(_) => StatusCode::BAD_REQUEST,
            ClinicError::SlotConflict { .. } => StatusCode::CONFLICT,
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            ClinicError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ClinicError::Authorization(_) => StatusCode::FORBIDDEN,
            ClinicError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ClinicError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side failures are logged in full but not echoed to the client
        let message = if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ClinicError> for AppError {
    fn from(err: ClinicError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ClinicError::Database(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(ClinicError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(ClinicError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(ClinicError::Validation(rejection.body_text()))
    }
}

/// Maps a ClinicError to an HTTP response
pub fn map_error(err: ClinicError) -> Response {
    AppError(err).into_response()
}
