//! Error types for Gymdesk server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    // The message names the missing entity; one code covers all lookups
    NoSuchEntity = 4,
    AlreadyBooked = 7,
    ScheduleConflict = 8,
    CapacityExceeded = 9,
    CapacityUnderflow = 10,
    PartialFailure = 11,
    Duplicate = 12,
    BadValue = 13,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Already booked: {0}")]
    AlreadyBooked(String),

    #[error("Schedule conflict: {0}")]
    ScheduleConflict(String),

    #[error("Capacity exceeded for assignment {assign_id}")]
    CapacityExceeded { assign_id: i32 },

    #[error("Capacity underflow for assignment {assign_id}")]
    CapacityUnderflow { assign_id: i32 },

    #[error("Partial failure: {0}")]
    PartialFailure(String),

    #[error("Conflict: {0}")]
    Duplicate(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchEntity, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::AlreadyBooked(msg) => {
                (StatusCode::CONFLICT, ErrorCode::AlreadyBooked, msg.clone())
            }
            AppError::ScheduleConflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::ScheduleConflict, msg.clone())
            }
            AppError::CapacityExceeded { assign_id } => (
                StatusCode::CONFLICT,
                ErrorCode::CapacityExceeded,
                format!("Assignment {} is fully booked", assign_id),
            ),
            AppError::CapacityUnderflow { assign_id } => {
                // Counter drifted below the active-booking count
                tracing::error!(assign_id, "capacity decrement attempted at zero");
                (
                    StatusCode::CONFLICT,
                    ErrorCode::CapacityUnderflow,
                    format!("Capacity counter for assignment {} is already zero", assign_id),
                )
            }
            AppError::PartialFailure(msg) => {
                // The primary status change committed; only the paired
                // capacity adjustment failed. Not an HTTP failure, but
                // success:false flags the counter drift to the caller.
                tracing::error!("Partial failure: {}", msg);
                (StatusCode::OK, ErrorCode::PartialFailure, msg.clone())
            }
            AppError::Duplicate(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// True when a sqlx error is a Postgres unique-constraint violation (23505).
///
/// The partial unique index on active bookings makes this the authoritative
/// duplicate-booking signal under concurrent submits.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ErrorCode::Success as u32, 0);
        assert_eq!(ErrorCode::NoSuchEntity as u32, 4);
        assert_eq!(ErrorCode::AlreadyBooked as u32, 7);
        assert_eq!(ErrorCode::ScheduleConflict as u32, 8);
        assert_eq!(ErrorCode::CapacityExceeded as u32, 9);
        assert_eq!(ErrorCode::PartialFailure as u32, 11);
    }

    #[test]
    fn every_missing_entity_maps_to_not_found() {
        for err in [
            AppError::NotFound("Booking with id 7 not found".to_string()),
            AppError::NotFound("Customer with id 7 not found".to_string()),
            AppError::NotFound("Assignment with id 7 not found".to_string()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn partial_failure_is_not_an_http_failure() {
        let err = AppError::PartialFailure(
            "Booking canceled but capacity update failed for assignment 3".to_string(),
        );
        assert_eq!(err.into_response().status(), StatusCode::OK);
    }

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
