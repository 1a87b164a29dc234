//! Booking lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingBatch, BookingDetails, SubmitBooking, SubmitKind},
};

use super::AuthenticatedUser;

/// Submit booking response
#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub success: bool,
    pub booking_id: i32,
    pub kind: SubmitKind,
    pub message: String,
}

/// Batch operation response
#[derive(Serialize, ToSchema)]
pub struct BatchResponse {
    pub success: bool,
    pub message: String,
    /// Assignments whose capacity counter could not be adjusted
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capacity_failures: Vec<i32>,
}

/// Submit a booking for a trainer assignment
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = SubmitBooking,
    responses(
        (status = 201, description = "Booking created or reactivated", body = BookingResponse),
        (status = 404, description = "Assignment or customer not found"),
        (status = 409, description = "Already booked, schedule conflict, or slot full")
    )
)]
pub async fn submit_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<SubmitBooking>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    claims.require_customer_access(request.customer_id)?;

    let outcome = state
        .services
        .bookings
        .submit_booking(request.customer_id, request.trainer_id, request.assign_id)
        .await?;

    let message = match outcome.kind {
        SubmitKind::Created => "Booking submitted, awaiting confirmation".to_string(),
        SubmitKind::Reactivated => "Previous booking reactivated, awaiting confirmation".to_string(),
    };

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            booking_id: outcome.booking_id,
            kind: outcome.kind,
            message,
        }),
    ))
}

/// Confirm a batch of bookings (staff only)
#[utoipa::path(
    put,
    path = "/bookings/confirm",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = BookingBatch,
    responses(
        (status = 200, description = "Bookings confirmed", body = BatchResponse)
    )
)]
pub async fn confirm_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BookingBatch>,
) -> AppResult<Json<BatchResponse>> {
    claims.require_staff()?;

    let confirmed = state
        .services
        .bookings
        .confirm_bookings(&request.booking_ids)
        .await?;

    Ok(Json(BatchResponse {
        success: true,
        message: format!("{} booking(s) confirmed", confirmed),
        capacity_failures: Vec::new(),
    }))
}

/// Cancel a batch of bookings (staff only)
#[utoipa::path(
    put,
    path = "/bookings/cancel",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = BookingBatch,
    responses(
        (status = 200, description = "Bookings canceled; capacity mismatches reported", body = BatchResponse),
        (status = 404, description = "No matching bookings")
    )
)]
pub async fn cancel_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BookingBatch>,
) -> AppResult<Json<BatchResponse>> {
    claims.require_staff()?;

    let summary = state
        .services
        .bookings
        .cancel_bookings(&request.booking_ids)
        .await?;

    let message = if summary.capacity_failures.is_empty() {
        format!(
            "{} booking(s) canceled, {} already canceled",
            summary.canceled,
            summary.skipped.len()
        )
    } else {
        format!(
            "{} booking(s) canceled but capacity update failed for assignment(s) {:?}",
            summary.canceled, summary.capacity_failures
        )
    };

    Ok(Json(BatchResponse {
        success: true,
        message,
        capacity_failures: summary.capacity_failures,
    }))
}

/// Cancel one of the caller's own bookings
#[utoipa::path(
    put,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking canceled", body = BatchResponse),
        (status = 403, description = "Not the booking owner"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_own_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<BatchResponse>> {
    let owner_id = state.services.bookings.booking_owner(booking_id).await?;
    claims.require_customer_access(owner_id)?;

    let summary = state.services.bookings.cancel_bookings(&[booking_id]).await?;

    if let Some(assign_id) = summary.capacity_failures.first() {
        return Err(AppError::PartialFailure(format!(
            "Booking {} canceled but capacity update failed for assignment {}",
            booking_id, assign_id
        )));
    }

    Ok(Json(BatchResponse {
        success: true,
        message: if summary.canceled > 0 {
            "Booking canceled".to_string()
        } else {
            "Booking was already canceled".to_string()
        },
        capacity_failures: Vec::new(),
    }))
}

/// List a customer's bookings with trainer names resolved
#[utoipa::path(
    get,
    path = "/customers/{id}/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer's bookings", body = Vec<BookingDetails>),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn customer_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(customer_id): Path<i32>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    claims.require_customer_access(customer_id)?;

    let bookings = state.services.bookings.customer_bookings(customer_id).await?;
    Ok(Json(bookings))
}
