//! Booking model and related types

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Booking model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub booking_id: i32,
    pub customer_id: i32,
    pub trainer_id: i32,
    pub assign_id: i32,
    /// 0 = Unpaid, 1 = Paid
    pub payment_status: i16,
    /// 0 = Pending, 1 = Confirmed, 2 = Canceled
    pub confirmation_status: i16,
    /// Date of creation, refreshed on reactivation
    pub created_at: NaiveDate,
}

/// Booking with trainer and service names resolved, for customer views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingDetails {
    pub booking_id: i32,
    pub assign_id: i32,
    pub trainer_id: i32,
    pub trainer_name: String,
    pub service_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub schedule: String,
    pub rate: i32,
    pub payment_status: i16,
    pub confirmation_status: i16,
    pub created_at: NaiveDate,
}

/// A customer's active booking joined with its assignment time window,
/// fetched for the overlap check.
#[derive(Debug, Clone, FromRow)]
pub struct BookingWindow {
    pub booking_id: i32,
    pub assign_id: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// The (booking id, assignment id) pair of a cancellation batch entry
#[derive(Debug, Clone, FromRow)]
pub struct BookingAssignment {
    pub booking_id: i32,
    pub assign_id: i32,
    pub confirmation_status: i16,
}

/// Submit booking request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitBooking {
    pub customer_id: i32,
    pub trainer_id: i32,
    pub assign_id: i32,
}

/// Batch confirm/cancel request
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingBatch {
    pub booking_ids: Vec<i32>,
}

/// Outcome of a submit: either a fresh row or a resurrected one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmitKind {
    Created,
    Reactivated,
}

/// Summary of a cancellation batch
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CancelSummary {
    /// Bookings transitioned to Canceled by this call
    pub canceled: usize,
    /// Ids that were already Canceled and were skipped
    pub skipped: Vec<i32>,
    /// Assignments whose capacity decrement could not be applied
    pub capacity_failures: Vec<i32>,
}

/// Booking counts by status, for dashboards
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookingStats {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub canceled: i64,
}

/// Per-trainer booking counts, for dashboards
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TrainerBookingStats {
    pub trainer_id: i32,
    pub trainer_name: String,
    pub active_bookings: i64,
}
