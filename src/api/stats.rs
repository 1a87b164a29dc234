//! Reporting endpoints for management dashboards

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingStats, TrainerBookingStats},
};

use super::AuthenticatedUser;

/// Booking statistics response
#[derive(Serialize, ToSchema)]
pub struct BookingStatsResponse {
    pub bookings: BookingStats,
    pub by_trainer: Vec<TrainerBookingStats>,
    /// Bookings created on the requested day, if one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_day: Option<i64>,
}

/// Query parameters for booking statistics
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct BookingStatsQuery {
    /// Count bookings created on this day (YYYY-MM-DD)
    pub day: Option<String>,
}

/// Booking statistics (staff only)
#[utoipa::path(
    get,
    path = "/stats/bookings",
    tag = "stats",
    security(("bearer_auth" = [])),
    params(BookingStatsQuery),
    responses(
        (status = 200, description = "Booking statistics", body = BookingStatsResponse)
    )
)]
pub async fn booking_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BookingStatsQuery>,
) -> AppResult<Json<BookingStatsResponse>> {
    claims.require_staff()?;

    let bookings = state.services.stats.booking_stats().await?;
    let by_trainer = state.services.stats.trainer_stats().await?;

    let on_day = match query.day {
        Some(ref day) => {
            let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map_err(|_| AppError::Validation(format!("Invalid date: {}", day)))?;
            Some(state.services.stats.bookings_on(date).await?)
        }
        None => None,
    };

    Ok(Json(BookingStatsResponse {
        bookings,
        by_trainer,
        on_day,
    }))
}
