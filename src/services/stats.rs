//! Reporting service: read-only aggregations over bookings

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::booking::{BookingStats, TrainerBookingStats},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Booking counts by status
    pub async fn booking_stats(&self) -> AppResult<BookingStats> {
        self.repository.bookings.stats().await
    }

    /// Active bookings per trainer
    pub async fn trainer_stats(&self) -> AppResult<Vec<TrainerBookingStats>> {
        self.repository.bookings.stats_by_trainer().await
    }

    /// Bookings created on a given day
    pub async fn bookings_on(&self, day: NaiveDate) -> AppResult<i64> {
        self.repository.bookings.count_on_day(day).await
    }
}
