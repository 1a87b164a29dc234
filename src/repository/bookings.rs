//! Bookings repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{
            Booking, BookingAssignment, BookingDetails, BookingStats, BookingWindow,
            TrainerBookingStats,
        },
        enums::{ConfirmationStatus, PaymentStatus},
    },
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, booking_id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", booking_id)))
    }

    /// All bookings for a (customer, assignment) pair, inside the submit
    /// transaction.
    pub async fn for_pair(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer_id: i32,
        assign_id: i32,
    ) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE customer_id = $1 AND assign_id = $2",
        )
        .bind(customer_id)
        .bind(assign_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(bookings)
    }

    /// The customer's active bookings on *other* assignments joined with
    /// their time windows, for the overlap check.
    pub async fn active_windows_elsewhere(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer_id: i32,
        assign_id: i32,
    ) -> AppResult<Vec<BookingWindow>> {
        let windows = sqlx::query_as::<_, BookingWindow>(
            r#"
            SELECT b.booking_id, b.assign_id, a.start_time, a.end_time
            FROM bookings b
            JOIN assignments a ON b.assign_id = a.assign_id
            WHERE b.customer_id = $1
              AND b.assign_id <> $2
              AND b.confirmation_status <> $3
            "#,
        )
        .bind(customer_id)
        .bind(assign_id)
        .bind(i16::from(ConfirmationStatus::Canceled))
        .fetch_all(&mut **tx)
        .await?;

        Ok(windows)
    }

    /// Insert a fresh Pending/Unpaid booking.
    ///
    /// The partial unique index on active (customer, assignment) pairs
    /// turns a concurrent duplicate into a constraint violation here;
    /// callers map that to `AlreadyBooked`.
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer_id: i32,
        trainer_id: i32,
        assign_id: i32,
        created_at: NaiveDate,
    ) -> AppResult<i32> {
        let booking_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO bookings
                (customer_id, trainer_id, assign_id, payment_status, confirmation_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING booking_id
            "#,
        )
        .bind(customer_id)
        .bind(trainer_id)
        .bind(assign_id)
        .bind(i16::from(PaymentStatus::Unpaid))
        .bind(i16::from(ConfirmationStatus::Pending))
        .bind(created_at)
        .fetch_one(&mut **tx)
        .await?;

        Ok(booking_id)
    }

    /// Resurrect a Canceled booking: back to Pending/Unpaid with a fresh
    /// creation date, reusing the row instead of inserting a second one.
    pub async fn reactivate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking_id: i32,
        created_at: NaiveDate,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET confirmation_status = $2, payment_status = $3, created_at = $4
            WHERE booking_id = $1 AND confirmation_status = $5
            "#,
        )
        .bind(booking_id)
        .bind(i16::from(ConfirmationStatus::Pending))
        .bind(i16::from(PaymentStatus::Unpaid))
        .bind(created_at)
        .bind(i16::from(ConfirmationStatus::Canceled))
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            // Lost the race: someone reactivated this row first
            return Err(AppError::AlreadyBooked(
                "An active booking already exists for this assignment".to_string(),
            ));
        }
        Ok(())
    }

    /// Fetch (booking, assignment, status) for a cancellation batch,
    /// used to tell nonexistent ids apart from already-canceled ones.
    pub async fn assignments_for(&self, booking_ids: &[i32]) -> AppResult<Vec<BookingAssignment>> {
        let rows = sqlx::query_as::<_, BookingAssignment>(
            "SELECT booking_id, assign_id, confirmation_status FROM bookings WHERE booking_id = ANY($1)",
        )
        .bind(booking_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Flip a batch of bookings to Canceled, returning exactly the rows
    /// this call flipped. Already-Canceled ids are untouched so
    /// cancellation stays idempotent, and when two cancels race on the
    /// same id only the winner sees the row in its result; capacity
    /// decrements must be driven by these rows, never by a pre-read.
    pub async fn cancel_batch(&self, booking_ids: &[i32]) -> AppResult<Vec<BookingAssignment>> {
        let rows = sqlx::query_as::<_, BookingAssignment>(
            r#"
            UPDATE bookings
            SET confirmation_status = $2
            WHERE booking_id = ANY($1) AND confirmation_status <> $2
            RETURNING booking_id, assign_id, confirmation_status
            "#,
        )
        .bind(booking_ids)
        .bind(i16::from(ConfirmationStatus::Canceled))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Flip a batch of bookings to Confirmed/Paid, skipping Canceled ones.
    /// Status-only transition: these bookings are already counted.
    pub async fn confirm_batch(&self, booking_ids: &[i32]) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET confirmation_status = $2, payment_status = $3
            WHERE booking_id = ANY($1) AND confirmation_status <> $4
            "#,
        )
        .bind(booking_ids)
        .bind(i16::from(ConfirmationStatus::Confirmed))
        .bind(i16::from(PaymentStatus::Paid))
        .bind(i16::from(ConfirmationStatus::Canceled))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// A customer's bookings with trainer and service names resolved
    pub async fn for_customer(&self, customer_id: i32) -> AppResult<Vec<BookingDetails>> {
        let bookings = sqlx::query_as::<_, BookingDetails>(
            r#"
            SELECT b.booking_id, b.assign_id, b.trainer_id, t.name AS trainer_name,
                   s.name AS service_name, a.start_time, a.end_time, a.schedule,
                   a.rate, b.payment_status, b.confirmation_status, b.created_at
            FROM bookings b
            JOIN assignments a ON b.assign_id = a.assign_id
            JOIN trainers t ON b.trainer_id = t.id
            JOIN services s ON a.service_id = s.service_id
            WHERE b.customer_id = $1
            ORDER BY b.created_at DESC, b.booking_id DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Booking counts by status
    pub async fn stats(&self) -> AppResult<BookingStats> {
        let stats = sqlx::query_as::<_, BookingStats>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE confirmation_status = 0) AS pending,
                   COUNT(*) FILTER (WHERE confirmation_status = 1) AS confirmed,
                   COUNT(*) FILTER (WHERE confirmation_status = 2) AS canceled
            FROM bookings
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Active bookings per trainer
    pub async fn stats_by_trainer(&self) -> AppResult<Vec<TrainerBookingStats>> {
        let stats = sqlx::query_as::<_, TrainerBookingStats>(
            r#"
            SELECT t.id AS trainer_id, t.name AS trainer_name,
                   COUNT(b.booking_id) FILTER (WHERE b.confirmation_status <> 2) AS active_bookings
            FROM trainers t
            LEFT JOIN bookings b ON b.trainer_id = t.id
            GROUP BY t.id, t.name
            ORDER BY active_bookings DESC, t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Bookings created on a given day
    pub async fn count_on_day(&self, day: NaiveDate) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE created_at = $1")
                .bind(day)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
