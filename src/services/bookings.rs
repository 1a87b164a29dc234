//! Booking lifecycle service: conflict detection, submit/confirm/cancel,
//! and the pairing of every status change with its capacity adjustment.

use chrono::{NaiveTime, Utc};

use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::{
        assignment::Assignment,
        booking::{BookingDetails, CancelSummary, SubmitKind},
        enums::{AccountKind, ConfirmationStatus},
    },
    repository::Repository,
};

/// Conflict checker verdict for a submit that may proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConflictCheck {
    /// No booking exists for this pair; insert a new row
    Fresh,
    /// A Canceled row exists for this pair; resurrect it
    Reactivate(i32),
}

/// Result of a successful submit
#[derive(Debug, Clone, Copy)]
pub struct BookingOutcome {
    pub booking_id: i32,
    pub kind: SubmitKind,
}

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create or reactivate a booking for a trainer assignment.
    ///
    /// The duplicate check, overlap check, booking write, and capacity
    /// increment all run in one transaction with the assignment row
    /// locked, so concurrent submits for the same slot serialize and
    /// either both effects commit or neither does. A full slot rolls the
    /// booking write back and surfaces `CapacityExceeded`.
    pub async fn submit_booking(
        &self,
        customer_id: i32,
        trainer_id: i32,
        assign_id: i32,
    ) -> AppResult<BookingOutcome> {
        // Verify customer exists before opening the transaction
        self.repository
            .accounts
            .get_by_id(AccountKind::Customer, customer_id)
            .await?;

        let mut tx = self.repository.pool.begin().await?;

        let assignment = self
            .repository
            .assignments
            .get_for_update(&mut tx, assign_id)
            .await?;

        if assignment.trainer_id != trainer_id {
            return Err(AppError::BadRequest(format!(
                "Assignment {} is not run by trainer {}",
                assign_id, trainer_id
            )));
        }

        let check = self.check_conflict(&mut tx, customer_id, &assignment).await?;

        let today = Utc::now().date_naive();
        let outcome = match check {
            ConflictCheck::Fresh => {
                let booking_id = match self
                    .repository
                    .bookings
                    .insert(&mut tx, customer_id, trainer_id, assign_id, today)
                    .await
                {
                    Ok(id) => id,
                    // A concurrent submit won the race; the partial unique
                    // index is the authoritative duplicate signal.
                    Err(AppError::Database(e)) if is_unique_violation(&e) => {
                        return Err(AppError::AlreadyBooked(
                            "An active booking already exists for this assignment".to_string(),
                        ));
                    }
                    Err(e) => return Err(e),
                };
                BookingOutcome {
                    booking_id,
                    kind: SubmitKind::Created,
                }
            }
            ConflictCheck::Reactivate(booking_id) => {
                self.repository
                    .bookings
                    .reactivate(&mut tx, booking_id, today)
                    .await?;
                BookingOutcome {
                    booking_id,
                    kind: SubmitKind::Reactivated,
                }
            }
        };

        // Failing here drops the transaction and rolls the booking back
        self.repository
            .assignments
            .increment_capacity(&mut tx, assign_id)
            .await?;

        tx.commit().await?;

        Ok(outcome)
    }

    /// Conflict checker, run inside the submit transaction.
    ///
    /// Rejects a duplicate active booking for the same assignment, then
    /// rejects any time-of-day overlap with the customer's other active
    /// bookings. The overlap test deliberately ignores which weekdays the
    /// schedules occupy, matching the established booking policy.
    async fn check_conflict(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        customer_id: i32,
        candidate: &Assignment,
    ) -> AppResult<ConflictCheck> {
        let existing = self
            .repository
            .bookings
            .for_pair(tx, customer_id, candidate.assign_id)
            .await?;

        let mut reactivate = None;
        for booking in &existing {
            if ConfirmationStatus::from(booking.confirmation_status).is_active() {
                return Err(AppError::AlreadyBooked(
                    "An active booking already exists for this assignment".to_string(),
                ));
            }
            reactivate = Some(booking.booking_id);
        }

        let windows = self
            .repository
            .bookings
            .active_windows_elsewhere(tx, customer_id, candidate.assign_id)
            .await?;

        for window in &windows {
            if windows_overlap(
                candidate.start_time,
                candidate.end_time,
                window.start_time,
                window.end_time,
            ) {
                return Err(AppError::ScheduleConflict(format!(
                    "Requested slot overlaps an existing booking on assignment {}",
                    window.assign_id
                )));
            }
        }

        Ok(match reactivate {
            Some(booking_id) => ConflictCheck::Reactivate(booking_id),
            None => ConflictCheck::Fresh,
        })
    }

    /// Cancel a batch of bookings, then release their capacity.
    ///
    /// Cancellation commits first: a stuck booking is worse for the
    /// customer than a counter drift that can be reconciled later. The
    /// decrements are driven by the rows the status flip actually
    /// changed, so an id that was already Canceled, or that a concurrent
    /// cancel flipped first, releases its seat exactly once. A failed
    /// decrement is logged and reported per-assignment without aborting
    /// the rest of the batch.
    pub async fn cancel_bookings(&self, booking_ids: &[i32]) -> AppResult<CancelSummary> {
        if booking_ids.is_empty() {
            return Err(AppError::BadRequest("No booking ids provided".to_string()));
        }

        let entries = self.repository.bookings.assignments_for(booking_ids).await?;
        if entries.is_empty() {
            return Err(AppError::NotFound("No matching bookings found".to_string()));
        }

        let canceled = self.repository.bookings.cancel_batch(booking_ids).await?;

        let canceled_ids: std::collections::HashSet<i32> =
            canceled.iter().map(|row| row.booking_id).collect();
        let skipped: Vec<i32> = entries
            .iter()
            .map(|e| e.booking_id)
            .filter(|id| !canceled_ids.contains(id))
            .collect();

        let mut capacity_failures = Vec::new();
        for row in &canceled {
            if let Err(e) = self
                .repository
                .assignments
                .decrement_capacity(row.assign_id)
                .await
            {
                tracing::error!(
                    booking_id = row.booking_id,
                    assign_id = row.assign_id,
                    error = %e,
                    "booking canceled but capacity decrement failed"
                );
                capacity_failures.push(row.assign_id);
            }
        }

        Ok(CancelSummary {
            canceled: canceled.len(),
            skipped,
            capacity_failures,
        })
    }

    /// Confirm a batch of bookings (Confirmed/Paid). Canceled ids are
    /// skipped rather than failing the batch; no capacity effect.
    pub async fn confirm_bookings(&self, booking_ids: &[i32]) -> AppResult<u64> {
        if booking_ids.is_empty() {
            return Err(AppError::BadRequest("No booking ids provided".to_string()));
        }
        self.repository.bookings.confirm_batch(booking_ids).await
    }

    /// The customer who owns a booking, for ownership checks
    pub async fn booking_owner(&self, booking_id: i32) -> AppResult<i32> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        Ok(booking.customer_id)
    }

    /// A customer's bookings with trainer and service names resolved
    pub async fn customer_bookings(&self, customer_id: i32) -> AppResult<Vec<BookingDetails>> {
        // Verify customer exists
        self.repository
            .accounts
            .get_by_id(AccountKind::Customer, customer_id)
            .await?;
        self.repository.bookings.for_customer(customer_id).await
    }
}

/// Half-open interval overlap on time-of-day windows.
///
/// `[s1, e1)` and `[s2, e2)` overlap iff `s1 < e2 && s2 < e1`; touching
/// endpoints (one slot ends exactly when the other starts) do not count.
pub fn windows_overlap(s1: NaiveTime, e1: NaiveTime, s2: NaiveTime, e2: NaiveTime) -> bool {
    s1 < e2 && s2 < e1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn partial_overlap_conflicts() {
        // 10:00-11:00 vs 10:30-11:30
        assert!(windows_overlap(t(10, 0), t(11, 0), t(10, 30), t(11, 30)));
        assert!(windows_overlap(t(10, 30), t(11, 30), t(10, 0), t(11, 0)));
    }

    #[test]
    fn touching_endpoints_do_not_conflict() {
        // 10:00-11:00 vs 11:00-12:00
        assert!(!windows_overlap(t(10, 0), t(11, 0), t(11, 0), t(12, 0)));
        assert!(!windows_overlap(t(11, 0), t(12, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn containment_conflicts() {
        assert!(windows_overlap(t(9, 0), t(12, 0), t(10, 0), t(11, 0)));
        assert!(windows_overlap(t(10, 0), t(11, 0), t(9, 0), t(12, 0)));
    }

    #[test]
    fn identical_windows_conflict() {
        assert!(windows_overlap(t(10, 0), t(11, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn disjoint_windows_do_not_conflict() {
        assert!(!windows_overlap(t(8, 0), t(9, 0), t(17, 0), t(18, 0)));
    }
}
