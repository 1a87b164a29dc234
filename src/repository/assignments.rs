//! Assignments repository: catalog access and the capacity counter

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::assignment::{Assignment, AssignmentDetails, AssignmentQuery, CreateAssignment},
};

#[derive(Clone)]
pub struct AssignmentsRepository {
    pool: Pool<Postgres>,
}

impl AssignmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get assignment by ID
    pub async fn get_by_id(&self, assign_id: i32) -> AppResult<Assignment> {
        sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE assign_id = $1")
            .bind(assign_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment with id {} not found", assign_id)))
    }

    /// Get assignment by ID inside a transaction, locking the row.
    ///
    /// `FOR UPDATE` serializes concurrent submits touching the same slot,
    /// so the conflict check and the capacity increment see the same row.
    pub async fn get_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        assign_id: i32,
    ) -> AppResult<Assignment> {
        sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE assign_id = $1 FOR UPDATE")
            .bind(assign_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment with id {} not found", assign_id)))
    }

    /// List assignments with trainer and service names resolved
    pub async fn list(&self, query: &AssignmentQuery) -> AppResult<Vec<AssignmentDetails>> {
        let rows = sqlx::query_as::<_, AssignmentDetails>(
            r#"
            SELECT a.assign_id, a.service_id, s.name AS service_name,
                   a.trainer_id, t.name AS trainer_name,
                   a.start_time, a.end_time, a.schedule,
                   a.max_capacity, a.current_capacity, a.rate, a.description
            FROM assignments a
            JOIN services s ON a.service_id = s.service_id
            JOIN trainers t ON a.trainer_id = t.id
            WHERE ($1::int IS NULL OR a.service_id = $1)
              AND ($2::int IS NULL OR a.trainer_id = $2)
              AND (NOT $3 OR a.current_capacity < a.max_capacity)
            ORDER BY a.start_time, a.assign_id
            "#,
        )
        .bind(query.service_id)
        .bind(query.trainer_id)
        .bind(query.available.unwrap_or(false))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Create an assignment (capacity counter starts at zero)
    pub async fn create(&self, data: &CreateAssignment, schedule: &str) -> AppResult<Assignment> {
        let start_time = crate::models::assignment::parse_time(&data.start_time)?;
        let end_time = crate::models::assignment::parse_time(&data.end_time)?;

        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments
                (service_id, trainer_id, start_time, end_time, schedule,
                 max_capacity, current_capacity, rate, description)
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8)
            RETURNING *
            "#,
        )
        .bind(data.service_id)
        .bind(data.trainer_id)
        .bind(start_time)
        .bind(end_time)
        .bind(schedule)
        .bind(data.max_capacity)
        .bind(data.rate)
        .bind(data.description.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(assignment)
    }

    /// Update staff-editable assignment fields (never the capacity counter)
    pub async fn update(
        &self,
        assign_id: i32,
        start_time: Option<chrono::NaiveTime>,
        end_time: Option<chrono::NaiveTime>,
        schedule: Option<&str>,
        max_capacity: Option<i32>,
        rate: Option<i32>,
        description: Option<&str>,
    ) -> AppResult<Assignment> {
        sqlx::query_as::<_, Assignment>(
            r#"
            UPDATE assignments SET
                start_time = COALESCE($2, start_time),
                end_time = COALESCE($3, end_time),
                schedule = COALESCE($4, schedule),
                max_capacity = COALESCE($5, max_capacity),
                rate = COALESCE($6, rate),
                description = COALESCE($7, description)
            WHERE assign_id = $1
            RETURNING *
            "#,
        )
        .bind(assign_id)
        .bind(start_time)
        .bind(end_time)
        .bind(schedule)
        .bind(max_capacity)
        .bind(rate)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assignment with id {} not found", assign_id)))
    }

    /// Delete an assignment
    pub async fn delete(&self, assign_id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM assignments WHERE assign_id = $1")
            .bind(assign_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Assignment with id {} not found", assign_id)));
        }
        Ok(())
    }

    /// Atomically bump the capacity counter, rejecting at the ceiling.
    ///
    /// Single conditional UPDATE, never read-then-write: N concurrent
    /// increments against M remaining seats succeed for exactly min(N, M)
    /// callers.
    pub async fn increment_capacity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        assign_id: i32,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE assignments
            SET current_capacity = current_capacity + 1
            WHERE assign_id = $1 AND current_capacity < max_capacity
            "#,
        )
        .bind(assign_id)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::CapacityExceeded { assign_id });
        }
        Ok(())
    }

    /// Atomically lower the capacity counter, rejecting at zero.
    ///
    /// Runs against the pool: cancellation has already committed and must
    /// not be held hostage by capacity bookkeeping.
    pub async fn decrement_capacity(&self, assign_id: i32) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE assignments
            SET current_capacity = current_capacity - 1
            WHERE assign_id = $1 AND current_capacity > 0
            "#,
        )
        .bind(assign_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::CapacityUnderflow { assign_id });
        }
        Ok(())
    }
}
