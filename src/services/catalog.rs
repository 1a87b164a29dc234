//! Assignment catalog service (staff CRUD + availability listing)

use crate::{
    error::{AppError, AppResult},
    models::{
        assignment::{
            parse_time, Assignment, AssignmentDetails, AssignmentQuery, CreateAssignment,
            Schedule, UpdateAssignment,
        },
        enums::AccountKind,
        service::{CreateGymService, GymService},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List assignments; `available = true` keeps only slots with
    /// remaining capacity (the customer-facing view).
    pub async fn list_assignments(&self, query: &AssignmentQuery) -> AppResult<Vec<AssignmentDetails>> {
        self.repository.assignments.list(query).await
    }

    /// Get assignment by ID
    pub async fn get_assignment(&self, assign_id: i32) -> AppResult<Assignment> {
        self.repository.assignments.get_by_id(assign_id).await
    }

    /// Create an assignment after validating its slot definition
    pub async fn create_assignment(&self, data: &CreateAssignment) -> AppResult<Assignment> {
        if data.max_capacity < 1 {
            return Err(AppError::Validation("max_capacity must be at least 1".to_string()));
        }
        let start = parse_time(&data.start_time)?;
        let end = parse_time(&data.end_time)?;
        if start >= end {
            return Err(AppError::Validation("start_time must be before end_time".to_string()));
        }
        let schedule = Schedule::from_names(&data.schedule)?;

        // Referenced trainer and service must exist
        self.repository
            .accounts
            .get_by_id(AccountKind::Trainer, data.trainer_id)
            .await?;
        self.repository.services.get_by_id(data.service_id).await?;

        self.repository
            .assignments
            .create(data, &schedule.serialize())
            .await
    }

    /// Update staff-editable fields of an assignment
    pub async fn update_assignment(&self, assign_id: i32, data: &UpdateAssignment) -> AppResult<Assignment> {
        let current = self.repository.assignments.get_by_id(assign_id).await?;

        let start_time = data.start_time.as_deref().map(parse_time).transpose()?;
        let end_time = data.end_time.as_deref().map(parse_time).transpose()?;
        let effective_start = start_time.unwrap_or(current.start_time);
        let effective_end = end_time.unwrap_or(current.end_time);
        if effective_start >= effective_end {
            return Err(AppError::Validation("start_time must be before end_time".to_string()));
        }

        if let Some(max) = data.max_capacity {
            if max < 1 {
                return Err(AppError::Validation("max_capacity must be at least 1".to_string()));
            }
            // Lowering the ceiling below the seats already taken would
            // break the capacity invariant
            if max < current.current_capacity {
                return Err(AppError::Validation(format!(
                    "max_capacity {} is below the {} active bookings on this slot",
                    max, current.current_capacity
                )));
            }
        }

        let schedule = data
            .schedule
            .as_ref()
            .map(|names| Schedule::from_names(names))
            .transpose()?
            .map(|s| s.serialize());

        self.repository
            .assignments
            .update(
                assign_id,
                start_time,
                end_time,
                schedule.as_deref(),
                data.max_capacity,
                data.rate,
                data.description.as_deref(),
            )
            .await
    }

    /// Delete an assignment
    pub async fn delete_assignment(&self, assign_id: i32) -> AppResult<()> {
        self.repository.assignments.delete(assign_id).await
    }

    /// List gym services
    pub async fn list_services(&self) -> AppResult<Vec<GymService>> {
        self.repository.services.list().await
    }

    /// Create a gym service
    pub async fn create_service(&self, data: &CreateGymService) -> AppResult<GymService> {
        if data.name.trim().is_empty() {
            return Err(AppError::Validation("Service name must not be empty".to_string()));
        }
        self.repository.services.create(data).await
    }
}
