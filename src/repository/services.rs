//! Gym services repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::service::{CreateGymService, GymService},
};

#[derive(Clone)]
pub struct ServicesRepository {
    pool: Pool<Postgres>,
}

impl ServicesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all gym services
    pub async fn list(&self) -> AppResult<Vec<GymService>> {
        let services = sqlx::query_as::<_, GymService>("SELECT * FROM services ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }

    /// Get gym service by ID
    pub async fn get_by_id(&self, service_id: i32) -> AppResult<GymService> {
        sqlx::query_as::<_, GymService>("SELECT * FROM services WHERE service_id = $1")
            .bind(service_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service with id {} not found", service_id)))
    }

    /// Create a gym service
    pub async fn create(&self, data: &CreateGymService) -> AppResult<GymService> {
        let service = sqlx::query_as::<_, GymService>(
            r#"
            INSERT INTO services (name, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.description.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }
}
