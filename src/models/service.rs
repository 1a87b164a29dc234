//! Gym service models (the offering an assignment belongs to)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Gym service (e.g. "Yoga", "CrossFit")
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GymService {
    pub service_id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Create gym service request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGymService {
    pub name: String,
    pub description: Option<String>,
}
