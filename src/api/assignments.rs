//! Assignment catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        assignment::{Assignment, AssignmentDetails, AssignmentQuery, CreateAssignment, UpdateAssignment},
        service::{CreateGymService, GymService},
    },
};

use super::AuthenticatedUser;

/// List assignments, optionally filtered to available slots
#[utoipa::path(
    get,
    path = "/assignments",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(AssignmentQuery),
    responses(
        (status = 200, description = "Assignments", body = Vec<AssignmentDetails>)
    )
)]
pub async fn list_assignments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<AssignmentQuery>,
) -> AppResult<Json<Vec<AssignmentDetails>>> {
    let assignments = state.services.catalog.list_assignments(&query).await?;
    Ok(Json(assignments))
}

/// Get a single assignment
#[utoipa::path(
    get,
    path = "/assignments/{id}",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment", body = Assignment),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn get_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(assign_id): Path<i32>,
) -> AppResult<Json<Assignment>> {
    let assignment = state.services.catalog.get_assignment(assign_id).await?;
    Ok(Json(assignment))
}

/// Create an assignment (staff only)
#[utoipa::path(
    post,
    path = "/assignments",
    tag = "assignments",
    security(("bearer_auth" = [])),
    request_body = CreateAssignment,
    responses(
        (status = 201, description = "Assignment created", body = Assignment),
        (status = 400, description = "Invalid slot definition")
    )
)]
pub async fn create_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateAssignment>,
) -> AppResult<(StatusCode, Json<Assignment>)> {
    claims.require_staff()?;
    let assignment = state.services.catalog.create_assignment(&data).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Update an assignment (staff only)
#[utoipa::path(
    put,
    path = "/assignments/{id}",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = UpdateAssignment,
    responses(
        (status = 200, description = "Assignment updated", body = Assignment),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn update_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(assign_id): Path<i32>,
    Json(data): Json<UpdateAssignment>,
) -> AppResult<Json<Assignment>> {
    claims.require_staff()?;
    let assignment = state.services.catalog.update_assignment(assign_id, &data).await?;
    Ok(Json(assignment))
}

/// Delete an assignment (staff only)
#[utoipa::path(
    delete,
    path = "/assignments/{id}",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 204, description = "Assignment deleted"),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn delete_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(assign_id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;
    state.services.catalog.delete_assignment(assign_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List gym services
#[utoipa::path(
    get,
    path = "/services",
    tag = "assignments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Gym services", body = Vec<GymService>)
    )
)]
pub async fn list_services(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<GymService>>> {
    let services = state.services.catalog.list_services().await?;
    Ok(Json(services))
}

/// Create a gym service (staff only)
#[utoipa::path(
    post,
    path = "/services",
    tag = "assignments",
    security(("bearer_auth" = [])),
    request_body = CreateGymService,
    responses(
        (status = 201, description = "Service created", body = GymService)
    )
)]
pub async fn create_service(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateGymService>,
) -> AppResult<(StatusCode, Json<GymService>)> {
    claims.require_staff()?;
    let service = state.services.catalog.create_service(&data).await?;
    Ok((StatusCode::CREATED, Json(service)))
}
