//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assignments, auth, bookings, health, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gymdesk API",
        version = "1.0.0",
        description = "Gym Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Gymdesk Team", email = "contact@gymdesk.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        auth::register,
        auth::request_password_reset,
        auth::confirm_password_reset,
        // Assignments
        assignments::list_assignments,
        assignments::get_assignment,
        assignments::create_assignment,
        assignments::update_assignment,
        assignments::delete_assignment,
        assignments::list_services,
        assignments::create_service,
        // Bookings
        bookings::submit_booking,
        bookings::confirm_bookings,
        bookings::cancel_bookings,
        bookings::cancel_own_booking,
        bookings::customer_bookings,
        // Stats
        stats::booking_stats,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::ResetRequest,
            auth::ResetConfirm,
            auth::StatusResponse,
            crate::models::account::AccountInfo,
            crate::models::account::RegisterCustomer,
            crate::models::enums::AccountKind,
            // Assignments
            crate::models::assignment::Assignment,
            crate::models::assignment::AssignmentDetails,
            crate::models::assignment::AssignmentQuery,
            crate::models::assignment::CreateAssignment,
            crate::models::assignment::UpdateAssignment,
            crate::models::service::GymService,
            crate::models::service::CreateGymService,
            // Bookings
            bookings::BookingResponse,
            bookings::BatchResponse,
            crate::models::booking::SubmitBooking,
            crate::models::booking::BookingBatch,
            crate::models::booking::BookingDetails,
            crate::models::booking::CancelSummary,
            crate::models::booking::SubmitKind,
            crate::models::enums::PaymentStatus,
            crate::models::enums::ConfirmationStatus,
            // Stats
            stats::BookingStatsResponse,
            stats::BookingStatsQuery,
            crate::models::booking::BookingStats,
            crate::models::booking::TrainerBookingStats,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "assignments", description = "Trainer assignment catalog"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
