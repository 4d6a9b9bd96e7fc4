//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, health, reservations, stats, submissions, tools, users};

/// Declares the `bearer_auth` scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tool Library API",
        version = "0.3.0",
        description = "Community tool lending library REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::token,
        auth::me,
        // Users
        users::list_users,
        users::get_user,
        users::update_profile,
        users::update_role,
        // Tools
        tools::list_tools,
        tools::search_tools,
        tools::tools_by_category,
        tools::get_tool,
        tools::create_tool,
        tools::create_sample_tools,
        tools::update_tool,
        tools::delete_tool,
        // Reservations
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::checkout,
        reservations::return_tool,
        reservations::list_returns,
        // Submissions
        submissions::submit_tool,
        submissions::list_pending,
        submissions::list_mine,
        submissions::approve,
        submissions::reject,
        // Stats
        stats::admin_stats,
        stats::usage_report,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::TokenRequest,
            auth::TokenResponse,
            // Users
            crate::models::user::Role,
            crate::models::user::User,
            crate::models::user::RegisterUser,
            crate::models::user::UpdateProfile,
            crate::models::user::UpdateRole,
            // Tools
            crate::models::tool::Tool,
            crate::models::tool::CreateTool,
            crate::models::tool::UpdateTool,
            // Reservations
            crate::models::reservation::Reservation,
            crate::models::reservation::ReservationDetails,
            crate::models::reservation::ReservationStatus,
            crate::models::reservation::CreateReservation,
            crate::models::tool_return::ToolCondition,
            crate::models::tool_return::ToolReturn,
            crate::models::tool_return::ToolReturnDetails,
            crate::models::tool_return::CreateToolReturn,
            // Submissions
            crate::models::tool_submission::SubmissionStatus,
            crate::models::tool_submission::ToolSubmission,
            crate::models::tool_submission::ToolSubmissionDetails,
            crate::models::tool_submission::CreateToolSubmission,
            crate::models::tool_submission::ApprovalResult,
            // Stats
            stats::AdminStats,
            stats::ToolStats,
            stats::UsageReport,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and authentication"),
        (name = "users", description = "User management"),
        (name = "tools", description = "Tool catalogue"),
        (name = "reservations", description = "Reservations, checkouts and returns"),
        (name = "submissions", description = "Community tool submissions"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_declares_bearer_scheme_and_core_paths() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
        assert!(doc["paths"]["/tools/{id}"].is_object());
        assert!(doc["paths"]["/reservations/{id}/return"].is_object());
    }
}
