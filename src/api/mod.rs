//! API handlers for the tool library REST endpoints

pub mod auth;
pub mod health;
pub mod openapi;
pub mod reservations;
pub mod stats;
pub mod submissions;
pub mod tools;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderValue},
    routing::{get, post, put},
    Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::AppConfig, error::AppError, models::user::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Authentication("Could not validate credentials".to_string()))?;

        let claims = UserClaims::from_token(bearer.token(), &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(format!("Could not validate credentials: {}", e)))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Build the CORS layer from configured origins
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = if config.cors_allows_any() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/token", post(auth::token))
        .route("/auth/me", get(auth::me))
        // Users
        .route("/users", get(users::list_users))
        .route("/users/:id", get(users::get_user).put(users::update_profile))
        .route("/users/:id/role", put(users::update_role))
        // Tools
        .route("/tools", get(tools::list_tools).post(tools::create_tool))
        .route("/tools/search", get(tools::search_tools))
        .route("/tools/category/:category", get(tools::tools_by_category))
        .route("/tools/sample", post(tools::create_sample_tools))
        .route(
            "/tools/:id",
            get(tools::get_tool).put(tools::update_tool).delete(tools::delete_tool),
        )
        // Reservations
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/reservations/returns", get(reservations::list_returns))
        .route("/reservations/:id", get(reservations::get_reservation))
        .route("/reservations/:id/checkout", post(reservations::checkout))
        .route("/reservations/:id/return", post(reservations::return_tool))
        // Tool submissions
        .route("/tool-submissions", post(submissions::submit_tool))
        .route("/tool-submissions/pending", get(submissions::list_pending))
        .route("/tool-submissions/mine", get(submissions::list_mine))
        .route("/tool-submissions/:id/approve", put(submissions::approve))
        .route("/tool-submissions/:id/reject", put(submissions::reject))
        // Statistics
        .route("/admin/stats", get(stats::admin_stats))
        .route("/report/usage", get(stats::usage_report))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
