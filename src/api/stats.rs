//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::AuthenticatedUser;

/// Admin dashboard statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminStats {
    pub total_tools: i64,
    /// Reservations not yet returned
    pub active_reservations: i64,
    pub total_users: i64,
    pub tool_stats: ToolStats,
    /// Reservations created in the last 30 days
    pub monthly_reservations: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToolStats {
    pub available: i64,
    /// Tools currently reserved or checked out
    pub checked_out: i64,
}

/// Usage totals
#[derive(Debug, Serialize, ToSchema)]
pub struct UsageReport {
    pub total_tools: i64,
    pub active_reservations: i64,
    pub total_users: i64,
}

/// Get admin statistics
#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Library statistics", body = AdminStats),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn admin_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<AdminStats>> {
    claims.require_admin()?;

    let stats = state.services.stats.admin_stats().await?;
    Ok(Json(stats))
}

/// Get the usage report
#[utoipa::path(
    get,
    path = "/report/usage",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Usage totals", body = UsageReport),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn usage_report(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UsageReport>> {
    claims.require_admin()?;

    let report = state.services.stats.usage_report().await?;
    Ok(Json(report))
}
