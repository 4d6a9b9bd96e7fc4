//! Tool submission endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::tool_submission::{ApprovalResult, CreateToolSubmission, ToolSubmission, ToolSubmissionDetails},
};

use super::AuthenticatedUser;

/// Propose a tool for the library
#[utoipa::path(
    post,
    path = "/tool-submissions",
    tag = "submissions",
    security(("bearer_auth" = [])),
    request_body = CreateToolSubmission,
    responses(
        (status = 201, description = "Submission recorded", body = ToolSubmission),
        (status = 400, description = "Invalid data")
    )
)]
pub async fn submit_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateToolSubmission>,
) -> AppResult<(StatusCode, Json<ToolSubmission>)> {
    data.validate()?;

    let submission = state.services.submissions.submit(&data, claims.user_id).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// List submissions awaiting review
#[utoipa::path(
    get,
    path = "/tool-submissions/pending",
    tag = "submissions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending submissions", body = Vec<ToolSubmissionDetails>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_pending(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ToolSubmissionDetails>>> {
    claims.require_admin()?;

    let submissions = state.services.submissions.list_pending().await?;
    Ok(Json(submissions))
}

/// List the caller's submissions
#[utoipa::path(
    get,
    path = "/tool-submissions/mine",
    tag = "submissions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own submissions", body = Vec<ToolSubmission>)
    )
)]
pub async fn list_mine(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ToolSubmission>>> {
    let submissions = state.services.submissions.list_for_user(claims.user_id).await?;
    Ok(Json(submissions))
}

/// Approve a submission and add the tool to the catalogue
#[utoipa::path(
    put,
    path = "/tool-submissions/{id}/approve",
    tag = "submissions",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission approved", body = ApprovalResult),
        (status = 400, description = "Submission already reviewed"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Submission not found")
    )
)]
pub async fn approve(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApprovalResult>> {
    claims.require_admin()?;

    let result = state.services.submissions.approve(id).await?;
    Ok(Json(result))
}

/// Reject a submission
#[utoipa::path(
    put,
    path = "/tool-submissions/{id}/reject",
    tag = "submissions",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission rejected", body = ToolSubmission),
        (status = 400, description = "Submission already reviewed"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Submission not found")
    )
)]
pub async fn reject(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ToolSubmission>> {
    claims.require_admin()?;

    let submission = state.services.submissions.reject(id).await?;
    Ok(Json(submission))
}
