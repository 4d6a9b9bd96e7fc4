//! Tool catalogue endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::tool::{CreateTool, Tool, ToolQuery, ToolSearchQuery, UpdateTool},
};

use super::AuthenticatedUser;

/// List tools
#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(ToolQuery),
    responses(
        (status = 200, description = "List of tools", body = Vec<Tool>),
        (status = 400, description = "Invalid pagination"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_tools(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ToolQuery>,
) -> AppResult<Json<Vec<Tool>>> {
    let tools = state.services.tools.list(&query).await?;
    Ok(Json(tools))
}

/// Search tools by name or description
#[utoipa::path(
    get,
    path = "/tools/search",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(ToolSearchQuery),
    responses(
        (status = 200, description = "Matching tools", body = Vec<Tool>),
        (status = 400, description = "Empty search term")
    )
)]
pub async fn search_tools(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ToolSearchQuery>,
) -> AppResult<Json<Vec<Tool>>> {
    let tools = state.services.tools.search(&query.search_term).await?;
    Ok(Json(tools))
}

/// List tools in a category
#[utoipa::path(
    get,
    path = "/tools/category/{category}",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(
        ("category" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Tools in the category", body = Vec<Tool>)
    )
)]
pub async fn tools_by_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Tool>>> {
    let tools = state.services.tools.by_category(&category).await?;
    Ok(Json(tools))
}

/// Get tool details by ID
#[utoipa::path(
    get,
    path = "/tools/{id}",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Tool ID")
    ),
    responses(
        (status = 200, description = "Tool details", body = Tool),
        (status = 404, description = "Tool not found")
    )
)]
pub async fn get_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Tool>> {
    let tool = state.services.tools.get_by_id(id).await?;
    Ok(Json(tool))
}

/// Add a tool to the catalogue
#[utoipa::path(
    post,
    path = "/tools",
    tag = "tools",
    security(("bearer_auth" = [])),
    request_body = CreateTool,
    responses(
        (status = 201, description = "Tool created", body = Tool),
        (status = 400, description = "Invalid data"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn create_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(tool): Json<CreateTool>,
) -> AppResult<(StatusCode, Json<Tool>)> {
    claims.require_admin()?;
    tool.validate()?;

    let created = state.services.tools.create(&tool, claims.user_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Seed the catalogue with sample tools
#[utoipa::path(
    post,
    path = "/tools/sample",
    tag = "tools",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Sample tools created", body = Vec<Tool>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn create_sample_tools(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<(StatusCode, Json<Vec<Tool>>)> {
    claims.require_admin()?;

    let created = state.services.tools.create_samples(claims.user_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a tool
#[utoipa::path(
    put,
    path = "/tools/{id}",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Tool ID")
    ),
    request_body = UpdateTool,
    responses(
        (status = 200, description = "Tool updated", body = Tool),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Tool not found")
    )
)]
pub async fn update_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(tool): Json<UpdateTool>,
) -> AppResult<Json<Tool>> {
    claims.require_admin()?;
    tool.validate()?;

    let updated = state.services.tools.update(id, &tool).await?;
    Ok(Json(updated))
}

/// Delete a tool
#[utoipa::path(
    delete,
    path = "/tools/{id}",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Tool ID")
    ),
    responses(
        (status = 204, description = "Tool deleted"),
        (status = 400, description = "Tool has an active reservation"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Tool not found")
    )
)]
pub async fn delete_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.tools.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
