//! Reservation endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        reservation::{CreateReservation, Reservation, ReservationDetails, ReservationQuery},
        tool_return::{CreateToolReturn, ToolReturn, ToolReturnDetails},
    },
};

use super::AuthenticatedUser;

/// Reserve a tool
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Tool reserved", body = Reservation),
        (status = 400, description = "Tool not available or invalid window"),
        (status = 403, description = "Cannot reserve for another user"),
        (status = 404, description = "Tool or user not found")
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = state.services.reservations.reserve(&claims, &request).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// List reservations (own, or all for admins)
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(ReservationQuery),
    responses(
        (status = 200, description = "Reservations", body = Vec<ReservationDetails>)
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ReservationQuery>,
) -> AppResult<Json<Vec<ReservationDetails>>> {
    let reservations = state
        .services
        .reservations
        .list(&claims, query.active_only.unwrap_or(false))
        .await?;
    Ok(Json(reservations))
}

/// Get reservation details by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation details", body = ReservationDetails),
        (status = 403, description = "Not your reservation"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ReservationDetails>> {
    let reservation = state.services.reservations.get(&claims, id).await?;
    Ok(Json(reservation))
}

/// Pick up a reserved tool
#[utoipa::path(
    post,
    path = "/reservations/{id}/checkout",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Tool checked out", body = Reservation),
        (status = 400, description = "Reservation not active or already checked out"),
        (status = 403, description = "Not your reservation"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn checkout(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.reservations.checkout(&claims, id).await?;
    Ok(Json(reservation))
}

/// Return a tool with a condition report
#[utoipa::path(
    post,
    path = "/reservations/{id}/return",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    request_body = CreateToolReturn,
    responses(
        (status = 200, description = "Tool returned", body = ToolReturn),
        (status = 400, description = "Tool already returned"),
        (status = 403, description = "Not your reservation"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn return_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(report): Json<CreateToolReturn>,
) -> AppResult<Json<ToolReturn>> {
    report.validate()?;

    let tool_return = state.services.reservations.return_tool(&claims, id, &report).await?;
    Ok(Json(tool_return))
}

/// List all return reports
#[utoipa::path(
    get,
    path = "/reservations/returns",
    tag = "reservations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Return reports", body = Vec<ToolReturnDetails>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_returns(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ToolReturnDetails>>> {
    claims.require_admin()?;

    let returns = state.services.reservations.list_returns().await?;
    Ok(Json(returns))
}
