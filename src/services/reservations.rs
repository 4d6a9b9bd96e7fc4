//! Reservation lifecycle service: reserve, checkout, return

use chrono::Utc;

use crate::{
    config::ReservationsConfig,
    error::{AppError, AppResult},
    models::{
        reservation::{CreateReservation, Reservation, ReservationDetails, ReservationWindow},
        tool_return::{CreateToolReturn, ToolReturn, ToolReturnDetails},
        user::UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
    config: ReservationsConfig,
}

impl ReservationsService {
    pub fn new(repository: Repository, config: ReservationsConfig) -> Self {
        Self { repository, config }
    }

    /// Reserve a tool for the caller, or for another user when the caller is an admin
    pub async fn reserve(&self, claims: &UserClaims, request: &CreateReservation) -> AppResult<Reservation> {
        let user_id = request.user_id.unwrap_or(claims.user_id);
        if !claims.can_act_for(user_id) {
            return Err(AppError::Authorization(
                "Not authorized to reserve for another user".to_string(),
            ));
        }

        let window = ReservationWindow::resolve(
            request.start_date,
            request.end_date,
            Utc::now(),
            self.config.default_duration_days,
            self.config.max_duration_days,
        )?;

        if user_id != claims.user_id {
            // 404 for an unknown borrower
            self.repository.users.get_by_id(user_id).await?;
        }

        let reservation = self
            .repository
            .reservations
            .create(request.tool_id, user_id, window)
            .await?;

        tracing::info!(
            reservation_id = reservation.id,
            tool_id = reservation.tool_id,
            user_id = reservation.user_id,
            "Tool reserved"
        );
        Ok(reservation)
    }

    /// Load a reservation the caller owns (admins see every reservation)
    async fn owned(&self, claims: &UserClaims, id: i32) -> AppResult<Reservation> {
        let reservation = self.repository.reservations.get_by_id(id).await?;
        if !claims.can_act_for(reservation.user_id) {
            return Err(AppError::Authorization(
                "Not authorized to access this reservation".to_string(),
            ));
        }
        Ok(reservation)
    }

    pub async fn checkout(&self, claims: &UserClaims, id: i32) -> AppResult<Reservation> {
        self.owned(claims, id).await?;
        let reservation = self.repository.reservations.checkout(id).await?;
        tracing::info!(reservation_id = id, tool_id = reservation.tool_id, "Tool checked out");
        Ok(reservation)
    }

    pub async fn return_tool(&self, claims: &UserClaims, id: i32, report: &CreateToolReturn) -> AppResult<ToolReturn> {
        let reservation = self.owned(claims, id).await?;
        let tool_return = self.repository.reservations.return_tool(id, report).await?;
        tracing::info!(
            reservation_id = id,
            tool_id = reservation.tool_id,
            condition = %tool_return.condition,
            "Tool returned"
        );
        Ok(tool_return)
    }

    /// Admins see all reservations, everyone else only their own
    pub async fn list(&self, claims: &UserClaims, active_only: bool) -> AppResult<Vec<ReservationDetails>> {
        let user_filter = if claims.is_admin() { None } else { Some(claims.user_id) };
        self.repository.reservations.list(user_filter, active_only).await
    }

    pub async fn get(&self, claims: &UserClaims, id: i32) -> AppResult<ReservationDetails> {
        self.owned(claims, id).await?;
        self.repository.reservations.get_details(id).await
    }

    pub async fn list_returns(&self) -> AppResult<Vec<ToolReturnDetails>> {
        self.repository.reservations.list_returns().await
    }
}
