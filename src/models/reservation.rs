//! Reservation model and lifecycle rules

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Reservation record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub tool_id: i32,
    pub user_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub is_checked_out: bool,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Where a reservation is in its lifecycle, derived from its flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Reserved,
    CheckedOut,
    Returned,
}

impl ReservationStatus {
    pub fn from_flags(is_active: bool, is_checked_out: bool) -> Self {
        match (is_active, is_checked_out) {
            (false, _) => ReservationStatus::Returned,
            (true, true) => ReservationStatus::CheckedOut,
            (true, false) => ReservationStatus::Reserved,
        }
    }
}

impl Reservation {
    pub fn status(&self) -> ReservationStatus {
        ReservationStatus::from_flags(self.is_active, self.is_checked_out)
    }

    pub fn ensure_can_checkout(&self) -> AppResult<()> {
        match self.status() {
            ReservationStatus::Reserved => Ok(()),
            ReservationStatus::CheckedOut => {
                Err(AppError::BusinessRule("Tool already checked out".to_string()))
            }
            ReservationStatus::Returned => {
                Err(AppError::BusinessRule("Reservation is not active".to_string()))
            }
        }
    }

    pub fn ensure_can_return(&self) -> AppResult<()> {
        if self.is_active {
            Ok(())
        } else {
            Err(AppError::BusinessRule("Tool already returned".to_string()))
        }
    }
}

/// Reservation with tool and borrower names, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReservationDetails {
    pub id: i32,
    pub tool_id: i32,
    pub tool_name: String,
    pub user_id: i32,
    pub username: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub is_checked_out: bool,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub status: Option<ReservationStatus>,
}

impl ReservationDetails {
    /// Fill in the derived status
    pub fn with_status(mut self) -> Self {
        self.status = Some(ReservationStatus::from_flags(self.is_active, self.is_checked_out));
        self
    }
}

/// Create reservation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservation {
    pub tool_id: i32,
    /// Borrower; admins may reserve on behalf of another user
    pub user_id: Option<i32>,
    /// Defaults to now
    pub start_date: Option<DateTime<Utc>>,
    /// Defaults to start date plus the configured duration
    pub end_date: Option<DateTime<Utc>>,
}

/// Reservation listing query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ReservationQuery {
    /// Only reservations that have not been returned
    pub active_only: Option<bool>,
}

/// Resolved reservation window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReservationWindow {
    /// Apply defaults and bounds to a requested window
    pub fn resolve(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        default_days: i64,
        max_days: i64,
    ) -> AppResult<Self> {
        let start = start.unwrap_or(now);
        let end = match end {
            Some(end) => end,
            None => start
                .checked_add_signed(Duration::days(default_days))
                .ok_or_else(|| AppError::Validation("start_date out of range".to_string()))?,
        };

        if end < start {
            return Err(AppError::Validation(
                "end_date must not be before start_date".to_string(),
            ));
        }
        if end - start > Duration::days(max_days) {
            return Err(AppError::Validation(format!(
                "Reservations cannot exceed {} days",
                max_days
            )));
        }

        Ok(Self { start, end })
    }
}
