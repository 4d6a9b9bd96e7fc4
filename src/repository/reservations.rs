//! Reservations repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        reservation::{Reservation, ReservationDetails, ReservationWindow},
        tool_return::{CreateToolReturn, ToolReturn, ToolReturnDetails},
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT r.id, r.tool_id, t.name AS tool_name, r.user_id, u.username,
           r.start_date, r.end_date, r.is_active, r.is_checked_out,
           r.checked_out_at, r.returned_at, r.created_at
    FROM reservations r
    JOIN tools t ON r.tool_id = t.id
    JOIN users u ON r.user_id = u.id
"#;

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get reservation by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))
    }

    /// Get reservation with tool and user names
    pub async fn get_details(&self, id: i32) -> AppResult<ReservationDetails> {
        let query = format!("{} WHERE r.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, ReservationDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(ReservationDetails::with_status)
            .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))
    }

    /// List reservations, optionally restricted to one user and to active ones
    pub async fn list(&self, user_id: Option<i32>, active_only: bool) -> AppResult<Vec<ReservationDetails>> {
        let query = format!(
            r#"{}
            WHERE ($1::INTEGER IS NULL OR r.user_id = $1)
              AND ($2 = FALSE OR r.is_active = TRUE)
            ORDER BY r.created_at DESC, r.id DESC
            "#,
            DETAILS_SELECT
        );

        let rows = sqlx::query_as::<_, ReservationDetails>(&query)
            .bind(user_id)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ReservationDetails::with_status).collect())
    }

    /// Reserve a tool: locks the tool row, inserts the reservation and marks
    /// the tool unavailable in one transaction
    pub async fn create(&self, tool_id: i32, user_id: i32, window: ReservationWindow) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let available: bool =
            sqlx::query_scalar("SELECT is_available FROM tools WHERE id = $1 FOR UPDATE")
                .bind(tool_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Tool not found".to_string()))?;

        if !available {
            return Err(AppError::BusinessRule("Tool is not available".to_string()));
        }

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (tool_id, user_id, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tool_id)
        .bind(user_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            // one-active-reservation-per-tool index
            sqlx::Error::Database(ref db_err) if db_err.code().as_deref() == Some("23505") => {
                AppError::BusinessRule("Tool is not available".to_string())
            }
            other => AppError::Database(other),
        })?;

        sqlx::query("UPDATE tools SET is_available = FALSE WHERE id = $1")
            .bind(tool_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(reservation)
    }

    /// Mark a reserved tool as picked up
    pub async fn checkout(&self, id: i32) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))?;

        reservation.ensure_can_checkout()?;

        let updated = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations SET is_checked_out = TRUE, checked_out_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Close a reservation: records the return report and puts the tool back
    /// in circulation with the reported condition
    pub async fn return_tool(&self, id: i32, data: &CreateToolReturn) -> AppResult<ToolReturn> {
        let mut tx = self.pool.begin().await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))?;

        reservation.ensure_can_return()?;

        sqlx::query(
            r#"
            UPDATE reservations
            SET is_active = FALSE, is_checked_out = FALSE, returned_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let tool_return = sqlx::query_as::<_, ToolReturn>(
            r#"
            INSERT INTO tool_returns (reservation_id, condition, damages, return_reason, feedback)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.condition)
        .bind(&data.damages)
        .bind(&data.return_reason)
        .bind(&data.feedback)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE tools SET is_available = TRUE, condition = $2 WHERE id = $1")
            .bind(reservation.tool_id)
            .bind(data.condition.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(tool_return)
    }

    /// All return reports, newest first
    pub async fn list_returns(&self) -> AppResult<Vec<ToolReturnDetails>> {
        let rows = sqlx::query_as::<_, ToolReturnDetails>(
            r#"
            SELECT tr.id, tr.reservation_id, r.tool_id, t.name AS tool_name,
                   r.user_id, u.username, tr.condition, tr.damages,
                   tr.return_reason, tr.feedback, tr.return_date
            FROM tool_returns tr
            JOIN reservations r ON tr.reservation_id = r.id
            JOIN tools t ON r.tool_id = t.id
            JOIN users u ON r.user_id = u.id
            ORDER BY tr.return_date DESC, tr.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Count reservations that have not been returned
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE is_active = TRUE")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count reservations created since `since`
    pub async fn count_created_since(&self, since: DateTime<Utc>) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE created_at >= $1")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
