//! Repository layer for database operations

pub mod reservations;
pub mod submissions;
pub mod tools;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub tools: tools::ToolsRepository,
    pub reservations: reservations::ReservationsRepository,
    pub submissions: submissions::SubmissionsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            tools: tools::ToolsRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            submissions: submissions::SubmissionsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
