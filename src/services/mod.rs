//! Business logic services

pub mod reservations;
pub mod stats;
pub mod submissions;
pub mod tools;
pub mod users;

use crate::{
    config::{AuthConfig, ReservationsConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub tools: tools::ToolsService,
    pub reservations: reservations::ReservationsService,
    pub submissions: submissions::SubmissionsService,
    pub stats: stats::StatsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        reservations_config: ReservationsConfig,
    ) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            tools: tools::ToolsService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository.clone(), reservations_config),
            submissions: submissions::SubmissionsService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }

    /// Check database connectivity
    pub async fn check_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
