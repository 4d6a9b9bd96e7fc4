//! Statistics service

use chrono::{Duration, Utc};

use crate::{
    api::stats::{AdminStats, ToolStats, UsageReport},
    error::AppResult,
    repository::Repository,
};

/// Window counted by `monthly_reservations`
const MONTHLY_WINDOW_DAYS: i64 = 30;

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Admin dashboard counts
    pub async fn admin_stats(&self) -> AppResult<AdminStats> {
        let (available, unavailable) = self.repository.tools.count_by_availability().await?;
        let active_reservations = self.repository.reservations.count_active().await?;
        let total_users = self.repository.users.count().await?;
        let since = Utc::now() - Duration::days(MONTHLY_WINDOW_DAYS);
        let monthly_reservations = self.repository.reservations.count_created_since(since).await?;

        Ok(AdminStats {
            total_tools: available + unavailable,
            active_reservations,
            total_users,
            tool_stats: ToolStats {
                available,
                checked_out: unavailable,
            },
            monthly_reservations,
        })
    }

    /// Flat usage totals
    pub async fn usage_report(&self) -> AppResult<UsageReport> {
        Ok(UsageReport {
            total_tools: self.repository.tools.count().await?,
            active_reservations: self.repository.reservations.count_active().await?,
            total_users: self.repository.users.count().await?,
        })
    }
}
