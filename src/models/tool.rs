//! Tool model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

pub const DEFAULT_PAGE_LIMIT: i64 = 100;
pub const MAX_PAGE_LIMIT: i64 = 500;

/// Tool record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tool {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Last reported condition
    pub condition: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: Option<i32>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Create tool request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTool {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Update tool request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTool {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Tool listing query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ToolQuery {
    /// Number of records to skip (default: 0)
    pub skip: Option<i64>,
    /// Maximum number of records to return (default: 100, max: 500)
    pub limit: Option<i64>,
    /// Include tools that are currently reserved (default: false)
    pub include_unavailable: Option<bool>,
}

impl ToolQuery {
    /// Resolve `(skip, limit)`, rejecting out-of-range values
    pub fn pagination(&self) -> AppResult<(i64, i64)> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);

        if skip < 0 {
            return Err(AppError::Validation("skip must not be negative".to_string()));
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_LIMIT
            )));
        }

        Ok((skip, limit))
    }
}

/// Search query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ToolSearchQuery {
    /// Term matched against name and description
    pub search_term: String,
}

/// Tools created by `POST /tools/sample`
pub fn sample_tools() -> Vec<CreateTool> {
    [
        ("Power Drill", "Cordless power drill", "Power Tools"),
        ("Hammer", "Claw hammer", "Hand Tools"),
        ("Circular Saw", "Electric circular saw", "Power Tools"),
        ("Screwdriver Set", "Set of Phillips and flathead screwdrivers", "Hand Tools"),
        ("Wrench Set", "Set of adjustable wrenches", "Hand Tools"),
    ]
    .into_iter()
    .map(|(name, description, category)| CreateTool {
        name: name.to_string(),
        description: Some(description.to_string()),
        category: Some(category.to_string()),
        condition: Some("good".to_string()),
        image_url: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let query = ToolQuery::default();
        assert_eq!(query.pagination().unwrap(), (0, DEFAULT_PAGE_LIMIT));
    }

    #[test]
    fn pagination_rejects_out_of_range() {
        let negative_skip = ToolQuery {
            skip: Some(-1),
            ..Default::default()
        };
        assert!(negative_skip.pagination().is_err());

        let zero_limit = ToolQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert!(zero_limit.pagination().is_err());

        let huge_limit = ToolQuery {
            limit: Some(MAX_PAGE_LIMIT + 1),
            ..Default::default()
        };
        assert!(huge_limit.pagination().is_err());
    }

    #[test]
    fn sample_tools_are_valid() {
        let samples = sample_tools();
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|t| t.validate().is_ok()));
        assert_eq!(samples[0].name, "Power Drill");
    }
}
