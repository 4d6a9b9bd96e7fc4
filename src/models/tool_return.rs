//! Tool return reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Condition reported when a tool comes back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToolCondition {
    /// Like new
    Excellent,
    /// Normal wear and tear
    Good,
    /// Shows signs of use
    Fair,
    /// Needs maintenance
    Poor,
}

impl ToolCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCondition::Excellent => "excellent",
            ToolCondition::Good => "good",
            ToolCondition::Fair => "fair",
            ToolCondition::Poor => "poor",
        }
    }
}

impl std::fmt::Display for ToolCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ToolCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excellent" => Ok(ToolCondition::Excellent),
            "good" => Ok(ToolCondition::Good),
            "fair" => Ok(ToolCondition::Fair),
            "poor" => Ok(ToolCondition::Poor),
            _ => Err(format!("Invalid tool condition: {}", s)),
        }
    }
}

text_enum_sqlx!(ToolCondition);

/// Return record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ToolReturn {
    pub id: i32,
    pub reservation_id: i32,
    pub condition: ToolCondition,
    pub damages: Option<String>,
    pub return_reason: Option<String>,
    pub feedback: Option<String>,
    pub return_date: DateTime<Utc>,
}

/// Return record with tool and borrower names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ToolReturnDetails {
    pub id: i32,
    pub reservation_id: i32,
    pub tool_id: i32,
    pub tool_name: String,
    pub user_id: i32,
    pub username: String,
    pub condition: ToolCondition,
    pub damages: Option<String>,
    pub return_reason: Option<String>,
    pub feedback: Option<String>,
    pub return_date: DateTime<Utc>,
}

/// Return request body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateToolReturn {
    pub condition: ToolCondition,
    #[validate(length(max = 2000, message = "Damages must be at most 2000 characters"))]
    pub damages: Option<String>,
    #[validate(length(max = 500, message = "Return reason must be at most 500 characters"))]
    pub return_reason: Option<String>,
    #[validate(length(max = 2000, message = "Feedback must be at most 2000 characters"))]
    pub feedback: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_parses_and_serializes_lowercase() {
        assert_eq!("Fair".parse::<ToolCondition>(), Ok(ToolCondition::Fair));
        assert!("broken".parse::<ToolCondition>().is_err());
        assert_eq!(
            serde_json::to_value(ToolCondition::Excellent).unwrap(),
            serde_json::json!("excellent")
        );
    }

    #[test]
    fn return_body_requires_known_condition() {
        let ok: Result<CreateToolReturn, _> =
            serde_json::from_value(serde_json::json!({ "condition": "good", "feedback": "Great drill" }));
        assert!(ok.is_ok());

        let bad: Result<CreateToolReturn, _> =
            serde_json::from_value(serde_json::json!({ "condition": "shiny" }));
        assert!(bad.is_err());
    }
}
