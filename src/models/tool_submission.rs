//! Tool submissions awaiting admin review

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

use super::tool::{CreateTool, Tool};

/// Review status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SubmissionStatus::Pending),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            _ => Err(format!("Invalid submission status: {}", s)),
        }
    }
}

text_enum_sqlx!(SubmissionStatus);

/// Submission record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ToolSubmission {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub image_url: Option<String>,
    pub user_id: i32,
    pub status: SubmissionStatus,
    /// Tool created on approval
    pub tool_id: Option<i32>,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl ToolSubmission {
    pub fn ensure_pending(&self) -> AppResult<()> {
        if self.status == SubmissionStatus::Pending {
            Ok(())
        } else {
            Err(AppError::BusinessRule(format!(
                "Submission has already been {}",
                self.status
            )))
        }
    }

    /// Tool fields carried over on approval
    pub fn to_create_tool(&self) -> CreateTool {
        CreateTool {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            condition: self.condition.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Submission with the submitter's username
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ToolSubmissionDetails {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub image_url: Option<String>,
    pub user_id: i32,
    pub user_name: String,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Submission request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateToolSubmission {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Approval outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct ApprovalResult {
    pub message: String,
    pub submission: ToolSubmission,
    pub tool: Tool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(status: SubmissionStatus) -> ToolSubmission {
        ToolSubmission {
            id: 1,
            name: "Ladder".to_string(),
            description: Some("6ft step ladder".to_string()),
            category: Some("Access".to_string()),
            condition: Some("good".to_string()),
            image_url: None,
            user_id: 4,
            status,
            tool_id: None,
            submitted_at: Utc::now(),
            reviewed_at: None,
        }
    }

    #[test]
    fn only_pending_submissions_can_be_reviewed() {
        assert!(submission(SubmissionStatus::Pending).ensure_pending().is_ok());

        let err = submission(SubmissionStatus::Approved).ensure_pending().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Business rule violation: Submission has already been approved"
        );
        assert!(submission(SubmissionStatus::Rejected).ensure_pending().is_err());
    }

    #[test]
    fn approval_copies_tool_fields() {
        let tool = submission(SubmissionStatus::Pending).to_create_tool();
        assert_eq!(tool.name, "Ladder");
        assert_eq!(tool.category.as_deref(), Some("Access"));
        assert_eq!(tool.condition.as_deref(), Some("good"));
    }
}
