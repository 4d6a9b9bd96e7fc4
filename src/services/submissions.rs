//! Tool submission review service

use crate::{
    error::AppResult,
    models::tool_submission::{ApprovalResult, CreateToolSubmission, ToolSubmission, ToolSubmissionDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct SubmissionsService {
    repository: Repository,
}

impl SubmissionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn submit(&self, data: &CreateToolSubmission, user_id: i32) -> AppResult<ToolSubmission> {
        let submission = self.repository.submissions.create(data, user_id).await?;
        tracing::info!(submission_id = submission.id, user_id, "Tool submitted for review");
        Ok(submission)
    }

    pub async fn list_pending(&self) -> AppResult<Vec<ToolSubmissionDetails>> {
        self.repository.submissions.list_pending().await
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<ToolSubmission>> {
        self.repository.submissions.list_for_user(user_id).await
    }

    /// Approve a submission; the new tool is owned by the submitter
    pub async fn approve(&self, id: i32) -> AppResult<ApprovalResult> {
        let (submission, tool) = self.repository.submissions.approve(id).await?;
        tracing::info!(submission_id = id, tool_id = tool.id, "Submission approved");
        Ok(ApprovalResult {
            message: "Tool submission approved and tool created successfully".to_string(),
            submission,
            tool,
        })
    }

    pub async fn reject(&self, id: i32) -> AppResult<ToolSubmission> {
        let submission = self.repository.submissions.reject(id).await?;
        tracing::info!(submission_id = id, "Submission rejected");
        Ok(submission)
    }
}
