//! Tool submissions repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        tool::Tool,
        tool_submission::{CreateToolSubmission, SubmissionStatus, ToolSubmission, ToolSubmissionDetails},
    },
    repository::tools::insert_tool,
};

#[derive(Clone)]
pub struct SubmissionsRepository {
    pool: Pool<Postgres>,
}

impl SubmissionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a pending submission
    pub async fn create(&self, data: &CreateToolSubmission, user_id: i32) -> AppResult<ToolSubmission> {
        let submission = sqlx::query_as::<_, ToolSubmission>(
            r#"
            INSERT INTO tool_submissions (name, description, category, condition, image_url, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.category)
        .bind(&data.condition)
        .bind(&data.image_url)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(submission)
    }

    /// Pending submissions with submitter names, oldest first
    pub async fn list_pending(&self) -> AppResult<Vec<ToolSubmissionDetails>> {
        let rows = sqlx::query_as::<_, ToolSubmissionDetails>(
            r#"
            SELECT s.id, s.name, s.description, s.category, s.condition, s.image_url,
                   s.user_id, u.username AS user_name, s.status, s.submitted_at
            FROM tool_submissions s
            JOIN users u ON s.user_id = u.id
            WHERE s.status = $1
            ORDER BY s.submitted_at, s.id
            "#,
        )
        .bind(SubmissionStatus::Pending)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// A user's submissions, newest first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<ToolSubmission>> {
        let rows = sqlx::query_as::<_, ToolSubmission>(
            "SELECT * FROM tool_submissions WHERE user_id = $1 ORDER BY submitted_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Approve a pending submission, creating the tool it describes
    pub async fn approve(&self, id: i32) -> AppResult<(ToolSubmission, Tool)> {
        let mut tx = self.pool.begin().await?;

        let submission = sqlx::query_as::<_, ToolSubmission>(
            "SELECT * FROM tool_submissions WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        submission.ensure_pending()?;
        let tool = insert_tool(&mut *tx, &submission.to_create_tool(), submission.user_id).await?;

        let approved = sqlx::query_as::<_, ToolSubmission>(
            r#"
            UPDATE tool_submissions
            SET status = $2, reviewed_at = NOW(), tool_id = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(SubmissionStatus::Approved)
        .bind(tool.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((approved, tool))
    }

    /// Reject a pending submission
    pub async fn reject(&self, id: i32) -> AppResult<ToolSubmission> {
        let mut tx = self.pool.begin().await?;

        let submission = sqlx::query_as::<_, ToolSubmission>(
            "SELECT * FROM tool_submissions WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        submission.ensure_pending()?;

        let rejected = sqlx::query_as::<_, ToolSubmission>(
            r#"
            UPDATE tool_submissions SET status = $2, reviewed_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(SubmissionStatus::Rejected)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(rejected)
    }
}
