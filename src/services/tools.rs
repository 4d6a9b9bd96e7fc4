//! Tool catalogue service

use crate::{
    error::{AppError, AppResult},
    models::tool::{sample_tools, CreateTool, Tool, ToolQuery, UpdateTool},
    repository::Repository,
};

#[derive(Clone)]
pub struct ToolsService {
    repository: Repository,
}

impl ToolsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List tools, available only unless asked otherwise
    pub async fn list(&self, query: &ToolQuery) -> AppResult<Vec<Tool>> {
        let (skip, limit) = query.pagination()?;
        self.repository
            .tools
            .list(skip, limit, query.include_unavailable.unwrap_or(false))
            .await
    }

    /// Search by name or description
    pub async fn search(&self, term: &str) -> AppResult<Vec<Tool>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::Validation("Search term must not be empty".to_string()));
        }
        self.repository.tools.search(term).await
    }

    pub async fn by_category(&self, category: &str) -> AppResult<Vec<Tool>> {
        self.repository.tools.list_by_category(category).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Tool> {
        self.repository.tools.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateTool, owner_id: i32) -> AppResult<Tool> {
        let tool = self.repository.tools.create(data, owner_id).await?;
        tracing::info!(tool_id = tool.id, name = %tool.name, "Tool created");
        Ok(tool)
    }

    /// Seed the catalogue with the predefined sample tools
    pub async fn create_samples(&self, owner_id: i32) -> AppResult<Vec<Tool>> {
        let tools = self
            .repository
            .tools
            .create_many(&sample_tools(), owner_id)
            .await?;
        tracing::info!(count = tools.len(), "Sample tools created");
        Ok(tools)
    }

    pub async fn update(&self, id: i32, data: &UpdateTool) -> AppResult<Tool> {
        self.repository.tools.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.tools.delete(id).await?;
        tracing::info!(tool_id = id, "Tool deleted");
        Ok(())
    }
}
