//! Tools repository for database operations

use sqlx::{Executor, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::tool::{CreateTool, Tool, UpdateTool},
};

#[derive(Clone)]
pub struct ToolsRepository {
    pool: Pool<Postgres>,
}

impl ToolsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List tools with pagination, optionally including reserved ones
    pub async fn list(&self, skip: i64, limit: i64, include_unavailable: bool) -> AppResult<Vec<Tool>> {
        let tools = sqlx::query_as::<_, Tool>(
            r#"
            SELECT * FROM tools
            WHERE ($3 OR is_available = TRUE)
            ORDER BY id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(skip)
        .bind(limit)
        .bind(include_unavailable)
        .fetch_all(&self.pool)
        .await?;
        Ok(tools)
    }

    /// Case-insensitive substring search on name and description
    pub async fn search(&self, term: &str) -> AppResult<Vec<Tool>> {
        let pattern = format!("%{}%", escape_like(term));
        let tools = sqlx::query_as::<_, Tool>(
            r#"
            SELECT * FROM tools
            WHERE name ILIKE $1 OR description ILIKE $1
            ORDER BY name
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(tools)
    }

    /// Tools in a category, exact match
    pub async fn list_by_category(&self, category: &str) -> AppResult<Vec<Tool>> {
        let tools = sqlx::query_as::<_, Tool>(
            "SELECT * FROM tools WHERE category = $1 ORDER BY name",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(tools)
    }

    /// Get tool by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Tool> {
        sqlx::query_as::<_, Tool>("SELECT * FROM tools WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Tool not found".to_string()))
    }

    /// Create a tool owned by `owner_id`
    pub async fn create(&self, data: &CreateTool, owner_id: i32) -> AppResult<Tool> {
        Ok(insert_tool(&self.pool, data, owner_id).await?)
    }

    /// Create several tools in one transaction
    pub async fn create_many(&self, tools: &[CreateTool], owner_id: i32) -> AppResult<Vec<Tool>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(tools.len());

        for data in tools {
            created.push(insert_tool(&mut *tx, data, owner_id).await?);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Update the fields present in `data`
    pub async fn update(&self, id: i32, data: &UpdateTool) -> AppResult<Tool> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.description, "description");
        add_field!(data.category, "category");
        add_field!(data.condition, "condition");
        add_field!(data.image_url, "image_url");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE tools SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Tool>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.description);
        bind_field!(data.category);
        bind_field!(data.condition);
        bind_field!(data.image_url);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Tool not found".to_string()))
    }

    /// Delete a tool unless it has an active reservation
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i32> = sqlx::query_scalar("SELECT id FROM tools WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound("Tool not found".to_string()));
        }

        let reserved: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM reservations WHERE tool_id = $1 AND is_active = TRUE)",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if reserved {
            return Err(AppError::BusinessRule(
                "Cannot delete a tool with an active reservation".to_string(),
            ));
        }

        sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Count all tools
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tools")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count tools by availability: `(available, unavailable)`
    pub async fn count_by_availability(&self) -> AppResult<(i64, i64)> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE is_available = TRUE),
                COUNT(*) FILTER (WHERE is_available = FALSE)
            FROM tools
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }
}

/// Insert one tool row on a pool or inside an open transaction
pub(crate) async fn insert_tool<'e, E>(executor: E, data: &CreateTool, owner_id: i32) -> Result<Tool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, Tool>(
        r#"
        INSERT INTO tools (name, description, category, condition, image_url, owner_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.category)
    .bind(&data.condition)
    .bind(&data.image_url)
    .bind(owner_id)
    .fetch_one(executor)
    .await
}

/// Escape LIKE wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("drill"), "drill");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
