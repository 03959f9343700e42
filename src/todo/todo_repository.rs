use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::todo_models::Todo;

#[derive(Clone)]
pub struct TodoRepository {
    pool: PgPool,
}

impl TodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Full per-user collection, newest first. Filtering and display sorting
    /// happen in memory over this result set.
    pub async fn find_all(&self, user_id: Uuid) -> Result<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(todo)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        description: &str,
        priority: &str,
        due_date: Option<DateTime<Utc>>,
        reminder_date: Option<DateTime<Utc>>,
        category_id: Option<Uuid>,
    ) -> Result<Todo> {
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (user_id, title, description, priority, due_date, reminder_date, category_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(due_date)
        .bind(reminder_date)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(todo)
    }

    /// Nullable columns take double-Option patches: an outer None leaves the
    /// column alone, Some(None) writes NULL so a due date, reminder or
    /// category link can be cleared.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        priority: Option<&str>,
        due_date: Option<Option<DateTime<Utc>>>,
        reminder_date: Option<Option<DateTime<Utc>>>,
        category_id: Option<Option<Uuid>>,
    ) -> Result<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            "UPDATE todos SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                priority = COALESCE($3, priority),
                due_date = CASE WHEN $4 THEN $5 ELSE due_date END,
                reminder_date = CASE WHEN $6 THEN $7 ELSE reminder_date END,
                category_id = CASE WHEN $8 THEN $9 ELSE category_id END,
                updated_at = NOW()
             WHERE id = $10 AND user_id = $11
             RETURNING *",
        )
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(due_date.is_some())
        .bind(due_date.flatten())
        .bind(reminder_date.is_some())
        .bind(reminder_date.flatten())
        .bind(category_id.is_some())
        .bind(category_id.flatten())
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    pub async fn set_completed(
        &self,
        id: Uuid,
        user_id: Uuid,
        completed: bool,
    ) -> Result<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            "UPDATE todos SET completed = $1, updated_at = NOW()
             WHERE id = $2 AND user_id = $3
             RETURNING *",
        )
        .bind(completed)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
