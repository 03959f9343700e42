use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

use super::category_models::Category;

#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, user_id: Uuid) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        color: &str,
        icon: &str,
    ) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (user_id, name, color, icon)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(user_id)
        .bind(name)
        .bind(color)
        .bind(icon)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        name: Option<&str>,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET
                name = COALESCE($1, name),
                color = COALESCE($2, color),
                icon = COALESCE($3, icon)
             WHERE id = $4 AND user_id = $5
             RETURNING *",
        )
        .bind(name)
        .bind(color)
        .bind(icon)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Deleting a category detaches its todos (ON DELETE SET NULL), it never
    /// cascades into them.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
