use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::email_models::EmailNotification;

#[derive(Clone)]
pub struct EmailRepository {
    pool: PgPool,
}

impl EmailRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records an email to be delivered at `scheduled_for`. No delivery
    /// happens here.
    pub async fn schedule(
        &self,
        user_id: Uuid,
        todo_id: Option<Uuid>,
        email: &str,
        subject: &str,
        body: &str,
        scheduled_for: DateTime<Utc>,
    ) -> Result<EmailNotification> {
        let row = sqlx::query_as::<_, EmailNotification>(
            "INSERT INTO email_notifications (user_id, todo_id, email, subject, body, scheduled_for)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(user_id)
        .bind(todo_id)
        .bind(email)
        .bind(subject)
        .bind(body)
        .bind(scheduled_for)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
