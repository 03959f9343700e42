use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A queued email row. This service only records intent; delivery belongs to
/// an external worker.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailNotification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub todo_id: Option<Uuid>,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub scheduled_for: DateTime<Utc>,
    pub sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
