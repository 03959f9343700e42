use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Envelope for the mail-queue endpoint. `data`'s shape depends on `type`,
/// so it stays untyped until the type is matched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendEmailRequest {
    #[serde(rename = "type")]
    pub email_type: String,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderEmailData {
    pub task_title: String,
    pub due_date: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
    pub user_id: Uuid,
    pub todo_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SendEmailResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
