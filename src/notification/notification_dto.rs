use serde::Serialize;
use utoipa::ToSchema;

use super::notification_models::Notification;

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationListResponse {
    pub data: Vec<Notification>,
    pub total: usize,
    pub unread_count: usize,
    pub read_count: usize,
}
