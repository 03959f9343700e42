use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{
    feed::{self, NotificationFilter},
    notification_dto::NotificationListResponse,
    notification_models::Notification,
};
use crate::{
    error::{AppError, Result},
    middleware::auth::Session,
    state::AppState,
};

#[derive(Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    filter: NotificationFilter,
}

fn list_response(
    items: Vec<Notification>,
    filter: NotificationFilter,
) -> NotificationListResponse {
    let counts = feed::counts(&items);
    NotificationListResponse {
        data: feed::project(items, filter),
        total: counts.total,
        unread_count: counts.unread,
        read_count: counts.read,
    }
}

/// List notifications, newest first, with derived counts
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(
        ("filter" = Option<String>, Query, description = "Projection: all, unread or read")
    ),
    responses(
        (status = 200, description = "Notification feed", body = NotificationListResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<NotificationListResponse>> {
    let items = state
        .notification_repository
        .find_all_by_user(session.user_id)
        .await?;

    Ok(Json(list_response(items, query.filter)))
}

/// Mark one notification read (idempotent)
#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification updated", body = Notification),
        (status = 404, description = "Not found")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<Notification>> {
    let notification = state
        .notification_repository
        .mark_as_read(notification_id, session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

    Ok(Json(notification))
}

/// Mark every unread notification read in one logical operation
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    responses(
        (status = 200, description = "All notifications read", body = NotificationListResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<NotificationListResponse>> {
    // Fetch the working set first, then write once and apply the same
    // transition locally. On write failure the local set is discarded with
    // the error.
    let mut items = state
        .notification_repository
        .find_all_by_user(session.user_id)
        .await?;

    state
        .notification_repository
        .mark_all_as_read(session.user_id)
        .await?;

    feed::mark_all_read(&mut items);

    Ok(Json(list_response(items, NotificationFilter::All)))
}

/// Delete a notification regardless of its read state
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 404, description = "Not found")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(notification_id): Path<Uuid>,
) -> Result<StatusCode> {
    let rows_affected = state
        .notification_repository
        .delete(notification_id, session.user_id)
        .await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Notification not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
