use axum::{extract::State, http::StatusCode, Json};

use super::{
    email_dto::{ReminderEmailData, SendEmailRequest, SendEmailResponse},
    email_service,
};
use crate::state::AppState;

fn success() -> (StatusCode, Json<SendEmailResponse>) {
    (
        StatusCode::OK,
        Json(SendEmailResponse {
            success: true,
            error: None,
        }),
    )
}

fn failure(status: StatusCode, error: &str) -> (StatusCode, Json<SendEmailResponse>) {
    (
        status,
        Json(SendEmailResponse {
            success: false,
            error: Some(error.to_string()),
        }),
    )
}

/// Queue an email notification row. This is the service's only wire surface
/// for mail; it records intent and performs no delivery.
#[utoipa::path(
    post,
    path = "/api/send-email",
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email queued", body = SendEmailResponse),
        (status = 400, description = "Unrecognized email type", body = SendEmailResponse),
        (status = 500, description = "Internal failure", body = SendEmailResponse)
    ),
    tag = "email"
)]
pub async fn send_email(
    State(state): State<AppState>,
    Json(payload): Json<SendEmailRequest>,
) -> (StatusCode, Json<SendEmailResponse>) {
    match payload.email_type.as_str() {
        "reminder" => {
            let data: ReminderEmailData = match serde_json::from_value(payload.data) {
                Ok(data) => data,
                Err(e) => {
                    return failure(StatusCode::BAD_REQUEST, &format!("Invalid payload: {e}"));
                }
            };

            let email = email_service::generate_reminder_email(
                &data.task_title,
                data.due_date,
                &data.user_name,
            );

            match state
                .email_repository
                .schedule(
                    data.user_id,
                    data.todo_id,
                    &data.user_email,
                    &email.subject,
                    &email.body,
                    data.due_date,
                )
                .await
            {
                Ok(_) => success(),
                Err(e) => {
                    tracing::error!("Failed to queue email notification: {:?}", e);
                    failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            }
        }
        _ => failure(StatusCode::BAD_REQUEST, "Invalid email type"),
    }
}
