use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use super::auth_dto::{
    AuthResponse, LoginRequest, RefreshTokenRequest, RefreshTokenResponse, RegisterRequest,
    VerifyEmailParams,
};
use crate::{
    error::{AppError, Result},
    middleware::auth::Session,
    state::AppState,
    user::user_models::UserResponse,
};

/// Maps a unique-constraint violation on the users table to a client error;
/// anything else passes through unchanged.
fn map_registration_error(e: AppError) -> AppError {
    if let AppError::Database(sqlx::Error::Database(ref db_err)) = e {
        if db_err.is_unique_violation() {
            return AppError::BadRequest("User already exists".to_string());
        }
    }
    e
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (user, access_token, refresh_token) = state
        .auth_service
        .register(&payload.email, &payload.password, &payload.full_name)
        .await
        .map_err(map_registration_error)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token,
            refresh_token,
            user: user.into(),
        }),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (user, access_token, refresh_token) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: user.into(),
    }))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = RefreshTokenResponse),
        (status = 401, description = "Invalid refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<Json<RefreshTokenResponse>> {
    let (access_token, refresh_token) = state
        .auth_service
        .refresh_access_token(&payload.refresh_token)
        .await?;

    Ok(Json(RefreshTokenResponse {
        access_token,
        refresh_token,
    }))
}

/// Revoke a refresh token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = RefreshTokenRequest,
    responses(
        (status = 204, description = "Logged out")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<StatusCode> {
    state.auth_service.logout(&payload.refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Email-link verification callback
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    params(
        ("token_hash" = String, Query, description = "Verification token from the email link"),
        ("type" = String, Query, description = "Token type, e.g. email")
    ),
    responses(
        (status = 200, description = "Email verified", body = UserResponse),
        (status = 404, description = "Token not found or already used")
    ),
    tag = "auth"
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(params): Query<VerifyEmailParams>,
) -> Result<Json<UserResponse>> {
    let user = state
        .auth_service
        .verify_email(&params.token_hash, &params.token_type)
        .await?;

    Ok(Json(user.into()))
}

/// Current authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<UserResponse>> {
    let user = state.auth_service.current_user(session.user_id).await?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug)]
    struct DuplicateEmail;

    impl std::fmt::Display for DuplicateEmail {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "duplicate key value violates unique constraint")
        }
    }

    impl std::error::Error for DuplicateEmail {}

    impl DatabaseError for DuplicateEmail {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn test_unique_violation_becomes_user_already_exists() {
        let err = AppError::Database(sqlx::Error::Database(Box::new(DuplicateEmail)));
        assert!(matches!(
            map_registration_error(err),
            AppError::BadRequest(msg) if msg == "User already exists"
        ));
    }

    #[test]
    fn test_other_database_errors_pass_through() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert!(matches!(
            map_registration_error(err),
            AppError::Database(sqlx::Error::RowNotFound)
        ));
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = AppError::Validation("email is invalid".to_string());
        assert!(matches!(map_registration_error(err), AppError::Validation(_)));
    }
}
