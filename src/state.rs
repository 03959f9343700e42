use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub user_repository: crate::user::user_repository::UserRepository,
    pub refresh_token_repository: crate::auth::auth_repository::RefreshTokenRepository,
    pub todo_repository: crate::todo::todo_repository::TodoRepository,
    pub category_repository: crate::category::category_repository::CategoryRepository,
    pub notification_repository: crate::notification::notification_repository::NotificationRepository,
    pub team_repository: crate::team::team_repository::TeamRepository,
    pub email_repository: crate::email::email_repository::EmailRepository,
    pub auth_service: crate::auth::auth_service::AuthService,
    pub todo_service: crate::todo::todo_service::TodoService,
    pub team_service: crate::team::team_service::TeamService,
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
        }
    }
}
