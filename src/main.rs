mod auth;
mod category;
mod db;
mod email;
mod error;
mod middleware;
mod notification;
mod routes;
mod state;
mod team;
mod todo;
mod user;

use db::{create_pool, run_migrations};
use routes::create_router;
use state::{AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,roki_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    // Create repositories
    let user_repository = user::user_repository::UserRepository::new(db.clone());
    let refresh_token_repository = auth::auth_repository::RefreshTokenRepository::new(db.clone());
    let todo_repository = todo::todo_repository::TodoRepository::new(db.clone());
    let category_repository = category::category_repository::CategoryRepository::new(db.clone());
    let notification_repository =
        notification::notification_repository::NotificationRepository::new(db.clone());
    let team_repository = team::team_repository::TeamRepository::new(db.clone());
    let email_repository = email::email_repository::EmailRepository::new(db.clone());

    // Create services
    let auth_service = auth::auth_service::AuthService::new(
        db.clone(),
        user_repository.clone(),
        refresh_token_repository.clone(),
        email_repository.clone(),
        config.jwt_secret.clone(),
    );
    let todo_service = todo::todo_service::TodoService::new(
        todo_repository.clone(),
        notification_repository.clone(),
        email_repository.clone(),
        user_repository.clone(),
    );
    let team_service = team::team_service::TeamService::new(db.clone(), team_repository.clone());

    // Create application state
    let state = AppState {
        config: config.clone(),
        user_repository,
        refresh_token_repository,
        todo_repository,
        category_repository,
        notification_repository,
        team_repository,
        email_repository,
        auth_service,
        todo_service,
        team_service,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
