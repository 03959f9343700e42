use crate::{
    auth::auth_dto::*,
    auth::auth_handlers,
    category::category_dto::*,
    category::category_handlers,
    category::category_models::Category,
    email::email_dto::*,
    email::email_handlers,
    middleware::auth_middleware,
    notification::notification_dto::*,
    notification::notification_handlers,
    notification::notification_models::Notification,
    state::AppState,
    team::team_dto::*,
    team::team_handlers,
    team::team_models::{Role, Team, TeamMember, TeamMemberInfo},
    todo::derived::{DueLabel, TodoStats},
    todo::todo_dto::*,
    todo::todo_handlers,
    todo::todo_models::{Priority, Todo},
    user::user_models::UserResponse,
};
use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::refresh_token,
        auth_handlers::logout,
        auth_handlers::verify_email,
        auth_handlers::me,
        todo_handlers::get_todos,
        todo_handlers::get_stats,
        todo_handlers::get_calendar,
        todo_handlers::get_todo,
        todo_handlers::create_todo,
        todo_handlers::update_todo,
        todo_handlers::set_completed,
        todo_handlers::delete_todo,
        category_handlers::get_categories,
        category_handlers::create_category,
        category_handlers::update_category,
        category_handlers::delete_category,
        notification_handlers::get_notifications,
        notification_handlers::mark_notification_read,
        notification_handlers::mark_all_notifications_read,
        notification_handlers::delete_notification,
        team_handlers::get_teams,
        team_handlers::create_team,
        team_handlers::join_team,
        team_handlers::get_team_members,
        email_handlers::send_email,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            RefreshTokenRequest,
            RefreshTokenResponse,
            UserResponse,
            Todo,
            Priority,
            TodoResponse,
            TodoListResponse,
            CalendarResponse,
            TodoStats,
            DueLabel,
            CreateTodoRequest,
            UpdateTodoRequest,
            SetCompletedRequest,
            Category,
            CategoryResponse,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            Notification,
            NotificationListResponse,
            Team,
            TeamMember,
            TeamMemberInfo,
            TeamResponse,
            Role,
            CreateTeamRequest,
            JoinTeamRequest,
            SendEmailRequest,
            ReminderEmailData,
            SendEmailResponse,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "todos", description = "Todo management endpoints"),
        (name = "categories", description = "Category endpoints"),
        (name = "notifications", description = "Notification endpoints"),
        (name = "teams", description = "Team collaboration endpoints"),
        (name = "email", description = "Mail-queue endpoint")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/refresh", post(auth_handlers::refresh_token))
        .route("/logout", post(auth_handlers::logout))
        .route("/verify", get(auth_handlers::verify_email))
        .merge(
            Router::new()
                .route("/me", get(auth_handlers::me))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    // Protected routes (auth required)
    let todo_routes = Router::new()
        .route(
            "/",
            get(todo_handlers::get_todos).post(todo_handlers::create_todo),
        )
        .route("/stats", get(todo_handlers::get_stats))
        .route("/calendar", get(todo_handlers::get_calendar))
        .route(
            "/:id",
            get(todo_handlers::get_todo)
                .put(todo_handlers::update_todo)
                .delete(todo_handlers::delete_todo),
        )
        .route("/:id/complete", patch(todo_handlers::set_completed))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let category_routes = Router::new()
        .route(
            "/",
            get(category_handlers::get_categories).post(category_handlers::create_category),
        )
        .route(
            "/:id",
            axum::routing::put(category_handlers::update_category)
                .delete(category_handlers::delete_category),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let notification_routes = Router::new()
        .route("/", get(notification_handlers::get_notifications))
        .route(
            "/read-all",
            post(notification_handlers::mark_all_notifications_read),
        )
        .route(
            "/:id/read",
            patch(notification_handlers::mark_notification_read),
        )
        .route("/:id", delete(notification_handlers::delete_notification))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let team_routes = Router::new()
        .route(
            "/",
            get(team_handlers::get_teams).post(team_handlers::create_team),
        )
        .route("/join", post(team_handlers::join_team))
        .route("/:id/members", get(team_handlers::get_team_members))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // The mail-queue surface mirrors the original service: callers pass the
    // recipient in the body and the endpoint only records a row.
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/todos", todo_routes)
        .nest("/categories", category_routes)
        .nest("/notifications", notification_routes)
        .nest("/teams", team_routes)
        .route("/send-email", post(email_handlers::send_email));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}
