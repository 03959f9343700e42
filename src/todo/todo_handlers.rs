use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{
    derived::{self, TodoStats},
    todo_dto::{
        CalendarResponse, CreateTodoRequest, SetCompletedRequest, TodoListResponse, TodoResponse,
        UpdateTodoRequest,
    },
    todo_models::Todo,
};
use crate::{
    error::{AppError, Result},
    middleware::auth::Session,
    state::AppState,
};

#[derive(Deserialize)]
pub struct TodoFilters {
    completed: Option<bool>,
    category_id: Option<Uuid>,
}

fn to_responses(todos: Vec<Todo>) -> Vec<TodoResponse> {
    let now = Utc::now();
    todos
        .into_iter()
        .map(|todo| TodoResponse {
            due_label: derived::due_label(todo.due_date, now),
            todo,
        })
        .collect()
}

/// List the authenticated user's todos in display order
#[utoipa::path(
    get,
    path = "/api/todos",
    params(
        ("completed" = Option<bool>, Query, description = "Filter by completion state"),
        ("category_id" = Option<Uuid>, Query, description = "Filter by category")
    ),
    responses(
        (status = 200, description = "List of todos", body = TodoListResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "todos",
    security(("bearer_auth" = []))
)]
pub async fn get_todos(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(filters): Query<TodoFilters>,
) -> Result<Json<TodoListResponse>> {
    let mut todos = state.todo_service.list_todos(session.user_id).await?;

    if let Some(completed) = filters.completed {
        todos.retain(|t| t.completed == completed);
    }
    if let Some(category_id) = filters.category_id {
        todos.retain(|t| t.category_id == Some(category_id));
    }

    derived::sort_for_display(&mut todos);

    let total = todos.len();
    Ok(Json(TodoListResponse {
        data: to_responses(todos),
        total,
    }))
}

/// Dashboard aggregates for the authenticated user's todos
#[utoipa::path(
    get,
    path = "/api/todos/stats",
    responses(
        (status = 200, description = "Derived todo statistics", body = TodoStats),
        (status = 401, description = "Unauthorized")
    ),
    tag = "todos",
    security(("bearer_auth" = []))
)]
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<TodoStats>> {
    let stats = state.todo_service.stats(session.user_id).await?;
    Ok(Json(stats))
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    date: Option<NaiveDate>,
}

/// Calendar projection: the selected day's todos plus the days that carry any
#[utoipa::path(
    get,
    path = "/api/todos/calendar",
    params(
        ("date" = Option<String>, Query, description = "Calendar day (YYYY-MM-DD); defaults to today")
    ),
    responses(
        (status = 200, description = "Todos for the selected day", body = CalendarResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "todos",
    security(("bearer_auth" = []))
)]
pub async fn get_calendar(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>> {
    let todos = state.todo_service.list_todos(session.user_id).await?;

    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let dates_with_todos = derived::dates_with_todos(&todos);

    let mut on_day = derived::todos_on_day(todos, date);
    derived::sort_for_display(&mut on_day);

    Ok(Json(CalendarResponse {
        date,
        data: to_responses(on_day),
        dates_with_todos,
    }))
}

/// Get a single todo
#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The todo", body = TodoResponse),
        (status = 404, description = "Not found")
    ),
    tag = "todos",
    security(("bearer_auth" = []))
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(todo_id): Path<Uuid>,
) -> Result<Json<TodoResponse>> {
    let todo = state.todo_service.get_todo(session.user_id, todo_id).await?;
    Ok(Json(TodoResponse {
        due_label: derived::due_label(todo.due_date, Utc::now()),
        todo,
    }))
}

/// Create a todo; a reminder date also queues a notification and an email
#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Validation error")
    ),
    tag = "todos",
    security(("bearer_auth" = []))
)]
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<CreateTodoRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let todo = state
        .todo_service
        .create_todo(session.user_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(todo)))
}

/// Update a todo
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo id")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 404, description = "Not found")
    ),
    tag = "todos",
    security(("bearer_auth" = []))
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(todo_id): Path<Uuid>,
    Json(payload): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let todo = state
        .todo_service
        .update_todo(session.user_id, todo_id, payload)
        .await?;

    Ok(Json(todo))
}

/// Toggle completion state
#[utoipa::path(
    patch,
    path = "/api/todos/{id}/complete",
    params(("id" = Uuid, Path, description = "Todo id")),
    request_body = SetCompletedRequest,
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 404, description = "Not found")
    ),
    tag = "todos",
    security(("bearer_auth" = []))
)]
pub async fn set_completed(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(todo_id): Path<Uuid>,
    Json(payload): Json<SetCompletedRequest>,
) -> Result<Json<Todo>> {
    let todo = state
        .todo_service
        .set_completed(session.user_id, todo_id, payload.completed)
        .await?;

    Ok(Json(todo))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo id")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 404, description = "Not found")
    ),
    tag = "todos",
    security(("bearer_auth" = []))
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(todo_id): Path<Uuid>,
) -> Result<StatusCode> {
    let rows_affected = state
        .todo_service
        .delete_todo(session.user_id, todo_id)
        .await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Todo not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
