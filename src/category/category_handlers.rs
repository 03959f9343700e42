use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use super::{
    category_dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
    category_models::Category,
};
use crate::{
    error::{AppError, Result},
    middleware::auth::Session,
    state::AppState,
    todo::derived,
};

const DEFAULT_COLOR: &str = "#10b981";
const DEFAULT_ICON: &str = "folder";

/// List categories with their completed/total rollups
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = [CategoryResponse]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn get_categories(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<CategoryResponse>>> {
    let categories = state.category_repository.find_all(session.user_id).await?;
    let todos = state.todo_repository.find_all(session.user_id).await?;

    let rollup = derived::category_rollup(&categories, &todos);

    let responses = categories
        .into_iter()
        .zip(rollup)
        .map(|(category, progress)| CategoryResponse {
            category,
            completed: progress.completed,
            total: progress.total,
        })
        .collect();

    Ok(Json(responses))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation error")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = state
        .category_repository
        .create(
            session.user_id,
            &payload.name,
            payload.color.as_deref().unwrap_or(DEFAULT_COLOR),
            payload.icon.as_deref().unwrap_or(DEFAULT_ICON),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn update_category(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = state
        .category_repository
        .update(
            category_id,
            session.user_id,
            payload.name.as_deref(),
            payload.color.as_deref(),
            payload.icon.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

/// Delete a category; its todos are detached, not deleted
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode> {
    let rows_affected = state
        .category_repository
        .delete(category_id, session.user_id)
        .await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
