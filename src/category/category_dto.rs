use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::category_models::Category;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// A category plus its completed/total todo rollup.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    #[serde(flatten)]
    pub category: Category,
    pub completed: usize,
    pub total: usize,
}
