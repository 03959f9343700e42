use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::derived::DueLabel;
use super::todo_models::Todo;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_date: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
}

/// Patch semantics for nullable columns: an absent field leaves the column
/// alone, an explicit null clears it.
fn patch_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTodoRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "patch_field")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "patch_field")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub reminder_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "patch_field")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetCompletedRequest {
    pub completed: bool,
}

/// A todo plus its derived due-date badge.
#[derive(Debug, Serialize, ToSchema)]
pub struct TodoResponse {
    #[serde(flatten)]
    pub todo: Todo,
    pub due_label: Option<DueLabel>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TodoListResponse {
    pub data: Vec<TodoResponse>,
    pub total: usize,
}

/// The selected day's todos plus every calendar day carrying a dated todo.
#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarResponse {
    pub date: NaiveDate,
    pub data: Vec<TodoResponse>,
    pub dates_with_todos: Vec<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::derived;

    #[test]
    fn test_update_patch_distinguishes_absent_from_null() {
        let req: UpdateTodoRequest = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(req.due_date, None);

        let req: UpdateTodoRequest = serde_json::from_str(r#"{"due_date":null}"#).unwrap();
        assert_eq!(req.due_date, Some(None));

        let req: UpdateTodoRequest =
            serde_json::from_str(r#"{"due_date":"2099-01-01T00:00:00Z"}"#).unwrap();
        assert!(matches!(req.due_date, Some(Some(_))));
    }

    #[test]
    fn test_patch_applies_to_all_nullable_fields() {
        let req: UpdateTodoRequest =
            serde_json::from_str(r#"{"reminder_date":null,"category_id":null}"#).unwrap();
        assert_eq!(req.reminder_date, Some(None));
        assert_eq!(req.category_id, Some(None));
        assert_eq!(req.due_date, None);
    }

    #[test]
    fn test_cleared_due_date_has_no_label() {
        // An edit that nulls the due date removes the badge entirely.
        let req: UpdateTodoRequest = serde_json::from_str(r#"{"due_date":null}"#).unwrap();
        let cleared = req.due_date.unwrap();
        assert_eq!(derived::due_label(cleared, Utc::now()), None);
    }
}
