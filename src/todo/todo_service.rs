use chrono::Utc;
use uuid::Uuid;

use super::derived::{self, TodoStats};
use super::todo_dto::{CreateTodoRequest, UpdateTodoRequest};
use super::todo_models::Todo;
use super::todo_repository::TodoRepository;
use crate::email::email_repository::EmailRepository;
use crate::email::email_service;
use crate::error::{AppError, Result};
use crate::notification::notification_repository::NotificationRepository;
use crate::user::user_repository::UserRepository;

/// Service layer for todo business logic, including the reminder side
/// effects queued on creation.
#[derive(Clone)]
pub struct TodoService {
    repo: TodoRepository,
    notification_repo: NotificationRepository,
    email_repo: EmailRepository,
    user_repo: UserRepository,
}

impl TodoService {
    pub fn new(
        repo: TodoRepository,
        notification_repo: NotificationRepository,
        email_repo: EmailRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            repo,
            notification_repo,
            email_repo,
            user_repo,
        }
    }

    pub async fn list_todos(&self, user_id: Uuid) -> Result<Vec<Todo>> {
        self.repo.find_all(user_id).await
    }

    pub async fn get_todo(&self, user_id: Uuid, todo_id: Uuid) -> Result<Todo> {
        self.repo
            .find_by_id(todo_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Todo not found".into()))
    }

    pub async fn create_todo(&self, user_id: Uuid, payload: CreateTodoRequest) -> Result<Todo> {
        let priority = payload.priority.unwrap_or_else(|| "medium".to_string());

        let todo = self
            .repo
            .create(
                user_id,
                &payload.title,
                payload.description.as_deref().unwrap_or(""),
                &priority,
                payload.due_date,
                payload.reminder_date,
                payload.category_id,
            )
            .await?;

        if todo.reminder_date.is_some() {
            self.queue_reminder(&todo).await;
        }

        Ok(todo)
    }

    /// Queues the reminder notification row and the email-queue row. Both
    /// are best-effort and independent; a failure is logged and swallowed so
    /// it never fails the todo write.
    async fn queue_reminder(&self, todo: &Todo) {
        let Some(reminder_date) = todo.reminder_date else {
            return;
        };

        let message = if todo.description.is_empty() {
            "You have a task due soon!".to_string()
        } else {
            todo.description.clone()
        };

        if let Err(e) = self
            .notification_repo
            .create(
                todo.user_id,
                &format!("Reminder: {}", todo.title),
                &message,
                "reminder",
                Some(reminder_date),
                Some(todo.id),
            )
            .await
        {
            tracing::error!("Failed to create reminder notification: {:?}", e);
        }

        let user = match self.user_repo.find_by_id(todo.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::error!("Reminder email skipped: user {} not found", todo.user_id);
                return;
            }
            Err(e) => {
                tracing::error!("Reminder email skipped: {:?}", e);
                return;
            }
        };

        let email = email_service::generate_reminder_email(
            &todo.title,
            reminder_date,
            user.display_name(),
        );

        if let Err(e) = self
            .email_repo
            .schedule(
                user.id,
                Some(todo.id),
                &user.email,
                &email.subject,
                &email.body,
                reminder_date,
            )
            .await
        {
            tracing::error!("Failed to schedule email notification: {:?}", e);
        }
    }

    pub async fn update_todo(
        &self,
        user_id: Uuid,
        todo_id: Uuid,
        payload: UpdateTodoRequest,
    ) -> Result<Todo> {
        self.repo
            .update(
                todo_id,
                user_id,
                payload.title.as_deref(),
                payload.description.as_deref(),
                payload.priority.as_deref(),
                payload.due_date,
                payload.reminder_date,
                payload.category_id,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Todo not found".into()))
    }

    pub async fn set_completed(
        &self,
        user_id: Uuid,
        todo_id: Uuid,
        completed: bool,
    ) -> Result<Todo> {
        self.repo
            .set_completed(todo_id, user_id, completed)
            .await?
            .ok_or_else(|| AppError::NotFound("Todo not found".into()))
    }

    pub async fn delete_todo(&self, user_id: Uuid, todo_id: Uuid) -> Result<u64> {
        self.repo.delete(todo_id, user_id).await
    }

    pub async fn stats(&self, user_id: Uuid) -> Result<TodoStats> {
        let todos = self.repo.find_all(user_id).await?;
        Ok(derived::compute_stats(&todos, Utc::now()))
    }
}
