//! Create Todo Use Case
//!
//! Appends a new todo to the collection.

use std::sync::Arc;

use crate::domain::gateways::TodoRepository;
use crate::domain::models::todo::{NewTodo, Todo};
use crate::shared::errors::UseCaseError;

/// Use case for creating a new todo
pub struct CreateTodoUseCase {
    todo_repository: Arc<dyn TodoRepository>,
}

impl CreateTodoUseCase {
    /// Create a new CreateTodoUseCase
    #[must_use]
    pub fn new(todo_repository: Arc<dyn TodoRepository>) -> Self {
        Self { todo_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if the store cannot be written.
    pub async fn execute(&self, data: NewTodo) -> Result<Todo, UseCaseError> {
        tracing::info!(
            todo_text = %data.todo_text,
            completed = data.completed,
            "Creating new todo"
        );

        let created = self.todo_repository.create(data).await?;

        tracing::info!(todo_id = %created.id, "Todo created successfully");
        Ok(created)
    }
}
