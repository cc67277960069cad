//! Get Todo By ID Use Case
//!
//! Retrieves a single todo by its ID.

use std::sync::Arc;

use crate::domain::gateways::TodoRepository;
use crate::domain::models::todo::{Todo, TodoId};
use crate::shared::errors::UseCaseError;

/// Use case for getting a todo by ID
pub struct GetTodoByIdUseCase {
    todo_repository: Arc<dyn TodoRepository>,
}

impl GetTodoByIdUseCase {
    /// Create a new GetTodoByIdUseCase
    #[must_use]
    pub fn new(todo_repository: Arc<dyn TodoRepository>) -> Self {
        Self { todo_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the todo doesn't exist.
    pub async fn execute(&self, id: TodoId) -> Result<Todo, UseCaseError> {
        tracing::debug!(todo_id = %id, "Getting todo by ID");

        self.todo_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::todo_not_found(id))
    }
}
