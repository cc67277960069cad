//! Replace Todo Use Case (PUT)
//!
//! Replaces every field of a todo except its id.

use std::sync::Arc;

use crate::domain::gateways::TodoRepository;
use crate::domain::models::todo::{Todo, TodoId, TodoReplacement};
use crate::shared::errors::UseCaseError;

/// Use case for fully replacing a todo
pub struct ReplaceTodoUseCase {
    todo_repository: Arc<dyn TodoRepository>,
}

impl ReplaceTodoUseCase {
    /// Create a new ReplaceTodoUseCase
    #[must_use]
    pub fn new(todo_repository: Arc<dyn TodoRepository>) -> Self {
        Self { todo_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the todo doesn't exist.
    /// Returns `UseCaseError::Repository` if the store cannot be written.
    pub async fn execute(&self, id: TodoId, data: TodoReplacement) -> Result<Todo, UseCaseError> {
        tracing::info!(todo_id = %id, "Replacing todo");

        let replaced = self
            .todo_repository
            .replace(id, data)
            .await?
            .ok_or_else(|| UseCaseError::todo_not_found(id))?;

        tracing::info!(todo_id = %id, "Todo replaced successfully");
        Ok(replaced)
    }
}
