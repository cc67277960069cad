//! Delete Todo Use Case
//!
//! Removes a todo from the collection.

use std::sync::Arc;

use crate::domain::gateways::TodoRepository;
use crate::domain::models::todo::TodoId;
use crate::shared::errors::UseCaseError;

/// Use case for deleting a todo
pub struct DeleteTodoUseCase {
    todo_repository: Arc<dyn TodoRepository>,
}

impl DeleteTodoUseCase {
    /// Create a new DeleteTodoUseCase
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
    pub async fn execute(&self, id: TodoId) -> Result<(), UseCaseError> {
        tracing::info!(todo_id = %id, "Deleting todo");

        if !self.todo_repository.delete(id).await? {
            tracing::warn!(todo_id = %id, "Todo not found for deletion");
            return Err(UseCaseError::todo_not_found(id));
        }

        tracing::info!(todo_id = %id, "Todo deleted successfully");
        Ok(())
    }
}
