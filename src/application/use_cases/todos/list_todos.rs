//! List Todos Use Case
//!
//! Retrieves every todo, or only those matching the query filters.

use std::sync::Arc;

use crate::domain::gateways::TodoRepository;
use crate::domain::models::todo::{Todo, TodoQuery};
use crate::shared::errors::UseCaseError;

/// Use case for listing todos
pub struct ListTodosUseCase {
    todo_repository: Arc<dyn TodoRepository>,
}

impl ListTodosUseCase {
    /// Create a new ListTodosUseCase
    #[must_use]
    pub fn new(todo_repository: Arc<dyn TodoRepository>) -> Self {
        Self { todo_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if the store cannot be read.
    pub async fn execute(&self, query: &TodoQuery) -> Result<Vec<Todo>, UseCaseError> {
        tracing::debug!(?query, "Listing todos");

        let todos = if query.is_empty() {
            self.todo_repository.find_all().await?
        } else {
            self.todo_repository.find_matching(query).await?
        };

        tracing::debug!(count = todos.len(), "Found todos");
        Ok(todos)
    }
}
