//! Patch Todo Use Case (PATCH)
//!
//! Updates only the fields present in the request.

use std::sync::Arc;

use crate::domain::gateways::TodoRepository;
use crate::domain::models::todo::{Todo, TodoId, TodoPatch};
use crate::shared::errors::UseCaseError;

/// Use case for partially updating a todo
pub struct PatchTodoUseCase {
    todo_repository: Arc<dyn TodoRepository>,
}

impl PatchTodoUseCase {
    /// Create a new PatchTodoUseCase
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
    pub async fn execute(&self, id: TodoId, data: TodoPatch) -> Result<Todo, UseCaseError> {
        tracing::info!(todo_id = %id, "Patching todo");

        let patched = self
            .todo_repository
            .patch(id, data)
            .await?
            .ok_or_else(|| UseCaseError::todo_not_found(id))?;

        tracing::info!(todo_id = %id, "Todo patched successfully");
        Ok(patched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::todos::test_support::MockTodoRepository;
    use crate::domain::models::todo::NewTodo;

    #[tokio::test]
    async fn should_keep_fields_missing_from_body() {
        let repo = Arc::new(MockTodoRepository::with_todos(vec![Todo::new(
            TodoId::new(3),
            NewTodo::new("third todo", false),
        )]));
        let use_case = PatchTodoUseCase::new(repo);

        let todo = use_case
            .execute(
                TodoId::new(3),
                TodoPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(todo.todo_text, "third todo");
        assert!(todo.completed);
    }

    #[tokio::test]
    async fn should_return_not_found_when_todo_does_not_exist() {
        let use_case = PatchTodoUseCase::new(Arc::new(MockTodoRepository::default()));

        let result = use_case.execute(TodoId::new(3), TodoPatch::default()).await;

        assert!(matches!(result.unwrap_err(), UseCaseError::NotFound { .. }));
    }
}
