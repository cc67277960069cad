//! Todo Repository Gateway
//!
//! Abstract trait defining the contract for todo persistence in the mock backend.

use async_trait::async_trait;

use crate::domain::models::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoQuery, TodoReplacement};
use crate::shared::errors::RepositoryError;

/// Repository trait for Todo persistence operations
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos in insertion order
    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError>;

    /// Todos matching every filter in the query, in insertion order
    async fn find_matching(&self, query: &TodoQuery) -> Result<Vec<Todo>, RepositoryError>;

    /// Find a todo by its ID
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError>;

    /// Insert a new todo, assigning the next free id
    async fn create(&self, data: NewTodo) -> Result<Todo, RepositoryError>;

    /// Replace a todo; `None` when the id is unknown
    async fn replace(
        &self,
        id: TodoId,
        data: TodoReplacement,
    ) -> Result<Option<Todo>, RepositoryError>;

    /// Patch a todo; `None` when the id is unknown
    async fn patch(&self, id: TodoId, data: TodoPatch) -> Result<Option<Todo>, RepositoryError>;

    /// Remove a todo; `false` when the id is unknown
    async fn delete(&self, id: TodoId) -> Result<bool, RepositoryError>;
}
