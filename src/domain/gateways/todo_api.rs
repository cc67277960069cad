//! Todo API Gateway
//!
//! Client-side contract for the todo REST routes. The walkthrough only
//! talks to the backend through this trait.

use async_trait::async_trait;

use crate::domain::models::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoQuery, TodoReplacement};
use crate::shared::errors::ClientError;

/// Remote todo collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// GET /todos
    async fn list(&self) -> Result<Vec<Todo>, ClientError>;

    /// POST /todos
    async fn create(&self, todo: NewTodo) -> Result<Todo, ClientError>;

    /// GET /todos/:id
    async fn get(&self, id: TodoId) -> Result<Todo, ClientError>;

    /// GET /todos?id=&todoText=&completed=
    async fn query(&self, query: TodoQuery) -> Result<Vec<Todo>, ClientError>;

    /// PUT /todos/:id
    async fn replace(&self, id: TodoId, todo: TodoReplacement) -> Result<Todo, ClientError>;

    /// PATCH /todos/:id
    async fn patch(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, ClientError>;

    /// DELETE /todos/:id
    ///
    /// The backend answers with an empty object, which is passed through as-is.
    async fn delete(&self, id: TodoId) -> Result<serde_json::Value, ClientError>;
}
