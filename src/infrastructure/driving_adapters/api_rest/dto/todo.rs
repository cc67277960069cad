//! Todo DTOs
//!
//! Data transfer objects for todo API endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoQuery, TodoReplacement};

/// DTO for creating a new todo (POST)
///
/// Missing fields default the way json-server stores them: empty text, not completed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoDto {
    #[serde(default)]
    #[validate(length(max = 1000, message = "todoText must be at most 1000 characters"))]
    pub todo_text: String,

    #[serde(default)]
    pub completed: bool,
}

impl From<CreateTodoDto> for NewTodo {
    fn from(dto: CreateTodoDto) -> Self {
        Self {
            todo_text: dto.todo_text,
            completed: dto.completed,
        }
    }
}

/// DTO for full todo replacement (PUT)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceTodoDto {
    #[validate(length(max = 1000, message = "todoText must be at most 1000 characters"))]
    pub todo_text: Option<String>,

    pub completed: Option<bool>,
}

impl From<ReplaceTodoDto> for TodoReplacement {
    fn from(dto: ReplaceTodoDto) -> Self {
        Self {
            todo_text: dto.todo_text,
            completed: dto.completed,
        }
    }
}

/// DTO for partial todo update (PATCH)
///
/// Only provided fields will be updated.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatchTodoDto {
    #[validate(length(max = 1000, message = "todoText must be at most 1000 characters"))]
    pub todo_text: Option<String>,

    pub completed: Option<bool>,
}

impl From<PatchTodoDto> for TodoPatch {
    fn from(dto: PatchTodoDto) -> Self {
        Self {
            todo_text: dto.todo_text,
            completed: dto.completed,
        }
    }
}

/// Query string filters for GET /todos
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoQueryDto {
    pub id: Option<u64>,
    pub todo_text: Option<String>,
    pub completed: Option<bool>,
}

impl From<TodoQueryDto> for TodoQuery {
    fn from(dto: TodoQueryDto) -> Self {
        Self {
            id: dto.id.map(TodoId::new),
            todo_text: dto.todo_text,
            completed: dto.completed,
        }
    }
}

/// Todo response DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponseDto {
    pub id: u64,
    pub todo_text: String,
    pub completed: bool,
}

impl From<Todo> for TodoResponseDto {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.value(),
            todo_text: todo.todo_text,
            completed: todo.completed,
        }
    }
}
