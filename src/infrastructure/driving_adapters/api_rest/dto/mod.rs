//! Data Transfer Objects
//!
//! Request and response DTOs for the REST API.

pub mod todo;

pub use todo::{CreateTodoDto, PatchTodoDto, ReplaceTodoDto, TodoQueryDto, TodoResponseDto};
