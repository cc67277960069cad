//! Use Cases
//!
//! Application-specific rules of the mock backend.
//! Each use case is a single-purpose struct with an execute() method.

pub mod todos;

pub use todos::{
    CreateTodoUseCase, DeleteTodoUseCase, GetTodoByIdUseCase, ListTodosUseCase, PatchTodoUseCase,
    ReplaceTodoUseCase,
};
