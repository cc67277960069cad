//! Domain Models
//!
//! Pure domain entities and value objects representing business concepts.

pub mod todo;

pub use todo::{NewTodo, Todo, TodoId, TodoPatch, TodoQuery, TodoReplacement};
