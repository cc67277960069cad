//! Domain Layer
//!
//! Contains the todo model and the gateway traits (ports) that the
//! walkthrough and the mock backend are written against.
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;

pub use gateways::{TodoApi, TodoRepository};
pub use models::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoQuery, TodoReplacement};
