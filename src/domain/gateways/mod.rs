//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! These are implemented by driven adapters in the infrastructure layer.

pub mod todo_api;
pub mod todo_repository;

pub use todo_api::TodoApi;
pub use todo_repository::TodoRepository;
