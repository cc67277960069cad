//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - JSON file todo store (mock backend)
//! - HTTP todo client (walkthrough)
//! - Configuration

pub mod config;
pub mod todo_client;
pub mod todo_repository;

pub use config::AppConfig;
pub use todo_client::HttpTodoClient;
pub use todo_repository::JsonFileTodoRepository;
