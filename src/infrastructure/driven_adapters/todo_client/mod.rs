//! Todo API Client Implementations

pub mod http;

pub use http::HttpTodoClient;
