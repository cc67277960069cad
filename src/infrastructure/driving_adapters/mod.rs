//! Driving Adapters
//!
//! Entry points that drive the application:
//! - HTTP REST API of the mock todo backend
//! - DTOs for request/response

pub mod api_rest;
