//! HTTP Handlers

pub mod todos;
