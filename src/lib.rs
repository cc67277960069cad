//! Todo Fetch Walkthrough
//!
//! A scripted REST client that contrasts sequential and concurrent request
//! ordering, plus the JSON-file-backed mock todo API it runs against.
//! Laid out following Clean/Hexagonal Architecture principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
