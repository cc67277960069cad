//! API Middleware
//!
//! Request tagging and simulated network latency for the mock backend.

pub mod latency;
pub mod request_id;

pub use latency::simulated_latency;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
