//! Application Layer
//!
//! Contains the mock backend's use cases and the client-side walkthrough.
//! Both depend on domain gateways (abstractions), not concrete implementations.

pub mod use_cases;
pub mod walkthrough;
