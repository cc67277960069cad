//! Infrastructure Layer
//!
//! Contains all external concerns: driving adapters (the mock backend's HTTP
//! handlers) and driven adapters (the JSON file store, the HTTP todo client,
//! configuration).

pub mod driven_adapters;
pub mod driving_adapters;
