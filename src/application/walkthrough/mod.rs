//! Fetch Walkthrough
//!
//! Client side of the lesson: a fixed script of todo requests, logged with
//! timings, runnable either fully sequentially or with unawaited steps.

pub mod scenario;
pub mod step_log;

pub use scenario::{RunMode, Walkthrough, WalkthroughReport};
pub use step_log::{StepEntry, StepLog};
