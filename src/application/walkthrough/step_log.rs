//! Timed Step Log
//!
//! Every line of a walkthrough is prefixed with the milliseconds elapsed since
//! the run started, emitted through `tracing`, and kept in a transcript so the
//! ordering of requests and responses can be inspected afterwards.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;

use crate::shared::errors::ClientError;

/// One line of the transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepEntry {
    pub elapsed_ms: u128,
    pub message: String,
    /// Response body, or the error text for a failed step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl StepEntry {
    /// The line as printed, e.g. `12 ms.: request 1 -> creating new todo`
    #[must_use]
    pub fn timed(&self) -> String {
        timed_line(self.elapsed_ms, &self.message)
    }
}

fn timed_line(elapsed_ms: u128, message: &str) -> String {
    format!("{elapsed_ms} ms.: {message}")
}

/// Shared, append-only transcript of a run
#[derive(Debug)]
pub struct StepLog {
    started: Instant,
    entries: Mutex<Vec<StepEntry>>,
    failures: AtomicUsize,
}

impl StepLog {
    /// Start the clock
    #[must_use]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            entries: Mutex::new(Vec::new()),
            failures: AtomicUsize::new(0),
        }
    }

    /// Milliseconds since `start`
    #[must_use]
    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    /// Format a message with the current elapsed time
    #[must_use]
    pub fn timed_msg(&self, msg: &str) -> String {
        timed_line(self.elapsed_ms(), msg)
    }

    /// Record a plain line
    pub fn note(&self, message: impl Into<String>) {
        self.record(None, message.into(), None);
    }

    /// Record that a request was issued
    pub fn request(&self, label: &str, awaited: bool) {
        let suffix = if awaited { ", awaiting ..." } else { "" };
        self.record(Some(label), format!("request{label}{suffix}"), None);
    }

    /// Record the outcome of a request; returns whether it succeeded
    pub fn response<T: Serialize>(&self, label: &str, result: &Result<T, ClientError>) -> bool {
        match result {
            Ok(body) => {
                let payload =
                    serde_json::to_value(body).unwrap_or_else(|e| Value::String(e.to_string()));
                self.record(Some(label), format!("response{label}"), Some(payload));
                true
            }
            Err(err) => {
                self.failed(label, err);
                false
            }
        }
    }

    /// Record a fired step whose task died before its response was logged
    pub fn task_failed(&self, label: &str, reason: impl std::fmt::Display) {
        self.failed(label, reason);
    }

    /// Number of failed steps so far
    #[must_use]
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Snapshot of the transcript
    #[must_use]
    pub fn entries(&self) -> Vec<StepEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn failed(&self, label: &str, reason: impl std::fmt::Display) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(step = %label.trim(), error = %reason, "Step failed");
        self.record(
            Some(label),
            format!("response{label}"),
            Some(Value::String(reason.to_string())),
        );
    }

    fn record(&self, label: Option<&str>, message: String, payload: Option<Value>) {
        let entry = StepEntry {
            elapsed_ms: self.elapsed_ms(),
            message,
            payload,
        };

        let step = label.map(str::trim);
        match &entry.payload {
            Some(payload) => tracing::info!(
                elapsed_ms = %entry.elapsed_ms,
                step,
                %payload,
                "{}",
                entry.timed()
            ),
            None => tracing::info!(elapsed_ms = %entry.elapsed_ms, step, "{}", entry.timed()),
        }

        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}
