//! Simulated Latency Middleware
//!
//! Delays each request by a random amount up to `server.max_latency_ms`, so
//! responses to concurrently fired requests come back out of order even on
//! a fast local machine.

use std::time::Duration;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use rand::Rng;

use crate::infrastructure::driving_adapters::api_rest::AppState;

/// Pick a delay in `[0, max_ms]`; zero when disabled
#[must_use]
pub fn pick_delay(max_ms: u64) -> Duration {
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
}

/// Middleware that sleeps before handing the request on
pub async fn simulated_latency(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let delay = pick_delay(state.config.max_latency_ms);

    if !delay.is_zero() {
        tracing::debug!(delay_ms = delay.as_millis(), "Delaying request");
        tokio::time::sleep(delay).await;
    }

    next.run(request).await
}
