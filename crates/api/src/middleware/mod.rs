//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Failure alert (turn rejected requests into alert headers)

pub mod failure_alert;
pub mod request_id;

pub use failure_alert::failure_alert_middleware;
pub use request_id::request_id_middleware;
