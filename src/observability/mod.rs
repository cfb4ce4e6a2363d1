//! Observability.
//!
//! Structured logging via `tracing`; request-level events come from the
//! router's `TraceLayer`, handler-level events carry the request path and
//! the typed failure cause. There is no metrics endpoint.

pub mod logging;
