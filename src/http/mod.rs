//! HTTP layer: routing, method dispatch, content types.
//!
//! # Data Flow
//! ```text
//! decrypted request (axum-server has already completed the TLS handshake)
//!     → server.rs (router: "/" and "/{*path}" → one dispatch handler)
//!     → handlers.rs (GET/HEAD → read path, PUT → upload path, else 405)
//!     → files layer (resolution, containment, filesystem I/O)
//! ```
//!
//! # Design Decisions
//! - Exactly one response per request on every code path, including failures
//! - Upload failures collapse to a bare 500; the typed cause is logged only
//! - Per-request timeout and trace middleware wrap the whole router

pub mod handlers;
pub mod mime;
pub mod server;

pub use server::HttpServer;
