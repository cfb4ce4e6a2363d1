//! TLS-terminated static file server with PUT uploads.
//!
//! # Architecture Overview
//!
//! ```text
//! Incoming TLS connection
//!     → net (listener bind, per-connection rustls handshake via axum-server)
//!     → http (method dispatch: GET/HEAD → read path, PUT → upload path)
//!     → files (shared path resolution + containment, filesystem reads/writes)
//!
//! Cross-cutting:
//!     config        CLI-supplied, validated once at startup
//!     error         typed startup and upload failures
//!     lifecycle     interrupt → graceful connection drain
//!     observability structured logging (tracing)
//! ```
//!
//! The served root is canonicalized at startup and every request path, read
//! or write, resolves through the same containment check in [`files::resolve`].
//! Upload failures collapse to a bare 500 on the wire; the typed cause is only
//! visible in the server logs.

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
