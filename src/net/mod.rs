//! Network layer: listening socket and TLS transport setup.
//!
//! # Data Flow
//! ```text
//! startup
//!     → tls.rs (PEM cert + key → rustls ServerConfig, fatal on failure)
//!     → listener.rs (bind the socket before serving, fatal on failure)
//!     → axum-server (per-connection handshake, then hand off to HTTP layer)
//! ```
//!
//! # Design Decisions
//! - TLS material is validated before the socket starts accepting
//! - Failed handshakes are rejected at the transport layer and never
//!   produce an HTTP response
//! - No client certificates, no renegotiation, platform default ciphers

pub mod listener;
pub mod tls;
