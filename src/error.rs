//! Typed errors for startup and the upload path.
//!
//! Startup failures ([`ConfigError`]) are fatal: the process reports the cause
//! and never begins listening. Upload failures ([`UploadError`]) are caught at
//! the handler boundary and collapse to a single 500 response; the variant is
//! only used for server-side logging and tests.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::files::resolve::ResolveError;

/// Fatal configuration or startup error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bind address could not be resolved to a socket address.
    #[error("invalid bind address {addr:?}: {source}")]
    BindAddress {
        addr: String,
        source: std::io::Error,
    },

    /// The bind address resolved to nothing.
    #[error("bind address {addr:?} did not resolve to any socket address")]
    BindAddressUnresolved { addr: String },

    /// The served root does not exist or is not accessible.
    #[error("served root {path:?} is not usable: {source}")]
    Root {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The served root exists but is not a directory.
    #[error("served root {path:?} is not a directory")]
    RootNotDirectory { path: PathBuf },

    /// TLS certificate or key file could not be read.
    #[error("cannot read TLS material {path:?}: {source}")]
    TlsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// TLS material was readable but rejected (empty, garbage, or mismatched).
    #[error("invalid TLS certificate or key: {0}")]
    TlsInvalid(String),

    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
}

/// Failure on the upload path. Every variant maps to 500 on the wire.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request path failed traversal-safe resolution.
    #[error(transparent)]
    PathResolution(#[from] ResolveError),

    /// The body ended before the declared `Content-Length` was received.
    #[error("request body ended after {received} of {expected} bytes")]
    ShortRead { expected: u64, received: u64 },

    /// The body stream itself failed mid-read.
    #[error("failed reading request body: {0}")]
    Body(axum::Error),

    /// Opening or writing the target file failed.
    #[error("failed writing upload target: {0}")]
    Io(#[from] std::io::Error),
}
