//! Server configuration schema and validation.
//!
//! # Design Decisions
//! - Configuration is supplied by the CLI once at startup and is immutable
//!   afterwards; there is no file or environment configuration surface.
//! - Syntactic checks happen at argument parsing; semantic checks (address
//!   resolution, root directory existence) happen here, before anything binds.
//! - The served root is canonicalized exactly once so that every later
//!   containment check compares against a stable absolute path.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Root configuration for the file server.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, port).
    pub listener: ListenerConfig,

    /// TLS certificate and key locations.
    pub tls: TlsConfig,

    /// Served root directory.
    pub files: FileConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Address to bind (e.g. "0.0.0.0" or "::1").
    pub bind_address: String,

    /// Listening port.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8443,
        }
    }
}

impl ListenerConfig {
    /// Resolve the configured address and port to a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        (self.bind_address.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| ConfigError::BindAddress {
                addr: self.bind_address.clone(),
                source,
            })?
            .next()
            .ok_or_else(|| ConfigError::BindAddressUnresolved {
                addr: self.bind_address.clone(),
            })
    }
}

/// TLS material locations for the listener.
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

/// Served directory configuration.
#[derive(Debug, Clone)]
pub struct FileConfig {
    /// Directory request paths resolve against. Uploads land under it too.
    pub root: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl FileConfig {
    /// Validate the served root and return its canonical absolute form.
    pub fn canonical_root(&self) -> Result<PathBuf, ConfigError> {
        let metadata = std::fs::metadata(&self.root).map_err(|source| ConfigError::Root {
            path: self.root.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(ConfigError::RootNotDirectory {
                path: self.root.clone(),
            });
        }
        self.root.canonicalize().map_err(|source| ConfigError::Root {
            path: self.root.clone(),
            source,
        })
    }
}

/// Timeout configuration.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Per-request deadline in seconds, covering body read and response write.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}
