//! Listening socket setup.

use std::net::{SocketAddr, TcpListener};

use crate::error::ConfigError;

/// Bind the listening socket.
///
/// Binding happens before the server loop starts so that an occupied port or
/// denied address is reported as a startup failure, not a serve-time one. The
/// socket is switched to non-blocking mode for the async acceptor.
pub fn bind(addr: SocketAddr) -> Result<TcpListener, ConfigError> {
    let listener = TcpListener::bind(addr).map_err(|source| ConfigError::Bind { addr, source })?;
    listener
        .set_nonblocking(true)
        .map_err(|source| ConfigError::Bind { addr, source })?;

    tracing::info!(address = %addr, "listener bound");
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_ephemeral_port() {
        let listener = bind("127.0.0.1:0".parse().unwrap()).unwrap();
        assert!(listener.local_addr().unwrap().port() > 0);
    }

    #[test]
    fn occupied_port_is_reported() {
        let first = bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();
        assert!(matches!(bind(addr), Err(ConfigError::Bind { .. })));
    }
}
