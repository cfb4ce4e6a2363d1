//! TLS configuration and certificate loading.

use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use rustls::ServerConfig;

use crate::error::ConfigError;

/// Load TLS configuration from PEM-encoded certificate and key files.
///
/// Both files are read and parsed up front so that a bad path, unreadable
/// file, or rejected cert/key pair aborts startup instead of surfacing on
/// the first connection.
pub fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, ConfigError> {
    let cert_pem = std::fs::read(cert_path).map_err(|source| ConfigError::TlsRead {
        path: cert_path.to_path_buf(),
        source,
    })?;
    let key_pem = std::fs::read(key_path).map_err(|source| ConfigError::TlsRead {
        path: key_path.to_path_buf(),
        source,
    })?;

    let config = build_server_config(&cert_pem, &key_pem)?;
    Ok(RustlsConfig::from_config(Arc::new(config)))
}

/// Build a [`rustls::ServerConfig`] from PEM-encoded certificate and key bytes.
pub fn build_server_config(cert_pem: &[u8], key_pem: &[u8]) -> Result<ServerConfig, ConfigError> {
    let certs = rustls_pemfile::certs(&mut BufReader::new(cert_pem))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ConfigError::TlsInvalid(format!("failed to parse certificate chain: {err}")))?;
    if certs.is_empty() {
        return Err(ConfigError::TlsInvalid(
            "no certificate found in PEM data".to_string(),
        ));
    }

    let key = rustls_pemfile::private_key(&mut BufReader::new(key_pem))
        .map_err(|err| ConfigError::TlsInvalid(format!("failed to parse private key: {err}")))?
        .ok_or_else(|| ConfigError::TlsInvalid("no private key found in PEM data".to_string()))?;

    let mut config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|err| ConfigError::TlsInvalid(err.to_string()))?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_pem() {
        assert!(build_server_config(b"", b"").is_err());
    }

    #[test]
    fn rejects_garbage_pem() {
        assert!(build_server_config(b"not a pem", b"also not a pem").is_err());
    }

    #[test]
    fn accepts_generated_cert_and_key() {
        let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let cert_pem = certified.cert.pem();
        let key_pem = certified.key_pair.serialize_pem();
        assert!(build_server_config(cert_pem.as_bytes(), key_pem.as_bytes()).is_ok());
    }

    #[test]
    fn missing_cert_file_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("absent.pem");
        let result = load_tls_config(&missing, &missing);
        assert!(matches!(result, Err(ConfigError::TlsRead { .. })));
    }
}
