//! filegate: TLS-terminated static file server with PUT uploads.

use std::path::PathBuf;

use clap::Parser;

use filegate::config::{FileConfig, ListenerConfig, ServerConfig, TimeoutConfig, TlsConfig};
use filegate::http::HttpServer;
use filegate::{net, observability};

/// CLI arguments. Everything else about the server is derived from these.
#[derive(Parser, Debug)]
#[command(name = "filegate", version, about = "TLS-terminated static file server with PUT uploads")]
struct Args {
    /// Address to bind
    #[arg(short = 'b', long, default_value = "0.0.0.0", value_name = "ADDRESS")]
    bind: String,

    /// Listening port
    #[arg(short = 'p', long, default_value_t = 8443, value_name = "PORT")]
    port: u16,

    /// Path to the TLS certificate file (PEM)
    #[arg(long, value_name = "FILE")]
    cert: PathBuf,

    /// Path to the TLS private key file (PEM)
    #[arg(long, value_name = "FILE")]
    key: PathBuf,

    /// Directory to serve and accept uploads into
    #[arg(short = 'd', long, default_value = ".", value_name = "DIR")]
    root: PathBuf,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            listener: ListenerConfig {
                bind_address: self.bind,
                port: self.port,
            },
            tls: TlsConfig {
                cert_path: self.cert,
                key_path: self.key,
            },
            files: FileConfig { root: self.root },
            timeouts: TimeoutConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    let config = Args::parse().into_config();

    // Fail fast: validate everything before the socket starts accepting.
    let root = config.files.canonical_root()?;
    let tls = net::tls::load_tls_config(&config.tls.cert_path, &config.tls.key_path)?;
    let addr = config.listener.socket_addr()?;
    let listener = net::listener::bind(addr)?;

    tracing::info!(
        address = %addr,
        root = %root.display(),
        "serving HTTPS"
    );

    let server = HttpServer::new(config, root);
    server.run(listener, tls).await?;

    Ok(())
}
