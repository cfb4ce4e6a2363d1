//! HTTPS server setup and routing.
//!
//! # Responsibilities
//! - Build the Axum router (both routes feed one dispatch handler)
//! - Wire up middleware (trace, per-request timeout)
//! - Inject the canonical served root as shared state
//! - Serve the TLS-wrapped listener with graceful shutdown

use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::any;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::http::handlers;
use crate::lifecycle::signals;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Canonical served root; every request path resolves under it.
    pub root: Arc<PathBuf>,
}

/// Build the Axum router with all routes and middleware attached.
pub fn build_router(config: &ServerConfig, state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::handle_root))
        .route("/{*path}", any(handlers::handle_path))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )))
        .layer(TraceLayer::new_for_http())
}

/// HTTPS file server.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new server for the given configuration and canonical root.
    pub fn new(config: ServerConfig, root: PathBuf) -> Self {
        let state = AppState {
            root: Arc::new(root),
        };
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Serve the already-bound listener through the TLS acceptor.
    ///
    /// Each accepted connection performs its handshake before any HTTP
    /// parsing; plaintext clients are rejected at the transport layer. An
    /// interrupt triggers a graceful drain of in-flight requests.
    pub async fn run(self, listener: TcpListener, tls: RustlsConfig) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = Handle::new();
        tokio::spawn(signals::shutdown_on_interrupt(handle.clone()));

        axum_server::from_tcp_rustls(listener, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::path::Path;
    use tower::ServiceExt;

    fn app(root: &Path) -> Router {
        let state = AppState {
            root: Arc::new(root.canonicalize().unwrap()),
        };
        build_router(&ServerConfig::default(), state)
    }

    fn put(uri: &str, declared: Option<&str>, body: &[u8]) -> Request<Body> {
        let mut builder = Request::builder().method("PUT").uri(uri);
        if let Some(length) = declared {
            builder = builder.header(header::CONTENT_LENGTH, length);
        }
        builder.body(Body::from(body.to_vec())).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_of(response: axum::response::Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn put_then_get_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app(tmp.path());
        let payload = b"\x00binary\xffpayload";

        let response = app
            .clone()
            .oneshot(put("/data.bin", Some("15"), payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(body_of(response).await.is_empty());

        let response = app.oneshot(get("/data.bin")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        assert_eq!(body_of(response).await, payload);
    }

    #[tokio::test]
    async fn put_without_content_length_creates_empty_file() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app(tmp.path());

        let response = app
            .oneshot(put("/empty.txt", None, b"these bytes are never read"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let written = std::fs::read(tmp.path().join("empty.txt")).unwrap();
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn put_non_numeric_content_length_counts_as_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app(tmp.path());

        let response = app
            .oneshot(put("/odd.txt", Some("many"), b"ignored"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(std::fs::read(tmp.path().join("odd.txt")).unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_writes_only_declared_length() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app(tmp.path());

        let response = app
            .oneshot(put("/partial.txt", Some("5"), b"helloworld"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(std::fs::read(tmp.path().join("partial.txt")).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn put_short_body_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app(tmp.path());

        let response = app
            .oneshot(put("/short.txt", Some("64"), b"abc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_of(response).await.is_empty());
        assert!(!tmp.path().join("short.txt").exists());
    }

    #[tokio::test]
    async fn second_put_truncates_first_body() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app(tmp.path());

        let first = b"first body, noticeably longer";
        let second = b"second";
        app.clone()
            .oneshot(put("/doc.txt", Some("29"), first))
            .await
            .unwrap();
        app.clone()
            .oneshot(put("/doc.txt", Some("6"), second))
            .await
            .unwrap();

        let response = app.oneshot(get("/doc.txt")).await.unwrap();
        assert_eq!(body_of(response).await, second);
    }

    #[tokio::test]
    async fn put_traversal_is_rejected() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("root");
        std::fs::create_dir(&root).unwrap();
        let app = app(&root);

        let response = app
            .oneshot(put("/../escape.txt", Some("4"), b"oops"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!outer.path().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn nested_traversal_is_rejected() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("root");
        std::fs::create_dir(&root).unwrap();
        let app = app(&root);

        let response = app
            .oneshot(put("/sub/../../escape.txt", Some("4"), b"oops"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!outer.path().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn get_traversal_is_not_found() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("root");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(outer.path().join("outside.txt"), b"secret").unwrap();
        let app = app(&root);

        let response = app.oneshot(get("/../outside.txt")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app(tmp.path());

        let response = app.oneshot(get("/nope.txt")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_root_serves_index_html() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("index.html"), b"<p>home</p>").unwrap();
        let app = app(tmp.path());

        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(body_of(response).await, b"<p>home</p>");
    }

    #[tokio::test]
    async fn head_returns_headers_without_body() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("page.html"), b"<h1>x</h1>").unwrap();
        let app = app(tmp.path());

        let request = Request::builder()
            .method("HEAD")
            .uri("/page.html")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "10");
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn percent_encoded_paths_are_decoded() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app(tmp.path());

        let response = app
            .clone()
            .oneshot(put("/with%20space.txt", Some("2"), b"ok"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(std::fs::read(tmp.path().join("with space.txt")).unwrap(), b"ok");
    }

    #[tokio::test]
    async fn other_methods_are_refused() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app(tmp.path());

        let request = Request::builder()
            .method("POST")
            .uri("/anything")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, HEAD, PUT");
    }
}
