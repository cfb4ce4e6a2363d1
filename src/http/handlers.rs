//! Per-request method dispatch and the read/upload code paths.

use axum::body::Body;
use axum::extract::{Path as RequestPath, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;

use crate::error::UploadError;
use crate::files::{resolve, store};
use crate::http::server::AppState;

/// Handler for the bare `/` route.
pub async fn handle_root(State(state): State<AppState>, request: Request) -> Response {
    dispatch(state, String::new(), request).await
}

/// Handler for every other request path.
pub async fn handle_path(
    State(state): State<AppState>,
    RequestPath(path): RequestPath<String>,
    request: Request,
) -> Response {
    dispatch(state, path, request).await
}

/// Dispatch on method: read verbs delegate to the static file path, the
/// upload verb runs the custom PUT logic, everything else is refused.
async fn dispatch(state: AppState, rel_path: String, request: Request) -> Response {
    tracing::debug!(method = %request.method(), path = %rel_path, "dispatching request");
    match request.method().as_str() {
        "GET" => download(&state, &rel_path, false).await,
        "HEAD" => download(&state, &rel_path, true).await,
        "PUT" => upload(&state, &rel_path, request).await,
        _ => method_not_allowed(),
    }
}

/// Read path: resolve, confine, read, respond with inferred content type.
async fn download(state: &AppState, rel_path: &str, is_head: bool) -> Response {
    let target = match resolve::resolve_request_path(&state.root, rel_path) {
        Ok(target) => target,
        Err(err) => {
            tracing::warn!(path = %rel_path, error = %err, "traversal attempt blocked");
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    let confined = match resolve::confine(&state.root, &target).await {
        Ok(confined) => confined,
        Err(err) => {
            tracing::warn!(path = %rel_path, error = %err, "resolved path left the root");
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    match store::read_file(&confined).await {
        Ok((content, content_type)) => file_response(content, content_type, is_head),
        Err(store::ReadError::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(store::ReadError::Forbidden) => StatusCode::FORBIDDEN.into_response(),
        Err(store::ReadError::Io(err)) => {
            tracing::error!(path = %rel_path, error = %err, "read failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Upload path. All failures collapse to an empty 500; only the log carries
/// the typed cause.
async fn upload(state: &AppState, rel_path: &str, request: Request) -> Response {
    match try_upload(state, rel_path, request).await {
        Ok(written) => {
            tracing::info!(path = %rel_path, bytes = written, "upload stored");
            StatusCode::CREATED.into_response()
        }
        Err(err) => {
            tracing::error!(path = %rel_path, error = %err, "upload failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn try_upload(
    state: &AppState,
    rel_path: &str,
    request: Request,
) -> Result<usize, UploadError> {
    let target = resolve::resolve_request_path(&state.root, rel_path)?;
    let target = resolve::confine(&state.root, &target).await?;

    let expected = declared_content_length(request.headers());
    let content = read_body_exact(request.into_body(), expected).await?;

    store::write_file(&target, &content).await?;
    Ok(content.len())
}

/// `Content-Length` as declared by the client; missing or non-numeric values
/// count as zero bytes to read.
fn declared_content_length(headers: &HeaderMap) -> u64 {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Read exactly `expected` bytes from the body stream.
///
/// Bytes beyond the declared length are never pulled from the stream; a
/// stream that ends early is a short read.
async fn read_body_exact(body: Body, expected: u64) -> Result<Vec<u8>, UploadError> {
    if expected == 0 {
        return Ok(Vec::new());
    }

    let mut content = Vec::with_capacity(expected.min(64 * 1024) as usize);
    let mut stream = body.into_data_stream();
    while (content.len() as u64) < expected {
        match stream.next().await {
            Some(Ok(chunk)) => content.extend_from_slice(&chunk),
            Some(Err(err)) => return Err(UploadError::Body(err)),
            None => {
                return Err(UploadError::ShortRead {
                    expected,
                    received: content.len() as u64,
                })
            }
        }
    }
    content.truncate(expected as usize);
    Ok(content)
}

fn file_response(content: Vec<u8>, content_type: &'static str, is_head: bool) -> Response {
    let length = content.len();
    let body = if is_head {
        Body::empty()
    } else {
        Body::from(content)
    };
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, length)
        .body(body)
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to build file response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}

fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, HEAD, PUT")],
    )
        .into_response()
}
