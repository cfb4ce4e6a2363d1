//! Filesystem reads and writes for resolved request paths.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use crate::http::mime;

/// Index files tried, in order, when a directory is requested.
const INDEX_FILES: &[&str] = &["index.html", "index.htm"];

/// Error type for the read path.
#[derive(Debug, Error)]
pub enum ReadError {
    /// No such file, or a directory without an index file.
    #[error("not found")]
    NotFound,

    /// The file exists but the process may not read it.
    #[error("permission denied")]
    Forbidden,

    /// Any other I/O failure.
    #[error(transparent)]
    Io(io::Error),
}

fn classify(err: io::Error) -> ReadError {
    match err.kind() {
        io::ErrorKind::NotFound => ReadError::NotFound,
        io::ErrorKind::PermissionDenied => ReadError::Forbidden,
        _ => ReadError::Io(err),
    }
}

/// Read a served file, following the index fallback for directories.
///
/// Returns the file content together with the content type inferred from the
/// extension. `path` must already be resolved and confined to the root.
pub async fn read_file(path: &Path) -> Result<(Vec<u8>, &'static str), ReadError> {
    let metadata = fs::metadata(path).await.map_err(classify)?;

    let path: PathBuf = if metadata.is_dir() {
        let mut index = None;
        for candidate in INDEX_FILES {
            let candidate = path.join(candidate);
            if fs::metadata(&candidate)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false)
            {
                index = Some(candidate);
                break;
            }
        }
        index.ok_or(ReadError::NotFound)?
    } else {
        path.to_path_buf()
    };

    let content = fs::read(&path).await.map_err(classify)?;
    let content_type = mime::from_extension(path.extension().and_then(|e| e.to_str()));
    Ok((content, content_type))
}

/// Write an upload target with create-or-truncate semantics.
///
/// No temp-file staging: a failure mid-write can leave a partial file, which
/// matches the upload contract.
pub async fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    fs::write(path, content).await
}
