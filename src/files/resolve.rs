//! Traversal-safe resolution of request paths against the served root.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tokio::fs;

/// Error type for path resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The request path would resolve outside the served root.
    #[error("request path {0:?} escapes the served root")]
    OutsideRoot(String),
}

/// Resolve a percent-decoded request path to a location under `root`.
///
/// Purely lexical: leading slashes are stripped, `.` segments are dropped,
/// and anything that could climb out of the root (`..`, absolute paths,
/// platform prefixes) is rejected outright. `root` is expected to be the
/// canonical served root computed at startup.
pub fn resolve_request_path(root: &Path, raw: &str) -> Result<PathBuf, ResolveError> {
    let relative = raw.trim_start_matches('/');
    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ResolveError::OutsideRoot(raw.to_string()));
            }
        }
    }
    Ok(resolved)
}

/// Canonicalize `target` and verify it stays under `root`.
///
/// The target itself may not exist yet (uploads create it), so the nearest
/// existing ancestor is canonicalized and the missing tail re-appended. This
/// catches symlinks inside the root that point elsewhere, which the lexical
/// pass cannot see.
pub async fn confine(root: &Path, target: &Path) -> Result<PathBuf, ResolveError> {
    let escape = || ResolveError::OutsideRoot(target.display().to_string());

    let mut existing = target.to_path_buf();
    let mut missing_tail = Vec::new();
    let canonical = loop {
        match fs::canonicalize(&existing).await {
            Ok(path) => break path,
            Err(_) => {
                let name = existing.file_name().ok_or_else(escape)?.to_os_string();
                missing_tail.push(name);
                // Targets always start at the canonical root, which exists,
                // so this walk terminates before popping past it.
                if !existing.pop() {
                    return Err(escape());
                }
            }
        }
    };

    if !canonical.starts_with(root) {
        return Err(escape());
    }

    Ok(missing_tail
        .into_iter()
        .rev()
        .fold(canonical, |path, segment| path.join(segment)))
}
