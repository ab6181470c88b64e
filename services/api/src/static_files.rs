//! Static File Server
//!
//! Serves the front-end bundle from the configured public directory. Any
//! request the API routes do not claim ends up here.

use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::state::AppState;

/// A file read from the public directory, ready to send.
#[derive(Debug)]
pub struct StaticFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Maps a request path onto a file under `root`.
///
/// `/` is the index page. Paths that would climb out of `root` resolve to
/// nothing.
pub fn resolve(root: &Path, url_path: &str) -> Option<PathBuf> {
    if url_path == "/" {
        return Some(root.join("index.html"));
    }

    let relative = Path::new(url_path.trim_start_matches('/'));
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || relative.as_os_str().is_empty() {
        return None;
    }
    Some(root.join(relative))
}

/// Content type sent for a file, by extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Reads the file for `url_path`, or `None` if it cannot be read for any reason.
pub async fn read_static(root: &Path, url_path: &str) -> Option<StaticFile> {
    let path = resolve(root, url_path)?;
    let bytes = tokio::fs::read(&path).await.ok()?;
    debug!(path = %path.display(), bytes = bytes.len(), "Serving static file");
    Some(StaticFile {
        bytes,
        content_type: content_type_for(&path),
    })
}

/// Fallback handler: the matching public file, or a plain-text 404.
pub async fn serve_static(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    match read_static(&state.public_dir, uri.path()).await {
        Some(file) => ([(header::CONTENT_TYPE, file.content_type)], file.bytes).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
