//! Path helpers.
//!
//! - `normalize_path` - absolute filesystem path (canonicalize + fallback)
//! - `url_path` - site-relative output path rendered as a root URL

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to joining with the current directory for paths that do
/// not exist yet (e.g. an output directory before the first build).
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Render an output-relative path as a root-relative URL.
///
/// Separators are always `/`, whatever the platform.
///
/// ```ignore
/// assert_eq!(url_path(Path::new("stylesheets/site-all-abc.css")), "/stylesheets/site-all-abc.css");
/// ```
pub fn url_path(path: &Path) -> String {
    let mut url = String::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            url.push('/');
            url.push_str(&part.to_string_lossy());
        }
    }
    if url.is_empty() {
        url.push('/');
    }
    url
}
