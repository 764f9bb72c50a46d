//! Resolution of client-supplied media paths.
//!
//! Requests name files relative to the configured media root. Absolute paths
//! and `..` components are refused before the filesystem is touched, and the
//! resolved file must still sit under the root once symlinks are followed.

use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::error::{ApiError, ApiResult};

/// Resolve `requested` under `root`, returning the canonical file path.
///
/// `label` names the file in error messages (e.g. "Video").
pub fn resolve_media_path(root: &Path, requested: &str, label: &str) -> ApiResult<PathBuf> {
    let relative = Path::new(requested);
    let escapes = relative.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        warn!(path = requested, "Rejected media path outside the media root");
        return Err(ApiError::forbidden(format!(
            "{} path must be relative to the media root",
            label
        )));
    }

    let not_found = || ApiError::not_found(format!("{} not found: {}", label, requested));

    let root = root.canonicalize().map_err(|e| {
        warn!(root = %root.display(), "Media root unavailable: {}", e);
        not_found()
    })?;
    let resolved = root.join(relative).canonicalize().map_err(|_| not_found())?;

    if !resolved.starts_with(&root) {
        warn!(path = requested, "Media path resolves outside the media root");
        return Err(ApiError::forbidden(format!(
            "{} path must be relative to the media root",
            label
        )));
    }
    if !resolved.is_file() {
        return Err(not_found());
    }

    Ok(resolved)
}
