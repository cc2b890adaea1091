//! Root containment
//!
//! Two checks keep a resolved path beneath the root:
//! 1. Lexical: the encoded key may not be absolute or contain `..`, and may not
//!    contain empty or `.` segments that would alias another key's file
//! 2. Physical: the deepest existing ancestor must canonicalize inside the root,
//!    which catches symlinks pointing elsewhere

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::codec::is_separator;
use crate::error::{DirKvError, Result};

/// Join an encoded key onto `root`, one segment per path component.
///
/// Absolute keys and `..` segments fail with `PathEscapesRoot`. Empty and `.`
/// segments fail with `InvalidArgument`: the filesystem would collapse them,
/// so two different keys would share one file.
pub(crate) fn join_within(root: &Path, key: &str, encoded: &str) -> Result<PathBuf> {
    let relative = Path::new(encoded);
    if relative.has_root() || matches!(relative.components().next(), Some(Component::Prefix(_))) {
        return Err(escapes(key));
    }

    let mut path = root.to_path_buf();
    for segment in encoded.split(is_separator) {
        match segment {
            ".." => return Err(escapes(key)),
            "" | "." => {
                tracing::warn!("Rejecting key {:?}: empty or '.' path segment", key);
                return Err(DirKvError::InvalidArgument(format!(
                    "key {:?} has an empty or '.' path segment",
                    key
                )));
            }
            _ => path.push(segment),
        }
    }

    Ok(path)
}

/// Verify no existing ancestor of `path` links outside `root`.
///
/// Ancestors that do not exist yet are skipped. A symlink that cannot be
/// resolved is treated as escaping.
pub(crate) fn ensure_no_link_escape(root: &Path, path: &Path, key: &str) -> Result<()> {
    let canonical_root = match root.canonicalize() {
        Ok(resolved) => resolved,
        // Nothing exists under a missing root
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    for ancestor in path.ancestors() {
        if ancestor == root {
            break;
        }

        match ancestor.canonicalize() {
            Ok(resolved) if resolved.starts_with(&canonical_root) => return Ok(()),
            Ok(_) => return Err(escapes(key)),
            Err(_) => {
                let is_link = fs::symlink_metadata(ancestor)
                    .map(|m| m.file_type().is_symlink())
                    .unwrap_or(false);
                if is_link {
                    return Err(escapes(key));
                }
            }
        }
    }

    Ok(())
}

fn escapes(key: &str) -> DirKvError {
    tracing::warn!("Rejecting key {:?}: resolves outside the store root", key);
    DirKvError::PathEscapesRoot(key.to_string())
}
