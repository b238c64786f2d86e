//! Checks that run before anything is deleted.

use crate::path;
use std::fs;
use std::path::Path;

/// Verdict for a removal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Denied(DenyReason),
    /// directory removal with `-r`; the caller must get a "y" first
    RequiresConfirmation,
    Allowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Root,
    ParentOfCwd,
    /// directory without `-r`
    NotRecursive,
}

impl DenyReason {
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::Root => "Cannot delete root directory",
            DenyReason::ParentOfCwd => "Cannot delete parent directory",
            DenyReason::NotRecursive => "Use -r option to delete directory",
        }
    }
}

/// Decide whether `target` may be removed while standing in `cwd`.
///
/// `target` must already be absolute and normalized, and must exist; the
/// caller reports NotFound itself. The parent check compares against the
/// lexical dirname of `cwd`, so a symlinked working directory is judged by
/// the path the user sees.
pub fn authorize(target: &Path, cwd: &Path, recursive: bool) -> Authorization {
    if path::is_root(target) {
        return Authorization::Denied(DenyReason::Root);
    }
    if target == path::parent_of(cwd) {
        return Authorization::Denied(DenyReason::ParentOfCwd);
    }

    // symlinks are removed as links, never followed
    let is_dir = fs::symlink_metadata(target)
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    match (is_dir, recursive) {
        (true, false) => Authorization::Denied(DenyReason::NotRecursive),
        (true, true) => Authorization::RequiresConfirmation,
        (false, _) => Authorization::Allowed,
    }
}
