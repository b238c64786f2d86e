//! Path resolution against the session's working directory.
//!
//! Everything here is lexical: nothing touches the filesystem, so `..`
//! means "drop the last component", not "follow the real parent".

use std::path::{Component, Path, PathBuf};

/// Resolve a user token the way `cd` and `ls` do.
///
/// - `..` is the parent of `cwd` (string-level dirname, root stays root)
/// - `~` is `home`, when one is known
/// - anything else is joined onto `cwd` and normalized
pub fn resolve(token: &str, cwd: &Path, home: Option<&Path>) -> PathBuf {
    match (token, home) {
        ("..", _) => parent_of(cwd),
        ("~", Some(home)) => normalize(home),
        _ => join(cwd, token),
    }
}

/// Join `token` onto `cwd` with no special tokens. An absolute token
/// replaces `cwd` entirely.
pub fn join(cwd: &Path, token: &str) -> PathBuf {
    normalize(&cwd.join(token))
}

// get parent directory path - root is its own parent
pub fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => root_of(path),
    }
}

/// Collapse `.` and `..` components without consulting the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // .. at root is ignored
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(Component::CurDir.as_os_str());
    }
    out
}

/// The filesystem root `path` lives under.
pub fn root_of(path: &Path) -> PathBuf {
    path.ancestors()
        .last()
        .filter(|root| path.has_root() && !root.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(std::path::MAIN_SEPARATOR_STR))
}

pub fn is_root(path: &Path) -> bool {
    path.has_root() && path.parent().is_none()
}

/// Last component for display, e.g. in the prompt. Root displays as itself.
pub fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}
