//! Error types for shell operations.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ShellError>;

/// Coarse classification of a [`ShellError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotADirectory,
    IsADirectory,
    PermissionDenied,
    Decoding,
    UnknownCommand,
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// `what` names the role of the missing path ("File", "Source", ...)
    #[error("{what} not found: {path}")]
    NotFound { what: &'static str, path: String },

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("{0} is a directory")]
    IsADirectory(String),

    /// directory given to an operation that only handles it with `-r`
    #[error("Use -r option to {action} directory: {path}")]
    RecursiveRequired { action: &'static str, path: String },

    #[error("{0}")]
    PermissionDenied(String),

    #[error("Cannot decode {path} as UTF-8 text: {source}")]
    Decoding {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Destination path already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("'{}' and '{}' are the same file", .src.display(), .dst.display())]
    SameFile { src: PathBuf, dst: PathBuf },

    #[error("Unknown command")]
    UnknownCommand(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl ShellError {
    pub fn not_found(what: &'static str, path: impl Into<String>) -> Self {
        Self::NotFound { what, path: path.into() }
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::NotADirectory(_) => ErrorKind::NotADirectory,
            Self::IsADirectory(_) | Self::RecursiveRequired { .. } => ErrorKind::IsADirectory,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::Decoding { .. } => ErrorKind::Decoding,
            Self::UnknownCommand(_) => ErrorKind::UnknownCommand,
            Self::AlreadyExists(_) | Self::SameFile { .. } | Self::Io { .. } => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ShellError::not_found("File", "bad.txt").to_string(), "File not found: bad.txt");
        assert_eq!(
            ShellError::RecursiveRequired { action: "delete", path: "dir".into() }.to_string(),
            "Use -r option to delete directory: dir"
        );
        assert_eq!(ShellError::UnknownCommand("frobnicate".into()).to_string(), "Unknown command");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ShellError::IsADirectory("d".into()).kind(), ErrorKind::IsADirectory);
        assert_eq!(
            ShellError::RecursiveRequired { action: "copy", path: "d".into() }.kind(),
            ErrorKind::IsADirectory
        );
        assert_eq!(
            ShellError::io("reading", io::Error::other("boom")).kind(),
            ErrorKind::Io
        );
    }
}
