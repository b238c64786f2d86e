//! Append-only record of every command attempt.
//!
//! Each attempt becomes one line:
//!
//! ```text
//! 2024-05-01 12:00:00,123 - INFO - SUCCESS: cd dir
//! 2024-05-01 12:00:02,456 - INFO - FAILED: cat nope.txt | Error: File not found: nope.txt
//! ```
//!
//! Where the line goes is up to the [`AuditSink`]; the shell only appends.

use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => f.write_str("INFO"),
            Level::Error => f.write_str("ERROR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => f.write_str("SUCCESS"),
            Status::Failed => f.write_str("FAILED"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
}

impl AuditEntry {
    /// Outcome of one command line; `error` is set for failures.
    pub fn command(command: &str, error: Option<&str>) -> Self {
        let status = if error.is_some() { Status::Failed } else { Status::Success };
        let mut message = format!("{}: {}", status, command);
        if let Some(error) = error {
            message.push_str(" | Error: ");
            message.push_str(error);
        }
        Self { timestamp: Local::now(), level: Level::Info, message }
    }

    /// Fault at the REPL boundary, outside any single command's control.
    pub fn fault(detail: &str) -> Self {
        Self {
            timestamp: Local::now(),
            level: Level::Error,
            message: format!("Unexpected error: {}", detail),
        }
    }

    pub fn status(&self) -> Option<Status> {
        if self.message.starts_with("SUCCESS:") {
            Some(Status::Success)
        } else if self.message.starts_with("FAILED:") {
            Some(Status::Failed)
        } else {
            None
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.level,
            self.message
        )
    }
}

pub trait AuditSink {
    fn append(&mut self, entry: &AuditEntry) -> io::Result<()>;
}

/// Audit log backed by a text file opened in append mode.
#[derive(Debug)]
pub struct FileAuditLog {
    path: PathBuf,
    file: File,
}

impl FileAuditLog {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditLog {
    fn append(&mut self, entry: &AuditEntry) -> io::Result<()> {
        writeln!(self.file, "{}", entry)?;
        self.file.flush()
    }
}

/// Keeps entries in memory; handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: Vec<AuditEntry>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }
}

impl AuditSink for MemoryAuditLog {
    fn append(&mut self, entry: &AuditEntry) -> io::Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_success_line() {
        let entry = AuditEntry::command("ls -l", None);
        let line = entry.to_string();
        assert!(line.ends_with(" - INFO - SUCCESS: ls -l"), "{}", line);
        assert_eq!(entry.status(), Some(Status::Success));
    }

    #[test]
    fn test_failure_line_carries_error() {
        let entry = AuditEntry::command("frobnicate", Some("Unknown command"));
        assert!(entry
            .to_string()
            .ends_with(" - INFO - FAILED: frobnicate | Error: Unknown command"));
        assert_eq!(entry.status(), Some(Status::Failed));
    }

    #[test]
    fn test_fault_line() {
        let entry = AuditEntry::fault("disk full");
        assert!(entry.to_string().ends_with(" - ERROR - Unexpected error: disk full"));
        assert_eq!(entry.status(), None);
    }

    #[test]
    fn test_timestamp_shape() {
        let line = AuditEntry::command("cmd", None).to_string();
        // YYYY-MM-DD HH:MM:SS,mmm
        let stamp = &line[..23];
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[19..20], ",");
    }

    #[test]
    fn test_file_log_appends() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shell.log");

        let mut log = FileAuditLog::open(&path).unwrap();
        log.append(&AuditEntry::command("cmd", None)).unwrap();
        drop(log);

        let mut log = FileAuditLog::open(&path).unwrap();
        log.append(&AuditEntry::command("other", Some("boom"))).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("SUCCESS: cmd"));
        assert!(lines[1].contains("FAILED: other | Error: boom"));
    }
}
