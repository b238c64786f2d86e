use crate::error::{Result, ShellError};
use crate::path;
use std::path::{Path, PathBuf};

/// State carried between commands: the virtual working directory.
///
/// `cwd` is decoupled from the process working directory and always names
/// an existing directory; only `cd` moves it.
#[derive(Debug, Clone)]
pub struct ShellSession {
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl ShellSession {
    /// Start a session in `cwd`, with `~` mapped to the host home directory.
    pub fn new(cwd: impl Into<PathBuf>) -> Result<Self> {
        Self::with_home(cwd, dirs::home_dir())
    }

    pub fn with_home(cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> Result<Self> {
        let cwd = path::normalize(&cwd.into());
        if !cwd.is_dir() {
            return Err(ShellError::NotADirectory(cwd.display().to_string()));
        }
        Ok(Self { cwd, home })
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Resolve with `..` and `~` handling (navigation commands).
    pub fn resolve(&self, token: &str) -> PathBuf {
        path::resolve(token, &self.cwd, self.home())
    }

    /// Plain join against the working directory (file commands).
    pub fn join(&self, token: &str) -> PathBuf {
        path::join(&self.cwd, token)
    }

    /// Text shown before the cursor: `<basename>> `.
    pub fn prompt(&self) -> String {
        format!("{}> ", path::display_name(&self.cwd))
    }

    pub(crate) fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }
}
