use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "MINISHELL_CONFIG";
pub const AUDIT_LOG_ENV: &str = "MINISHELL_AUDIT_LOG";
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// audit log file; relative paths land in the launch directory
    pub audit_log: PathBuf,
    /// tracing filter for diagnostics on stderr
    pub log_filter: String,
    /// keep line-editor history for the session
    pub history: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            audit_log: PathBuf::from("shell.log"),
            log_filter: "warn".to_string(),
            history: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ShellConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the JSON file named by `MINISHELL_CONFIG`, then the
    /// `MINISHELL_AUDIT_LOG` / `RUST_LOG` overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(AUDIT_LOG_ENV).filter(|v| !v.is_empty()) {
            self.audit_log = PathBuf::from(path);
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|v| !v.is_empty()) {
            self.log_filter = filter;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.audit_log, PathBuf::from("shell.log"));
        assert_eq!(config.log_filter, "warn");
        assert!(config.history);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("minishell.json");
        fs::write(&path, r#"{ "audit_log": "/var/log/minishell.log" }"#).unwrap();

        let config = ShellConfig::from_file(&path).unwrap();
        assert_eq!(config.audit_log, PathBuf::from("/var/log/minishell.log"));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_bad_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("minishell.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(ShellConfig::from_file(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            ShellConfig::from_file(&tmp.path().join("missing.json")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> =
            [(AUDIT_LOG_ENV, "audit.txt"), (LOG_FILTER_ENV, "minishell=debug")].into();
        let mut config = ShellConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.audit_log, PathBuf::from("audit.txt"));
        assert_eq!(config.log_filter, "minishell=debug");
    }
}
