use anyhow::{Context, Result};
use minishell::{EditorSource, FileAuditLog, Repl, ShellConfig, ShellSession};
use std::env;
use std::io;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = ShellConfig::load().context("Failed to load configuration")?;

    // diagnostics go to stderr so they never mix with shell output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    info!("Starting minishell v{}", env!("CARGO_PKG_VERSION"));
    debug!(?config, "configuration loaded");

    let launch_dir = env::current_dir().context("Failed to read the current directory")?;
    let session = ShellSession::new(&launch_dir)
        .with_context(|| format!("Cannot start in {}", launch_dir.display()))?;
    let audit = FileAuditLog::open(&config.audit_log)
        .with_context(|| format!("Cannot open audit log {}", config.audit_log.display()))?;
    debug!(path = %audit.path().display(), "audit log opened");
    let input = EditorSource::new(config.history)
        .map_err(|e| anyhow::anyhow!("Failed to initialize line editor: {}", e))?;

    let mut repl = Repl::new(session, input, io::stdout(), audit);
    repl.run().context("Terminal output failed")?;
    Ok(())
}
