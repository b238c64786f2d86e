// interactive mini shell over the real filesystem
// ls/cd/cat/cp/mv/rm against a virtual cwd, every attempt goes to an audit log
pub mod audit;
pub mod command;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod path;
pub mod repl;

pub use audit::{AuditEntry, AuditSink, FileAuditLog, MemoryAuditLog};
pub use command::{run_command, CommandRegistry, CommandRequest, Outcome};
pub use config::ShellConfig;
pub use context::ShellSession;
pub use error::{ErrorKind, ShellError};
pub use repl::{EditorSource, LineSource, ReadEvent, Repl, ScriptedInput};
