use crate::command::{Arity, Command, CommandRequest, CommandResult, Outcome};
use crate::context::ShellSession;
use crate::error::ShellError;
use tracing::debug;

/// cd PATH
/// Move the session's working directory. `..` and `~` are understood.
pub struct CdCommand;

impl Command for CdCommand {
    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn execute(&self, req: &CommandRequest, ctx: &mut ShellSession) -> CommandResult {
        let token = req.arg(0).unwrap_or_default();
        let new_dir = ctx.resolve(token);

        // check if target exists and is actually a directory
        if !new_dir.exists() {
            return Err(ShellError::not_found("Directory", new_dir.display().to_string()));
        }
        if !new_dir.is_dir() {
            return Err(ShellError::NotADirectory(new_dir.display().to_string()));
        }

        debug!(from = %ctx.cwd().display(), to = %new_dir.display(), "changing directory");
        ctx.set_cwd(new_dir);
        Ok(Outcome::Output(format!("Current directory: {}", ctx.cwd().display())))
    }
}
