use crate::command::{Arity, Command, CommandRequest, CommandResult, Outcome};
use crate::context::ShellSession;

/// exit
/// Only the bare word; `exit now` is not an exit.
pub struct ExitCommand;

impl Command for ExitCommand {
    fn arity(&self) -> Arity {
        Arity::Exactly(0)
    }

    fn execute(&self, _req: &CommandRequest, _ctx: &mut ShellSession) -> CommandResult {
        Ok(Outcome::Exit)
    }
}
