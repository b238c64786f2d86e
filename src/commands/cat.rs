use crate::command::{Arity, Command, CommandRequest, CommandResult, Outcome};
use crate::context::ShellSession;
use crate::error::ShellError;
use std::fs;

/// cat FILE
/// Print a text file verbatim.
pub struct CatCommand;

impl Command for CatCommand {
    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn execute(&self, req: &CommandRequest, ctx: &mut ShellSession) -> CommandResult {
        let filename = req.arg(0).unwrap_or_default();
        // plain join: no ~ expansion here
        let path = ctx.join(filename);

        if !path.exists() {
            return Err(ShellError::not_found("File", filename));
        }
        if path.is_dir() {
            return Err(ShellError::IsADirectory(filename.to_string()));
        }

        let bytes = fs::read(&path).map_err(|e| ShellError::io(format!("Cannot read {}", filename), e))?;
        let text = String::from_utf8(bytes).map_err(|source| ShellError::Decoding {
            path: filename.to_string(),
            source,
        })?;
        Ok(Outcome::Output(text))
    }
}
