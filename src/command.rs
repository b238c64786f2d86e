use crate::context::ShellSession;
use crate::error::ShellError;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

pub type CommandResult = Result<Outcome, ShellError>;

/// Switches a command may accept. Anything else is a positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// `-l`
    Long,
    /// `-r`
    Recursive,
}

impl Flag {
    pub fn parse(token: &str) -> Option<Flag> {
        match token {
            "-l" => Some(Flag::Long),
            "-r" => Some(Flag::Recursive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Long => "-l",
            Flag::Recursive => "-r",
        }
    }
}

/// How many positional arguments a command needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    AtLeast(usize),
    Exactly(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::AtLeast(n) => count >= n,
            Arity::Exactly(n) => count == n,
        }
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    /// lowercased command name
    pub name: String,
    pub args: Vec<String>,
    pub flags: Vec<Flag>,
}

impl CommandRequest {
    /// Split `input` on whitespace; only the flags listed in `recognized`
    /// are pulled out of the argument list, the rest stay positional in
    /// their original order.
    pub fn parse(input: &str, recognized: &[Flag]) -> Option<Self> {
        let mut parts = input.split_whitespace();
        let name = parts.next()?.to_lowercase();
        let mut args = Vec::new();
        let mut flags = Vec::new();
        for token in parts {
            match Flag::parse(token) {
                Some(flag) if recognized.contains(&flag) => {
                    if !flags.contains(&flag) {
                        flags.push(flag);
                    }
                }
                _ => args.push(token.to_string()),
            }
        }
        Some(Self { name, args, flags })
    }

    pub fn has(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn arg(&self, n: usize) -> Option<&str> {
        self.args.get(n).map(String::as_str)
    }
}

/// What a successful command hands back to the loop.
#[derive(Debug)]
pub enum Outcome {
    /// done; text to show the user (may be empty)
    Output(String),
    /// nothing happened yet; ask the user and call [`Confirmation::proceed`]
    Confirm(Confirmation),
    /// user declined a confirmation
    Cancelled,
    /// leave the loop
    Exit,
}

/// An action held back until the user answers a y/n question.
#[derive(Debug)]
pub struct Confirmation {
    pub prompt: String,
    action: PendingAction,
}

#[derive(Debug)]
enum PendingAction {
    RemoveTree { path: PathBuf, display: String },
}

impl Confirmation {
    pub(crate) fn remove_tree(path: PathBuf, display: String) -> Self {
        Self {
            prompt: format!("Delete directory '{}' recursively? (y/n): ", display),
            action: PendingAction::RemoveTree { path, display },
        }
    }

    /// Only a plain "y" (any case) counts as yes.
    pub fn is_affirmative(answer: &str) -> bool {
        answer.trim().eq_ignore_ascii_case("y")
    }

    /// Resolve the confirmation with the user's answer.
    pub fn answer(self, answer: &str) -> CommandResult {
        if Self::is_affirmative(answer) {
            self.proceed()
        } else {
            debug!(prompt = %self.prompt, "confirmation declined");
            Ok(Outcome::Cancelled)
        }
    }

    pub fn proceed(self) -> CommandResult {
        match self.action {
            PendingAction::RemoveTree { path, display } => {
                crate::commands::rm::remove_tree(&path, &display)
            }
        }
    }
}

pub trait Command {
    fn arity(&self) -> Arity;

    fn flags(&self) -> &'static [Flag] {
        &[]
    }

    fn execute(&self, req: &CommandRequest, session: &mut ShellSession) -> CommandResult;
}

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command + Send + Sync>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: HashMap::new() }
    }

    pub fn register_command(&mut self, name: &str, cmd: Box<dyn Command + Send + Sync>) {
        self.commands.insert(name.to_string(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&(dyn Command + Send + Sync)> {
        self.commands.get(name).map(|cmd| cmd.as_ref())
    }

    pub fn get_command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn default_commands() -> Self {
        let mut reg = Self::new();
        reg.register_command("ls", Box::new(crate::commands::ls::LsCommand));
        reg.register_command("cd", Box::new(crate::commands::cd::CdCommand));
        reg.register_command("cat", Box::new(crate::commands::cat::CatCommand));
        reg.register_command("cp", Box::new(crate::commands::cp::CpCommand));
        reg.register_command("mv", Box::new(crate::commands::mv::MvCommand));
        reg.register_command("rm", Box::new(crate::commands::rm::RmCommand));
        reg.register_command("exit", Box::new(crate::commands::exit::ExitCommand));
        reg
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::default_commands()
    }
}

/// Parse one line and run it. Blank input is a no-op; an unknown name or a
/// bad argument count is `UnknownCommand` carrying the lowercased name.
pub fn run_command(input: &str, session: &mut ShellSession, registry: &CommandRegistry) -> CommandResult {
    let input = input.trim();
    let name = match input.split_whitespace().next() {
        Some(name) => name.to_lowercase(),
        None => return Ok(Outcome::Output(String::new())), // empty input = no-op
    };

    let command = registry
        .get(&name)
        .ok_or_else(|| ShellError::UnknownCommand(name.clone()))?;
    let req = CommandRequest::parse(input, command.flags())
        .ok_or_else(|| ShellError::UnknownCommand(name.clone()))?;
    if !command.arity().accepts(req.args.len()) {
        debug!(command = %name, args = req.args.len(), "argument count rejected");
        return Err(ShellError::UnknownCommand(name));
    }

    debug!(command = %req.name, args = ?req.args, flags = ?req.flags, "dispatching");
    command.execute(&req, session)
}
