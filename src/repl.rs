//! The read-dispatch-print loop.
//!
//! This is the one place where outcomes and errors turn into text for the
//! user and lines for the audit log. Commands themselves never print and
//! never read input; a pending `rm -r` confirmation is answered here.

use crate::audit::{AuditEntry, AuditSink};
use crate::command::{self, CommandRegistry, CommandResult, Outcome};
use crate::context::ShellSession;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;
use std::io::{self, Write};
use tracing::{error, info};

pub const BANNER: &str = "MiniShell started. Type 'exit' to quit.";
pub const FAREWELL: &str = "Goodbye!";

/// One read from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    Line(String),
    /// Ctrl-C at the prompt
    Interrupted,
    /// Ctrl-D or closed stdin
    Eof,
}

pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadEvent>;

    /// Read the answer to a y/n question.
    fn read_answer(&mut self, prompt: &str) -> io::Result<ReadEvent> {
        self.read_line(prompt)
    }
}

/// Interactive input through rustyline.
pub struct EditorSource {
    editor: DefaultEditor,
    history: bool,
}

impl EditorSource {
    pub fn new(history: bool) -> rustyline::Result<Self> {
        Ok(Self { editor: DefaultEditor::new()?, history })
    }

    fn read(&mut self, prompt: &str, remember: bool) -> io::Result<ReadEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if remember && !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(ReadEvent::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadEvent::Eof),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e.to_string())),
        }
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadEvent> {
        let remember = self.history;
        self.read(prompt, remember)
    }

    // answers stay out of history
    fn read_answer(&mut self, prompt: &str) -> io::Result<ReadEvent> {
        self.read(prompt, false)
    }
}

/// Canned input, replayed in order; runs dry as end-of-input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<ReadEvent>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = ReadEvent>) -> Self {
        Self { events: events.into_iter().collect(), prompts: Vec::new() }
    }

    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines.into_iter().map(|l| ReadEvent::Line(l.into())))
    }

    /// Every prompt shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadEvent> {
        self.prompts.push(prompt.to_string());
        Ok(self.events.pop_front().unwrap_or(ReadEvent::Eof))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Repl<S, W, A> {
    session: ShellSession,
    registry: CommandRegistry,
    source: S,
    out: W,
    audit: A,
}

impl<S: LineSource, W: Write, A: AuditSink> Repl<S, W, A> {
    pub fn new(session: ShellSession, source: S, out: W, audit: A) -> Self {
        Self {
            session,
            registry: CommandRegistry::default_commands(),
            source,
            out,
            audit,
        }
    }

    pub fn session(&self) -> &ShellSession {
        &self.session
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    /// Run until `exit`, end-of-input or an interrupt. Only a failure to
    /// write to the terminal ends the loop with an error.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", BANNER)?;
        writeln!(self.out, "Current directory: {}", self.session.cwd().display())?;

        loop {
            self.out.flush()?;
            let prompt = self.session.prompt();
            let event = match self.source.read_line(&prompt) {
                Ok(event) => event,
                Err(e) => {
                    // input is gone for good, treat like end-of-input
                    self.fault(&format!("cannot read input: {}", e))?;
                    ReadEvent::Eof
                }
            };

            match event {
                ReadEvent::Line(line) => {
                    if self.execute_line(&line)? == Flow::Exit {
                        break;
                    }
                }
                ReadEvent::Interrupted | ReadEvent::Eof => {
                    writeln!(self.out, "\n{}", FAREWELL)?;
                    break;
                }
            }
        }
        self.out.flush()
    }

    /// Run one input line: dispatch, settle any confirmation, print, audit.
    pub fn execute_line(&mut self, line: &str) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let mut result = command::run_command(line, &mut self.session, &self.registry);
        while let Ok(Outcome::Confirm(confirmation)) = result {
            match self.ask(&confirmation.prompt)? {
                Some(answer) => result = confirmation.answer(&answer),
                None => {
                    // Ctrl-C at the question ends the session, nothing is removed
                    self.report(line, Ok(Outcome::Cancelled))?;
                    writeln!(self.out, "{}", FAREWELL)?;
                    return Ok(Flow::Exit);
                }
            }
        }
        self.report(line, result)
    }

    /// `None` when the user interrupted instead of answering.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.out.flush()?;
        match self.source.read_answer(prompt) {
            Ok(ReadEvent::Line(answer)) => Ok(Some(answer)),
            Ok(ReadEvent::Interrupted) => {
                writeln!(self.out)?;
                Ok(None)
            }
            // no answer is a "no"
            Ok(ReadEvent::Eof) => {
                writeln!(self.out)?;
                Ok(Some(String::new()))
            }
            Err(e) => {
                self.fault(&format!("cannot read confirmation: {}", e))?;
                Ok(Some(String::new()))
            }
        }
    }

    fn report(&mut self, line: &str, result: CommandResult) -> io::Result<Flow> {
        match result {
            Ok(Outcome::Exit) => {
                writeln!(self.out, "{}", FAREWELL)?;
                return Ok(Flow::Exit);
            }
            Ok(Outcome::Output(text)) => {
                writeln!(self.out, "{}", text)?;
                self.record(line, None)?;
            }
            Ok(Outcome::Cancelled) => {
                writeln!(self.out, "Cancelled")?;
                self.record(line, None)?;
            }
            Ok(Outcome::Confirm(_)) => {
                // settled in execute_line
            }
            Err(crate::error::ShellError::UnknownCommand(name)) => {
                writeln!(self.out, "Unknown command or invalid arguments: {}", name)?;
                self.record(line, Some("Unknown command"))?;
            }
            Err(e) => {
                writeln!(self.out, "Error: {}", e)?;
                self.record(line, Some(e.to_string().as_str()))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn record(&mut self, line: &str, error: Option<&str>) -> io::Result<()> {
        let entry = AuditEntry::command(line, error);
        info!(target: "minishell::audit", "{}", entry.message);
        if let Err(e) = self.audit.append(&entry) {
            self.fault(&format!("cannot write audit log: {}", e))?;
        }
        Ok(())
    }

    /// Something went wrong outside any one command. Report it and move on.
    fn fault(&mut self, detail: &str) -> io::Result<()> {
        error!("Unexpected error: {}", detail);
        writeln!(self.out, "Unexpected error: {}", detail)?;
        if let Err(e) = self.audit.append(&AuditEntry::fault(detail)) {
            error!("audit log unavailable: {}", e);
        }
        Ok(())
    }
}
