use crate::command::{Arity, Command, CommandRequest, CommandResult, Flag, Outcome};
use crate::context::ShellSession;
use crate::error::ShellError;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs::{self, Metadata};

/// ls [-l] [PATH]
/// List a directory (the current one by default).
pub struct LsCommand;

// last three octal digits of the mode
#[cfg(unix)]
fn mode_string(meta: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:03o}", meta.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn mode_string(meta: &Metadata) -> String {
    // no mode bits here, approximate from the readonly flag
    if meta.permissions().readonly() { "444".to_string() } else { "666".to_string() }
}

fn format_time(meta: &Metadata) -> String {
    match meta.modified() {
        Ok(time) => DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => "-".repeat(19),
    }
}

impl Command for LsCommand {
    fn arity(&self) -> Arity {
        Arity::AtLeast(0)
    }

    fn flags(&self) -> &'static [Flag] {
        &[Flag::Long]
    }

    fn execute(&self, req: &CommandRequest, ctx: &mut ShellSession) -> CommandResult {
        // default to cwd if no path given
        let target = match req.arg(0) {
            Some(path) => ctx.resolve(path),
            None => ctx.cwd().to_path_buf(),
        };

        // bail if path doesn't exist
        if !target.exists() {
            return Err(ShellError::not_found("Path", target.display().to_string()));
        }
        if !target.is_dir() {
            return Err(ShellError::NotADirectory(target.display().to_string()));
        }

        let read = fs::read_dir(&target)
            .map_err(|e| ShellError::io(format!("Cannot list {}", target.display()), e))?;

        // whatever order the filesystem hands back
        let mut out = String::new();
        for entry in read {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            if req.has(Flag::Long) {
                // follows symlinks; gone or dangling entries are skipped
                let meta = match fs::metadata(entry.path()) {
                    Ok(meta) => meta,
                    Err(_) => continue,
                };
                let _ = writeln!(
                    out,
                    "{:<20} {:>10} {} {}",
                    name,
                    meta.len(),
                    format_time(&meta),
                    mode_string(&meta)
                );
            } else {
                let _ = writeln!(out, "{}", name);
            }
        }
        if out.ends_with('\n') {
            out.pop();
        }
        Ok(Outcome::Output(out))
    }
}
