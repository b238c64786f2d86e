use crate::command::{Arity, Command, CommandRequest, CommandResult, Flag, Outcome};
use crate::context::ShellSession;
use crate::error::{Result, ShellError};
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// cp [-r] SOURCE DEST
/// Copy a file, or with -r a whole directory tree.
pub struct CpCommand;

impl Command for CpCommand {
    fn arity(&self) -> Arity {
        Arity::AtLeast(2)
    }

    fn flags(&self) -> &'static [Flag] {
        &[Flag::Recursive]
    }

    fn execute(&self, req: &CommandRequest, ctx: &mut ShellSession) -> CommandResult {
        let (source, dest) = match (req.arg(0), req.arg(1)) {
            (Some(s), Some(d)) => (s, d),
            _ => return Err(ShellError::UnknownCommand(req.name.clone())),
        };
        let src_path = ctx.join(source);
        let dst_path = ctx.join(dest);

        if !src_path.exists() {
            return Err(ShellError::not_found("Source", source));
        }

        if req.has(Flag::Recursive) && src_path.is_dir() {
            // an existing destination gets the tree nested inside it
            let target = if dst_path.exists() {
                let dest_dir = if dst_path.is_dir() {
                    dst_path.clone()
                } else {
                    crate::path::parent_of(&dst_path)
                };
                dest_dir.join(base_name(&src_path))
            } else {
                dst_path
            };
            copy_tree(&src_path, &target)?;
        } else if src_path.is_dir() {
            return Err(ShellError::RecursiveRequired { action: "copy", path: source.to_string() });
        } else {
            let target = if dst_path.is_dir() {
                dst_path.join(base_name(&src_path))
            } else {
                dst_path
            };
            copy_file(&src_path, &target)?;
        }

        Ok(Outcome::Output(format!("Copied {} to {}", source, dest)))
    }
}

fn base_name(path: &Path) -> &std::ffi::OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

/// Copy one file along with its permission bits and timestamps.
pub(crate) fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if is_same_file(src, dst) {
        return Err(ShellError::SameFile { src: src.to_path_buf(), dst: dst.to_path_buf() });
    }
    debug!(src = %src.display(), dst = %dst.display(), "copying file");
    let io_err = |e| ShellError::io(format!("Cannot copy {} to {}", src.display(), dst.display()), e);

    // fs::copy carries the permission bits over
    fs::copy(src, dst).map_err(io_err)?;

    let meta = fs::metadata(src).map_err(io_err)?;
    let mut times = FileTimes::new();
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    // dst may already be read-only by now; timestamps are best effort
    if let Err(e) = File::open(dst).and_then(|f| f.set_times(times)) {
        warn!(dst = %dst.display(), error = %e, "could not preserve timestamps");
    }
    Ok(())
}

// fs::copy truncates dst before reading src, so copying a file onto
// itself (directly or through a link) would empty it
fn is_same_file(src: &Path, dst: &Path) -> bool {
    match (fs::canonicalize(src), fs::canonicalize(dst)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy the tree at `src` to a new path `dst`. `dst` must not exist yet.
///
/// The whole source tree is listed before anything is created, so a
/// destination inside the source (`cp -r dir dir`) is never copied into
/// itself.
pub(crate) fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    if dst.exists() {
        return Err(ShellError::AlreadyExists(dst.to_path_buf()));
    }
    debug!(src = %src.display(), dst = %dst.display(), "copying tree");

    // relative paths; dirs come out parents first
    let mut dirs: Vec<PathBuf> = vec![PathBuf::new()];
    let mut files: Vec<PathBuf> = Vec::new();
    let mut next = 0;
    while next < dirs.len() {
        let rel = dirs[next].clone();
        next += 1;
        let from = src.join(&rel);
        let entries = fs::read_dir(&from)
            .map_err(|e| ShellError::io(format!("Cannot list {}", from.display()), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| ShellError::io(format!("Cannot list {}", from.display()), e))?;
            let child = rel.join(entry.file_name());
            // symlinks are followed, like the content they point at was there
            if entry.path().is_dir() {
                dirs.push(child);
            } else {
                files.push(child);
            }
        }
    }

    let under = |root: &Path, rel: &Path| -> PathBuf {
        if rel.as_os_str().is_empty() { root.to_path_buf() } else { root.join(rel) }
    };

    for rel in &dirs {
        let to = under(dst, rel);
        fs::create_dir(&to)
            .map_err(|e| ShellError::io(format!("Cannot create directory {}", to.display()), e))?;
    }
    for rel in &files {
        copy_file(&src.join(rel), &dst.join(rel))?;
    }

    // permissions last, so read-only dirs don't block their own contents
    for rel in dirs.iter().rev() {
        let (from, to) = (under(src, rel), under(dst, rel));
        let perms = fs::metadata(&from)
            .map_err(|e| ShellError::io(format!("Cannot stat {}", from.display()), e))?
            .permissions();
        fs::set_permissions(&to, perms)
            .map_err(|e| ShellError::io(format!("Cannot set permissions on {}", to.display()), e))?;
    }
    Ok(())
}
