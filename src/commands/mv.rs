use crate::command::{Arity, Command, CommandRequest, CommandResult, Outcome};
use crate::commands::cp::{copy_file, copy_tree};
use crate::context::ShellSession;
use crate::error::{Result, ShellError};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// mv SOURCE DEST
/// Rename SOURCE to DEST, or move it into DEST if that is a directory.
pub struct MvCommand;

impl Command for MvCommand {
    fn arity(&self) -> Arity {
        Arity::Exactly(2)
    }

    fn execute(&self, req: &CommandRequest, ctx: &mut ShellSession) -> CommandResult {
        let (source, dest) = match (req.arg(0), req.arg(1)) {
            (Some(s), Some(d)) => (s, d),
            _ => return Err(ShellError::UnknownCommand(req.name.clone())),
        };
        let src_path = ctx.join(source);
        let mut dst_path = ctx.join(dest);

        if fs::symlink_metadata(&src_path).is_err() {
            return Err(ShellError::not_found("Source", source));
        }

        if dst_path.is_dir() {
            let name = src_path.file_name().unwrap_or(src_path.as_os_str());
            dst_path = dst_path.join(name);
            if fs::symlink_metadata(&dst_path).is_ok() {
                return Err(ShellError::AlreadyExists(dst_path));
            }
        }

        move_path(&src_path, &dst_path)?;
        Ok(Outcome::Output(format!("Moved {} to {}", source, dest)))
    }
}

/// Rename, falling back to copy + delete when the rename can't cross devices.
pub(crate) fn move_path(src: &Path, dst: &Path) -> Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!(src = %src.display(), dst = %dst.display(), "rename crosses devices, copying");
            let is_dir = fs::symlink_metadata(src).map(|m| m.is_dir()).unwrap_or(false);
            let removed = if is_dir {
                copy_tree(src, dst)?;
                fs::remove_dir_all(src)
            } else {
                copy_file(src, dst)?;
                fs::remove_file(src)
            };
            removed.map_err(|e| ShellError::io(format!("Cannot remove {}", src.display()), e))
        }
        Err(e) => Err(ShellError::io(
            format!("Cannot move {} to {}", src.display(), dst.display()),
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testutil::fixture;
    use crate::error::ErrorKind;

    fn mv(line: &str, ctx: &mut ShellSession) -> CommandResult {
        let req = CommandRequest::parse(line, &[]).unwrap();
        MvCommand.execute(&req, ctx)
    }

    #[test]
    fn test_mv_file() {
        let (tmp, mut ctx) = fixture();
        match mv("mv test.txt new.txt", &mut ctx).unwrap() {
            Outcome::Output(text) => assert_eq!(text, "Moved test.txt to new.txt"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!tmp.path().join("test.txt").exists());
        assert_eq!(fs::read_to_string(tmp.path().join("new.txt")).unwrap(), "Hello");
    }

    #[test]
    fn test_mv_directory() {
        let (tmp, mut ctx) = fixture();
        mv("mv dir renamed", &mut ctx).unwrap();
        assert!(!tmp.path().join("dir").exists());
        assert_eq!(fs::read_to_string(tmp.path().join("renamed/inner.txt")).unwrap(), "Inner");
    }

    #[test]
    fn test_mv_into_directory() {
        let (tmp, mut ctx) = fixture();
        mv("mv test.txt dir", &mut ctx).unwrap();
        assert!(!tmp.path().join("test.txt").exists());
        assert_eq!(fs::read_to_string(tmp.path().join("dir/test.txt")).unwrap(), "Hello");
    }

    #[test]
    fn test_mv_into_directory_collision() {
        let (tmp, mut ctx) = fixture();
        fs::write(tmp.path().join("inner.txt"), "Outer").unwrap();
        let err = mv("mv inner.txt dir", &mut ctx).unwrap_err();
        assert!(matches!(err, ShellError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(tmp.path().join("dir/inner.txt")).unwrap(), "Inner");
    }

    #[test]
    fn test_mv_missing_source() {
        let (_tmp, mut ctx) = fixture();
        let err = mv("mv nope.txt x.txt", &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Source not found: nope.txt");
    }
}
