use crate::command::{Arity, Command, CommandRequest, CommandResult, Confirmation, Flag, Outcome};
use crate::context::ShellSession;
use crate::error::ShellError;
use crate::guard::{self, Authorization, DenyReason};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// rm [-r] TARGET
/// Remove a file. Directories need -r and a "y" at the prompt.
///
/// Never blocks on input: a directory removal comes back as
/// [`Outcome::Confirm`] and only happens once the caller answers it.
pub struct RmCommand;

impl Command for RmCommand {
    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn flags(&self) -> &'static [Flag] {
        &[Flag::Recursive]
    }

    fn execute(&self, req: &CommandRequest, ctx: &mut ShellSession) -> CommandResult {
        let target = req.arg(0).unwrap_or_default();
        let target_path = ctx.join(target);

        // dangling symlinks still count as present
        if fs::symlink_metadata(&target_path).is_err() {
            return Err(ShellError::not_found("Target", target));
        }

        match guard::authorize(&target_path, ctx.cwd(), req.has(Flag::Recursive)) {
            Authorization::Denied(DenyReason::NotRecursive) => {
                Err(ShellError::RecursiveRequired { action: "delete", path: target.to_string() })
            }
            Authorization::Denied(reason) => {
                warn!(path = %target_path.display(), reason = reason.message(), "refusing to remove");
                Err(ShellError::PermissionDenied(reason.message().to_string()))
            }
            Authorization::RequiresConfirmation => Ok(Outcome::Confirm(Confirmation::remove_tree(
                target_path,
                target.to_string(),
            ))),
            Authorization::Allowed => {
                debug!(path = %target_path.display(), "removing file");
                fs::remove_file(&target_path)
                    .map_err(|e| ShellError::io(format!("Cannot remove {}", target), e))?;
                Ok(Outcome::Output(format!("Removed file: {}", target)))
            }
        }
    }
}

/// Second half of `rm -r`, run once the user said yes.
pub(crate) fn remove_tree(path: &Path, display: &str) -> CommandResult {
    debug!(path = %path.display(), "removing tree");
    fs::remove_dir_all(path).map_err(|e| ShellError::io(format!("Cannot remove {}", display), e))?;
    Ok(Outcome::Output(format!("Removed directory: {}", display)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testutil::fixture;
    use crate::error::ErrorKind;

    fn rm(line: &str, ctx: &mut ShellSession) -> CommandResult {
        let req = CommandRequest::parse(line, RmCommand.flags()).unwrap();
        RmCommand.execute(&req, ctx)
    }

    #[test]
    fn test_rm_file() {
        let (tmp, mut ctx) = fixture();
        match rm("rm test.txt", &mut ctx).unwrap() {
            Outcome::Output(text) => assert_eq!(text, "Removed file: test.txt"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!tmp.path().join("test.txt").exists());
    }

    #[test]
    fn test_rm_dir_without_flag() {
        let (tmp, mut ctx) = fixture();
        let err = rm("rm dir", &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IsADirectory);
        assert_eq!(err.to_string(), "Use -r option to delete directory: dir");
        assert!(tmp.path().join("dir/inner.txt").exists());
    }

    #[test]
    fn test_rm_dir_confirmed() {
        let (tmp, mut ctx) = fixture();
        let confirmation = match rm("rm -r dir", &mut ctx).unwrap() {
            Outcome::Confirm(c) => c,
            other => panic!("unexpected outcome: {:?}", other),
        };
        // nothing is touched before the answer
        assert!(tmp.path().join("dir").exists());
        assert_eq!(confirmation.prompt, "Delete directory 'dir' recursively? (y/n): ");

        match confirmation.answer("Y").unwrap() {
            Outcome::Output(text) => assert_eq!(text, "Removed directory: dir"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!tmp.path().join("dir").exists());
    }

    #[test]
    fn test_rm_dir_declined() {
        let (tmp, mut ctx) = fixture();
        for answer in ["n", "", "yes"] {
            let confirmation = match rm("rm -r dir", &mut ctx).unwrap() {
                Outcome::Confirm(c) => c,
                other => panic!("unexpected outcome: {:?}", other),
            };
            assert!(matches!(confirmation.answer(answer), Ok(Outcome::Cancelled)));
            assert!(tmp.path().join("dir/inner.txt").exists());
        }
    }

    #[test]
    fn test_rm_parent_of_cwd() {
        let (tmp, mut ctx) = fixture();
        crate::commands::cd::CdCommand
            .execute(&CommandRequest::parse("cd dir", &[]).unwrap(), &mut ctx)
            .unwrap();

        let err = rm("rm -r ..", &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert_eq!(err.to_string(), "Cannot delete parent directory");
        assert!(tmp.path().join("test.txt").exists());
    }

    #[test]
    fn test_rm_root() {
        let (_tmp, mut ctx) = fixture();
        let root = crate::path::root_of(ctx.cwd());
        let err = rm(&format!("rm -r {}", root.display()), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert_eq!(err.to_string(), "Cannot delete root directory");
    }

    #[test]
    fn test_rm_missing() {
        let (_tmp, mut ctx) = fixture();
        let err = rm("rm nope", &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Target not found: nope");
    }
}
