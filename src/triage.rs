use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{FileAction, ViewerError};

pub const ACCEPT_FOLDER: &str = "_ok";
pub const REJECT_FOLDER: &str = "_ng";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageTarget {
    Accept,
    Reject,
}

impl TriageTarget {
    pub fn folder(self) -> &'static str {
        match self {
            TriageTarget::Accept => ACCEPT_FOLDER,
            TriageTarget::Reject => REJECT_FOLDER,
        }
    }
}

/// Filesystem side of triage. Runs on the interaction thread.
pub trait Disposal {
    /// Moves `path` into `<parent>/<folder>/`, creating the folder on demand.
    fn move_into(&self, path: &Path, folder: &str) -> Result<PathBuf, ViewerError>;
    fn trash(&self, path: &Path) -> Result<(), ViewerError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsDisposal;

impl Disposal for FsDisposal {
    fn move_into(&self, path: &Path, folder: &str) -> Result<PathBuf, ViewerError> {
        let fail = |reason: String| ViewerError::file_op(path, FileAction::Move, reason);

        if !path.is_file() {
            return Err(fail("file no longer exists".to_string()));
        }
        let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) else {
            return Err(fail("path has no parent folder".to_string()));
        };

        let target_dir = parent.join(folder);
        fs::create_dir_all(&target_dir)
            .map_err(|err| fail(format!("cannot create {}: {err}", target_dir.display())))?;

        let destination = target_dir.join(file_name);
        if destination.exists() {
            return Err(fail(format!("{} already exists", destination.display())));
        }

        if let Err(rename_err) = fs::rename(path, &destination) {
            // Rename fails across filesystems, fall back to copy + delete.
            copy_then_remove(path, &destination).map_err(|err| {
                log::debug!("Copy fallback after rename error ({rename_err}) failed: {err}");
                fail(rename_err.to_string())
            })?;
        }

        log::info!("Moved {} to {}", path.display(), destination.display());
        Ok(destination)
    }

    fn trash(&self, path: &Path) -> Result<(), ViewerError> {
        if !path.exists() {
            return Err(ViewerError::file_op(
                path,
                FileAction::Trash,
                "file no longer exists",
            ));
        }
        trash::delete(path)
            .map_err(|err| ViewerError::file_op(path, FileAction::Trash, err))?;
        log::info!("Sent {} to trash", path.display());
        Ok(())
    }
}

/// Copies `path` to `destination` and deletes the source. Any failure leaves
/// no file at `destination`.
fn copy_then_remove(path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(err) = fs::copy(path, destination) {
        let _ = fs::remove_file(destination);
        return Err(err);
    }
    if let Err(err) = fs::remove_file(path) {
        let _ = fs::remove_file(destination);
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_into_creates_folder_and_moves() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("c.jpg");
        fs::write(&source, b"jpg").expect("should write");

        let moved = FsDisposal
            .move_into(&source, TriageTarget::Accept.folder())
            .expect("move should succeed");
        assert_eq!(moved, dir.path().join("_ok").join("c.jpg"));
        assert!(moved.is_file());
        assert!(!source.exists());
    }

    #[test]
    fn move_into_refuses_to_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("a.png");
        fs::write(&source, b"new").expect("should write");
        fs::create_dir(dir.path().join("_ng")).expect("should create folder");
        fs::write(dir.path().join("_ng").join("a.png"), b"old").expect("should write");

        let err = FsDisposal
            .move_into(&source, REJECT_FOLDER)
            .expect_err("move should fail");
        assert!(matches!(
            err,
            ViewerError::FileOp {
                action: FileAction::Move,
                ..
            }
        ));
        assert!(source.exists());
        assert_eq!(
            fs::read(dir.path().join("_ng").join("a.png")).expect("should read"),
            b"old"
        );
    }

    #[test]
    fn move_missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = FsDisposal
            .move_into(&dir.path().join("gone.png"), ACCEPT_FOLDER)
            .expect_err("move should fail");
        assert!(err.to_string().contains("no longer exists"));
        assert!(!dir.path().join("_ok").exists());
    }

    #[test]
    fn trash_missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = FsDisposal
            .trash(&dir.path().join("gone.png"))
            .expect_err("trash should fail");
        assert!(matches!(
            err,
            ViewerError::FileOp {
                action: FileAction::Trash,
                ..
            }
        ));
    }

    #[test]
    fn copy_fallback_moves_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("a.png");
        let destination = dir.path().join("b.png");
        fs::write(&source, b"png").expect("should write");

        copy_then_remove(&source, &destination).expect("copy should succeed");
        assert!(!source.exists());
        assert_eq!(fs::read(&destination).expect("should read"), b"png");
    }

    #[test]
    fn failed_copy_fallback_leaves_no_destination() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("folder.png");
        fs::create_dir(&source).expect("should create dir");
        let destination = dir.path().join("_ok").join("folder.png");
        fs::create_dir(dir.path().join("_ok")).expect("should create dir");

        assert!(copy_then_remove(&source, &destination).is_err());
        assert!(!destination.exists());
        assert!(source.exists());
    }
}
