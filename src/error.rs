use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to the user. None of them end the process except
/// [`ViewerError::WorkerLost`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewerError {
    #[error("{} is not in its folder listing", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("Could not {action} {}: {reason}", .path.display())]
    FileOp {
        path: PathBuf,
        action: FileAction,
        reason: String,
    },
    #[error("Image decode worker stopped unexpectedly")]
    WorkerLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Move,
    Trash,
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileAction::Move => f.write_str("move"),
            FileAction::Trash => f.write_str("send to trash"),
        }
    }
}

impl ViewerError {
    pub fn decode(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        ViewerError::Decode {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }

    pub fn file_op(path: impl Into<PathBuf>, action: FileAction, reason: impl ToString) -> Self {
        ViewerError::FileOp {
            path: path.into(),
            action,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_op_message_names_action_and_path() {
        let err = ViewerError::file_op("/tmp/a.png", FileAction::Trash, "permission denied");
        assert_eq!(
            err.to_string(),
            "Could not send to trash /tmp/a.png: permission denied"
        );
    }

    #[test]
    fn decode_keeps_context_chain() {
        let inner = anyhow::anyhow!("bad header").context("Failed to decode PNG");
        let err = ViewerError::decode("x.png", &inner);
        assert_eq!(
            err.to_string(),
            "Failed to load x.png: Failed to decode PNG: bad header"
        );
    }
}
