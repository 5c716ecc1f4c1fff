//! Error taxonomy for tree construction and mutation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    /// Structural lookup failure: `remove_child` did not find the component
    /// among the container's current children. The child sequence is left
    /// unmodified.
    #[error("'{child}' is not a child of '{parent}'")]
    ChildNotFound { parent: String, child: String },

    #[error("node no longer exists in the tree")]
    NodeNotFound,

    #[error("'{0}' is a file and cannot hold children")]
    NotAFolder(String),

    #[error("attaching '{child}' under '{parent}' would create a cycle")]
    CycleDetected { parent: String, child: String },

    #[error("'{child}' is already attached to '{parent}'")]
    AlreadyAttached { parent: String, child: String },

    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("failed to scan {path}: {reason}")]
    ScanFailed { path: PathBuf, reason: String },

    #[error("failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("invalid sketch at line {line}: {reason}")]
    InvalidSketch { line: usize, reason: String },

    #[error("config error: {0}")]
    InvalidConfig(String),
}

pub type TreeResult<T> = Result<T, TreeError>;
