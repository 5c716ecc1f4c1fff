//! CLI-level errors (wraps tree errors)

use thiserror::Error;

use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("cannot determine the config directory")]
    NoConfigDir,
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NoConfigDir => crate::exitcode::CONFIG,
            CliError::Tree(e) => match e {
                TreeError::PathNotFound(_) => crate::exitcode::NOINPUT,
                TreeError::FileReadError(_) | TreeError::ScanFailed { .. } => crate::exitcode::IOERR,
                TreeError::InvalidSketch { .. } => crate::exitcode::DATAERR,
                TreeError::InvalidConfig(_) => crate::exitcode::CONFIG,
                // Structural misuse of the tree API is a programmer error
                TreeError::ChildNotFound { .. }
                | TreeError::NodeNotFound
                | TreeError::NotAFolder(_)
                | TreeError::CycleDetected { .. }
                | TreeError::AlreadyAttached { .. } => crate::exitcode::SOFTWARE,
            },
        }
    }
}
