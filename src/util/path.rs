use std::path::{Path, PathBuf};

use crate::errors::{TreeError, TreeResult};

pub trait PathExt {
    fn to_canonical(&self) -> TreeResult<PathBuf>;
    fn display_name(&self) -> String;
}

impl PathExt for Path {
    fn to_canonical(&self) -> TreeResult<PathBuf> {
        self.canonicalize().map_err(|e| TreeError::ScanFailed {
            path: self.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Final path component, falling back to the full path for roots like `/`.
    fn display_name(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display().to_string())
    }
}
