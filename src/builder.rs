use std::collections::HashMap;
use std::path::{Path, PathBuf};

use generational_arena::Index;
use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

use crate::arena::{FsTree, NodeData};
use crate::config::Settings;
use crate::errors::{TreeError, TreeResult};
use crate::util::path::PathExt;

/// Mirrors a real directory listing into a component tree.
///
/// The scan is strictly read-only: directories become folders, plain files
/// become files with their metadata length as size. Nothing anywhere in
/// this crate writes to the file system.
pub struct TreeBuilder {
    settings: Settings,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl TreeBuilder {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Scans `path` and returns the mirrored tree plus its root handle.
    ///
    /// Hidden entries (leading dot) are skipped unless `show_hidden` is
    /// set; the scan root itself is exempt so a hidden directory can still
    /// be mirrored. `max_depth` caps the levels below the root. When
    /// `sort_entries` is set, each directory's entries are visited in file
    /// name order, which fixes the insertion order of the children. A
    /// plain-file path yields a single-leaf tree.
    #[instrument(level = "debug", skip(self))]
    pub fn build_from_path(&self, path: &Path) -> TreeResult<(FsTree, Index)> {
        if !path.exists() {
            return Err(TreeError::PathNotFound(path.to_path_buf()));
        }
        let scan_root = path.to_canonical()?;

        let mut walker = WalkDir::new(&scan_root);
        if let Some(depth) = self.settings.max_depth {
            walker = walker.max_depth(depth);
        }
        if self.settings.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let show_hidden = self.settings.show_hidden;
        let entries = walker
            .into_iter()
            .filter_entry(move |entry| show_hidden || !is_hidden(entry));

        let mut tree = FsTree::new();
        let mut root_idx = None;
        let mut folder_index: HashMap<PathBuf, Index> = HashMap::new();

        for entry in entries {
            let entry = entry.map_err(|e| TreeError::ScanFailed {
                path: scan_root.clone(),
                reason: e.to_string(),
            })?;

            let data = if entry.file_type().is_dir() {
                NodeData::folder(entry.path().display_name())
            } else {
                NodeData::file(entry.path().display_name(), entry_size(&entry)?)
            };
            let idx = tree.insert_node(data);

            if entry.depth() == 0 {
                root_idx = Some(idx);
            } else {
                let parent_path = entry.path().parent().ok_or_else(|| TreeError::ScanFailed {
                    path: entry.path().to_path_buf(),
                    reason: "entry has no parent directory".to_string(),
                })?;
                let parent_idx =
                    folder_index
                        .get(parent_path)
                        .copied()
                        .ok_or_else(|| TreeError::ScanFailed {
                            path: parent_path.to_path_buf(),
                            reason: "parent directory was not scanned".to_string(),
                        })?;
                tree.add_child(parent_idx, idx)?;
            }

            if entry.file_type().is_dir() {
                folder_index.insert(entry.path().to_path_buf(), idx);
            }
        }

        let root_idx = root_idx.ok_or_else(|| TreeError::ScanFailed {
            path: scan_root,
            reason: "scan produced no entries".to_string(),
        })?;
        Ok((tree, root_idx))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn entry_size(entry: &DirEntry) -> TreeResult<u64> {
    let metadata = entry.metadata().map_err(|e| {
        let reason = e.to_string();
        match e.into_io_error() {
            Some(io_err) => TreeError::FileReadError(io_err),
            None => TreeError::ScanFailed {
                path: entry.path().to_path_buf(),
                reason,
            },
        }
    })?;
    Ok(metadata.len())
}
