//! Text outline parser: author a component tree without touching the disk.
//!
//! A sketch is an indented listing, one component per line:
//!
//! ```text
//! root/
//!   a.txt (3)
//!   b.txt
//!   sub/
//!     c.txt (7)
//! ```
//!
//! A trailing `/` marks a folder, everything else is a file. Files may
//! carry a ` (N)` suffix setting their size in bytes (default 0). Nesting
//! is given by leading spaces: a line's parent is the nearest preceding
//! line with smaller indent. Blank lines and `#` comments are skipped.

use std::path::Path;

use generational_arena::Index;
use regex::Regex;
use tracing::instrument;

use crate::arena::{FsTree, NodeData};
use crate::errors::{TreeError, TreeResult};

pub struct SketchParser {
    size_regex: Regex,
}

impl Default for SketchParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchParser {
    pub fn new() -> Self {
        Self {
            size_regex: Regex::new(r"^(.*?)\s+\((\d+)\)$").unwrap(),
        }
    }

    /// Parses a sketch into a tree, returning it with the root handle.
    ///
    /// Exactly one entry must sit at indent zero and it must be the first
    /// entry. Tabs in the indentation, nesting under a file, empty names
    /// and names containing `/` are all rejected with the offending line
    /// number.
    #[instrument(level = "debug", skip(self, input))]
    pub fn parse(&self, input: &str) -> TreeResult<(FsTree, Index)> {
        let mut tree = FsTree::new();
        let mut root_idx: Option<Index> = None;
        // (indent, node) pairs from the root down to the latest entry
        let mut indent_stack: Vec<(usize, Index)> = Vec::new();

        for (line_no, raw_line) in input.lines().enumerate() {
            let line_no = line_no + 1;
            let line = raw_line.trim_end();
            let content = line.trim_start();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }

            let indentation = &line[..line.len() - content.len()];
            if indentation.contains('\t') {
                return Err(TreeError::InvalidSketch {
                    line: line_no,
                    reason: "tabs are not allowed for indentation".to_string(),
                });
            }
            let indent = indentation.len();

            let data = self.parse_entry(content, line_no)?;
            let idx = tree.insert_node(data);

            if indent == 0 {
                if root_idx.is_some() {
                    return Err(TreeError::InvalidSketch {
                        line: line_no,
                        reason: "a sketch has exactly one root entry".to_string(),
                    });
                }
                root_idx = Some(idx);
                indent_stack.push((0, idx));
                continue;
            }

            if root_idx.is_none() {
                return Err(TreeError::InvalidSketch {
                    line: line_no,
                    reason: "first entry must start at column zero".to_string(),
                });
            }

            while let Some(&(top_indent, _)) = indent_stack.last() {
                if top_indent >= indent {
                    indent_stack.pop();
                } else {
                    break;
                }
            }
            // The root entry has indent 0 and is never popped here
            let parent_idx = match indent_stack.last() {
                Some(&(_, parent_idx)) => parent_idx,
                None => {
                    return Err(TreeError::InvalidSketch {
                        line: line_no,
                        reason: "entry has no parent".to_string(),
                    });
                }
            };

            tree.add_child(parent_idx, idx)
                .map_err(|e| TreeError::InvalidSketch {
                    line: line_no,
                    reason: e.to_string(),
                })?;
            indent_stack.push((indent, idx));
        }

        match root_idx {
            Some(root) => Ok((tree, root)),
            None => Err(TreeError::InvalidSketch {
                line: 0,
                reason: "sketch contains no entries".to_string(),
            }),
        }
    }

    /// Reads `path` and parses its content as a sketch.
    #[instrument(level = "debug", skip(self))]
    pub fn parse_file(&self, path: &Path) -> TreeResult<(FsTree, Index)> {
        if !path.exists() {
            return Err(TreeError::PathNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        self.parse(&content)
    }

    fn parse_entry(&self, content: &str, line_no: usize) -> TreeResult<NodeData> {
        let data = if let Some(name) = content.strip_suffix('/') {
            NodeData::folder(name)
        } else if let Some(caps) = self.size_regex.captures(content) {
            let name = caps.get(1).unwrap().as_str();
            let size = caps
                .get(2)
                .unwrap()
                .as_str()
                .parse::<u64>()
                .map_err(|_| TreeError::InvalidSketch {
                    line: line_no,
                    reason: "size out of range".to_string(),
                })?;
            NodeData::file(name, size)
        } else {
            NodeData::file(content, 0)
        };

        if data.name.is_empty() {
            return Err(TreeError::InvalidSketch {
                line: line_no,
                reason: "entry has an empty name".to_string(),
            });
        }
        if data.name.contains('/') {
            return Err(TreeError::InvalidSketch {
                line: line_no,
                reason: "name must not contain '/'".to_string(),
            });
        }
        Ok(data)
    }
}
