//! Report walks over a component tree.
//!
//! All functions here are read-only: they return the report lines and leave
//! printing to the caller, so the core stays free of I/O. Every walk is
//! depth-first pre-order with children in insertion order, which makes the
//! exact line sequence the testable contract of this module.

use generational_arena::Index;
use itertools::Itertools;
use tracing::instrument;

use crate::arena::{FsTree, NodeKind};
use crate::errors::{TreeError, TreeResult};

/// Produces one report line per node in the subtree rooted at `start`.
///
/// The first line is always `start` itself; a folder reports itself before
/// any of its children. Fails only when `start` is a stale handle.
#[instrument(level = "debug", skip(tree))]
pub fn show(tree: &FsTree, start: Index) -> TreeResult<Vec<String>> {
    tree.get_node(start).ok_or(TreeError::NodeNotFound)?;
    let lines = tree
        .iter(start)
        .map(|(_, node)| match node.data.kind {
            NodeKind::Folder => format!("Showing folder '{}'", node.data),
            NodeKind::File { size } => format!("Showing file '{}' ({} B)", node.data, size),
        })
        .collect();
    Ok(lines)
}

/// Produces the deletion report for the subtree rooted at `start`.
///
/// Visits exactly the nodes `show` visits, in the same relative order. The
/// walk reports only: it never mutates the tree or the owner's child
/// sequence. Detaching is [`FsTree::remove_child`]'s job and reclaiming
/// nodes is [`FsTree::release`]'s.
#[instrument(level = "debug", skip(tree))]
pub fn delete(tree: &FsTree, start: Index) -> TreeResult<Vec<String>> {
    tree.get_node(start).ok_or(TreeError::NodeNotFound)?;
    let lines = tree
        .iter(start)
        .map(|(_, node)| match node.data.kind {
            NodeKind::Folder => format!("Deleting folder '{}'", node.data),
            NodeKind::File { .. } => format!("Deleting file '{}'", node.data),
        })
        .collect();
    Ok(lines)
}

/// Sum of the file sizes in the subtree rooted at `start`, in bytes.
#[instrument(level = "debug", skip(tree))]
pub fn total_size(tree: &FsTree, start: Index) -> TreeResult<u64> {
    tree.get_node(start).ok_or(TreeError::NodeNotFound)?;
    let total = tree
        .iter(start)
        .map(|(_, node)| match node.data.kind {
            NodeKind::File { size } => size,
            NodeKind::Folder => 0,
        })
        .sum();
    Ok(total)
}

/// Number of nodes in the subtree rooted at `start`.
#[instrument(level = "debug", skip(tree))]
pub fn count_nodes(tree: &FsTree, start: Index) -> TreeResult<usize> {
    tree.get_node(start).ok_or(TreeError::NodeNotFound)?;
    Ok(tree.iter(start).count())
}

/// Slash-joined paths of every file in the subtree, pre-order.
///
/// Paths are rooted at `start`, so the first segment is always the start
/// component's own name.
#[instrument(level = "debug", skip(tree))]
pub fn leaf_paths(tree: &FsTree, start: Index) -> TreeResult<Vec<String>> {
    let root = tree.get_node(start).ok_or(TreeError::NodeNotFound)?;
    let mut paths = Vec::new();
    let mut stack = vec![(start, root.data.name.clone())];
    while let Some((idx, path)) = stack.pop() {
        let node = tree.get_node(idx).ok_or(TreeError::NodeNotFound)?;
        for &child_idx in node.children.iter().rev() {
            let child = tree.get_node(child_idx).ok_or(TreeError::NodeNotFound)?;
            stack.push((child_idx, format!("{}/{}", path, child.data.name)));
        }
        // A file's child list is empty, so the path can move out here
        if node.data.kind.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// Slash-joined path of a component from the root of its tree.
///
/// Walks the parent links upward, so the result starts at whatever
/// component the node is ultimately attached to.
#[instrument(level = "debug", skip(tree))]
pub fn path_of(tree: &FsTree, idx: Index) -> TreeResult<String> {
    let mut segments = Vec::new();
    let mut current = Some(idx);
    while let Some(node_idx) = current {
        let node = tree.get_node(node_idx).ok_or(TreeError::NodeNotFound)?;
        segments.push(node.data.name.clone());
        current = node.parent;
    }
    Ok(segments.into_iter().rev().join("/"))
}
