//! termtree conversion for human-friendly display of a subtree.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::arena::{FsTree, NodeData, NodeKind};
use crate::errors::{TreeError, TreeResult};

/// Converts the subtree rooted at `start` into a `termtree::Tree` whose
/// `Display` output is the familiar box-drawing listing.
///
/// Folders are labelled `name/`, files `name (N B)`. The conversion is
/// recursive because termtree nesting is itself recursive; rendered trees
/// are human-scale.
#[instrument(level = "debug", skip(tree))]
pub fn to_tree_string(tree: &FsTree, start: Index) -> TreeResult<Tree<String>> {
    let node = tree.get_node(start).ok_or(TreeError::NodeNotFound)?;
    let mut rendered = Tree::new(label(&node.data));
    build_subtree(tree, start, &mut rendered)?;
    Ok(rendered)
}

fn label(data: &NodeData) -> String {
    match data.kind {
        NodeKind::Folder => format!("{}/", data.name),
        NodeKind::File { size } => format!("{} ({} B)", data.name, size),
    }
}

fn build_subtree(tree: &FsTree, idx: Index, parent_tree: &mut Tree<String>) -> TreeResult<()> {
    let node = tree.get_node(idx).ok_or(TreeError::NodeNotFound)?;
    for &child_idx in &node.children {
        let child = tree.get_node(child_idx).ok_or(TreeError::NodeNotFound)?;
        let mut child_tree = Tree::new(label(&child.data));
        build_subtree(tree, child_idx, &mut child_tree)?;
        parent_tree.push(child_tree);
    }
    Ok(())
}
