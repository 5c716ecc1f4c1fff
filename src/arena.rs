use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};

/// The two component kinds of the tree.
///
/// A `File` is terminal and never holds children; a `Folder` owns an
/// ordered child sequence. Both are traversed through the same walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Terminal component with a payload size in bytes
    File { size: u64 },
    /// Container component holding zero or more children
    Folder,
}

impl NodeKind {
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File { .. })
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, NodeKind::Folder)
    }
}

/// Data payload for tree nodes: a display name plus the component kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub name: String,
    pub kind: NodeKind,
}

impl NodeData {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File { size },
        }
    }

    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Folder,
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Component data for this node
    pub data: NodeData,
    /// Index of the owning folder, None for detached (root) nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based component tree.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// lookups. A node's identity is its generational `Index`: two files with
/// the same name and size are still distinct components, so attach and
/// detach operations can never mis-target a lookalike sibling.
///
/// The tree does not track a root. Callers hold the `Index` of whatever
/// component they treat as a root and hand it to the traversal functions.
#[derive(Debug, Default)]
pub struct FsTree {
    arena: Arena<TreeNode>,
}

impl FsTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Creates a detached node. Attach it with [`FsTree::add_child`].
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData) -> Index {
        self.arena.insert(TreeNode {
            data,
            parent: None,
            children: Vec::new(),
        })
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Appends `child` to the end of `parent`'s child sequence.
    ///
    /// Fails when either handle is stale (`NodeNotFound`), the parent is a
    /// file (`NotAFolder`), the child is already owned by some folder
    /// (`AlreadyAttached`), or the attach would make a node its own
    /// ancestor (`CycleDetected`).
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, parent: Index, child: Index) -> TreeResult<()> {
        let (parent_name, parent_is_folder) = {
            let node = self.arena.get(parent).ok_or(TreeError::NodeNotFound)?;
            (node.data.name.clone(), node.data.kind.is_folder())
        };
        let (child_name, current_owner) = {
            let node = self.arena.get(child).ok_or(TreeError::NodeNotFound)?;
            (node.data.name.clone(), node.parent)
        };

        if !parent_is_folder {
            return Err(TreeError::NotAFolder(parent_name));
        }
        if let Some(owner) = current_owner {
            return Err(TreeError::AlreadyAttached {
                parent: self.name_of(owner),
                child: child_name,
            });
        }

        // The child is detached, so a cycle can only arise when the parent
        // already sits inside the child's subtree. Walking up from the
        // parent reaches the child exactly in that case (and catches
        // parent == child).
        let mut ancestor = Some(parent);
        while let Some(idx) = ancestor {
            if idx == child {
                return Err(TreeError::CycleDetected {
                    parent: parent_name,
                    child: child_name,
                });
            }
            ancestor = self.arena.get(idx).and_then(|node| node.parent);
        }

        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Detaches exactly the child with this `Index` from `parent`.
    ///
    /// The relative order of the remaining children is preserved and the
    /// detached child stays alive as an orphan, so it can be re-attached.
    /// When the component is not among the parent's current children the
    /// sequence is left unmodified and `ChildNotFound` names both the
    /// container and the component.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, parent: Index, child: Index) -> TreeResult<()> {
        let (parent_name, position) = {
            let node = self.arena.get(parent).ok_or(TreeError::NodeNotFound)?;
            (
                node.data.name.clone(),
                node.children.iter().position(|&idx| idx == child),
            )
        };
        let child_name = {
            let node = self.arena.get(child).ok_or(TreeError::NodeNotFound)?;
            node.data.name.clone()
        };

        let position = match position {
            Some(position) => position,
            None => {
                return Err(TreeError::ChildNotFound {
                    parent: parent_name,
                    child: child_name,
                });
            }
        };

        if let Some(node) = self.arena.get_mut(parent) {
            node.children.remove(position);
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = None;
        }
        Ok(())
    }

    /// Frees the whole subtree rooted at `idx`, children before parents.
    ///
    /// The node is detached from its owner first when it is attached.
    /// Returns the number of nodes freed; their handles become stale and
    /// later uses fail with `NodeNotFound`.
    #[instrument(level = "debug", skip(self))]
    pub fn release(&mut self, idx: Index) -> TreeResult<usize> {
        let owner = {
            let node = self.arena.get(idx).ok_or(TreeError::NodeNotFound)?;
            node.parent
        };
        if let Some(parent_idx) = owner {
            self.remove_child(parent_idx, idx)?;
        }

        let doomed: Vec<Index> = self
            .iter_postorder(idx)
            .map(|(node_idx, _)| node_idx)
            .collect();
        let mut freed = 0;
        for node_idx in doomed {
            if self.arena.remove(node_idx).is_some() {
                freed += 1;
            }
        }
        Ok(freed)
    }

    /// Depth-first pre-order walk over the subtree rooted at `start`.
    ///
    /// A folder is visited before any of its children and children are
    /// visited strictly in insertion order. The walk uses an explicit
    /// stack, so pathologically deep trees cannot exhaust the call stack.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self, start: Index) -> TreeIterator {
        TreeIterator::new(self, start)
    }

    /// Post-order variant of [`FsTree::iter`]: children before parents.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self, start: Index) -> PostOrderIterator {
        PostOrderIterator::new(self, start)
    }

    /// Number of levels in the subtree rooted at `start` (a lone node is 1).
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, start: Index) -> usize {
        let mut max_depth = 0;
        let mut stack = Vec::new();
        if self.arena.get(start).is_some() {
            stack.push((start, 1));
        }
        while let Some((idx, level)) = stack.pop() {
            max_depth = max_depth.max(level);
            if let Some(node) = self.arena.get(idx) {
                for &child in &node.children {
                    stack.push((child, level + 1));
                }
            }
        }
        max_depth
    }

    fn name_of(&self, idx: Index) -> String {
        self.arena
            .get(idx)
            .map(|node| node.data.name.clone())
            .unwrap_or_else(|| "<freed>".to_string())
    }
}

pub struct TreeIterator<'a> {
    tree: &'a FsTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a FsTree, start: Index) -> Self {
        let mut stack = Vec::new();
        if tree.get_node(start).is_some() {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a FsTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a FsTree, start: Index) -> Self {
        let mut stack = Vec::new();
        if tree.get_node(start).is_some() {
            stack.push((start, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
