//! Tests for FsTree structure and mutation invariants

use generational_arena::Index;

use fstree::arena::{FsTree, NodeData};
use fstree::errors::TreeError;

fn child_names(tree: &FsTree, parent: Index) -> Vec<String> {
    tree.get_node(parent)
        .map(|node| {
            node.children
                .iter()
                .map(|&child| tree.get_node(child).unwrap().data.name.clone())
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================
// Attach Tests
// ============================================================

#[test]
fn given_detached_nodes_when_adding_then_children_follow_insertion_order() {
    let mut tree = FsTree::new();
    let folder = tree.insert_node(NodeData::folder("docs"));
    let a = tree.insert_node(NodeData::file("a.txt", 1));
    let b = tree.insert_node(NodeData::file("b.txt", 2));
    let c = tree.insert_node(NodeData::file("c.txt", 3));

    tree.add_child(folder, a).unwrap();
    tree.add_child(folder, b).unwrap();
    tree.add_child(folder, c).unwrap();

    assert_eq!(child_names(&tree, folder), vec!["a.txt", "b.txt", "c.txt"]);
    for idx in [a, b, c] {
        assert_eq!(tree.get_node(idx).unwrap().parent, Some(folder));
    }
}

#[test]
fn given_attached_child_when_adding_elsewhere_then_already_attached() {
    let mut tree = FsTree::new();
    let first = tree.insert_node(NodeData::folder("first"));
    let second = tree.insert_node(NodeData::folder("second"));
    let file = tree.insert_node(NodeData::file("shared.txt", 0));
    tree.add_child(first, file).unwrap();

    let result = tree.add_child(second, file);

    match result {
        Err(TreeError::AlreadyAttached { parent, child }) => {
            assert_eq!(parent, "first");
            assert_eq!(child, "shared.txt");
        }
        other => panic!("expected AlreadyAttached, got {other:?}"),
    }
    assert!(child_names(&tree, second).is_empty());
    assert_eq!(child_names(&tree, first), vec!["shared.txt"]);
}

#[test]
fn given_file_parent_when_adding_then_not_a_folder() {
    let mut tree = FsTree::new();
    let file = tree.insert_node(NodeData::file("a.txt", 0));
    let other = tree.insert_node(NodeData::file("b.txt", 0));

    let result = tree.add_child(file, other);

    match result {
        Err(TreeError::NotAFolder(name)) => assert_eq!(name, "a.txt"),
        other => panic!("expected NotAFolder, got {other:?}"),
    }
}

#[test]
fn given_subtree_containing_parent_when_attaching_its_root_then_cycle_detected() {
    let mut tree = FsTree::new();
    let outer = tree.insert_node(NodeData::folder("outer"));
    let inner = tree.insert_node(NodeData::folder("inner"));
    tree.add_child(outer, inner).unwrap();

    // outer is detached, but adopting it under inner would close a loop
    let result = tree.add_child(inner, outer);

    assert!(matches!(result, Err(TreeError::CycleDetected { .. })));
    assert!(child_names(&tree, inner).is_empty());
}

#[test]
fn given_folder_when_attaching_to_itself_then_cycle_detected() {
    let mut tree = FsTree::new();
    let folder = tree.insert_node(NodeData::folder("loop"));

    assert!(matches!(
        tree.add_child(folder, folder),
        Err(TreeError::CycleDetected { .. })
    ));
}

#[test]
fn given_stale_handle_when_adding_then_node_not_found() {
    let mut tree = FsTree::new();
    let folder = tree.insert_node(NodeData::folder("docs"));
    let gone = tree.insert_node(NodeData::file("gone.txt", 0));
    tree.release(gone).unwrap();

    assert!(matches!(
        tree.add_child(folder, gone),
        Err(TreeError::NodeNotFound)
    ));
}

// ============================================================
// Detach Tests
// ============================================================

#[test]
fn given_middle_child_when_removing_then_remaining_order_preserved() {
    let mut tree = FsTree::new();
    let folder = tree.insert_node(NodeData::folder("docs"));
    let a = tree.insert_node(NodeData::file("a.txt", 0));
    let b = tree.insert_node(NodeData::file("b.txt", 0));
    let c = tree.insert_node(NodeData::file("c.txt", 0));
    tree.add_child(folder, a).unwrap();
    tree.add_child(folder, b).unwrap();
    tree.add_child(folder, c).unwrap();

    tree.remove_child(folder, b).unwrap();

    assert_eq!(child_names(&tree, folder), vec!["a.txt", "c.txt"]);
    // The detached child is an orphan, not freed
    let orphan = tree.get_node(b).expect("orphan should stay alive");
    assert_eq!(orphan.parent, None);
}

#[test]
fn given_add_then_remove_when_round_tripping_then_sequence_restored() {
    let mut tree = FsTree::new();
    let folder = tree.insert_node(NodeData::folder("docs"));
    let a = tree.insert_node(NodeData::file("a.txt", 0));
    let b = tree.insert_node(NodeData::file("b.txt", 0));
    tree.add_child(folder, a).unwrap();
    tree.add_child(folder, b).unwrap();
    let before = child_names(&tree, folder);

    let extra = tree.insert_node(NodeData::file("extra.txt", 0));
    tree.add_child(folder, extra).unwrap();
    tree.remove_child(folder, extra).unwrap();

    assert_eq!(child_names(&tree, folder), before);

    // And the orphan can be adopted again
    tree.add_child(folder, extra).unwrap();
    assert_eq!(
        child_names(&tree, folder),
        vec!["a.txt", "b.txt", "extra.txt"]
    );
}

#[test]
fn given_absent_component_when_removing_then_child_not_found_and_unmodified() {
    let mut tree = FsTree::new();
    let folder = tree.insert_node(NodeData::folder("docs"));
    let a = tree.insert_node(NodeData::file("a.txt", 0));
    tree.add_child(folder, a).unwrap();
    let stranger = tree.insert_node(NodeData::file("stranger.txt", 0));

    let result = tree.remove_child(folder, stranger);

    match result {
        Err(TreeError::ChildNotFound { parent, child }) => {
            assert_eq!(parent, "docs");
            assert_eq!(child, "stranger.txt");
        }
        other => panic!("expected ChildNotFound, got {other:?}"),
    }
    assert_eq!(child_names(&tree, folder), vec!["a.txt"]);
}

#[test]
fn given_empty_folder_when_removing_then_child_not_found() {
    let mut tree = FsTree::new();
    let folder = tree.insert_node(NodeData::folder("empty"));
    let stray = tree.insert_node(NodeData::file("stray.txt", 0));

    assert!(matches!(
        tree.remove_child(folder, stray),
        Err(TreeError::ChildNotFound { .. })
    ));
}

#[test]
fn given_indistinguishable_siblings_when_removing_then_exact_instance_detached() {
    // Two files with identical name and size are still distinct components;
    // removal by handle can never hit the lookalike.
    let mut tree = FsTree::new();
    let folder = tree.insert_node(NodeData::folder("docs"));
    let twin_a = tree.insert_node(NodeData::file("copy.txt", 1));
    let twin_b = tree.insert_node(NodeData::file("copy.txt", 1));
    tree.add_child(folder, twin_a).unwrap();
    tree.add_child(folder, twin_b).unwrap();

    tree.remove_child(folder, twin_b).unwrap();

    let node = tree.get_node(folder).unwrap();
    assert_eq!(node.children, vec![twin_a]);
    assert_eq!(tree.get_node(twin_a).unwrap().parent, Some(folder));
    assert_eq!(tree.get_node(twin_b).unwrap().parent, None);
}

// ============================================================
// Release Tests
// ============================================================

#[test]
fn given_attached_subtree_when_releasing_then_freed_and_detached() {
    let mut tree = FsTree::new();
    let root = tree.insert_node(NodeData::folder("root"));
    let keep = tree.insert_node(NodeData::file("keep.txt", 0));
    let sub = tree.insert_node(NodeData::folder("sub"));
    let inner = tree.insert_node(NodeData::file("inner.txt", 0));
    tree.add_child(root, keep).unwrap();
    tree.add_child(root, sub).unwrap();
    tree.add_child(sub, inner).unwrap();

    let freed = tree.release(sub).unwrap();

    assert_eq!(freed, 2);
    assert_eq!(child_names(&tree, root), vec!["keep.txt"]);
    assert!(tree.get_node(sub).is_none());
    assert!(tree.get_node(inner).is_none());
    assert_eq!(tree.len(), 2);
}

#[test]
fn given_detached_tree_when_releasing_then_arena_drains() {
    let mut tree = FsTree::new();
    let root = tree.insert_node(NodeData::folder("root"));
    let file = tree.insert_node(NodeData::file("a.txt", 0));
    tree.add_child(root, file).unwrap();

    assert_eq!(tree.release(root).unwrap(), 2);
    assert!(tree.is_empty());
}

#[test]
fn given_stale_handle_when_releasing_then_node_not_found() {
    let mut tree = FsTree::new();
    let file = tree.insert_node(NodeData::file("a.txt", 0));
    tree.release(file).unwrap();

    assert!(matches!(tree.release(file), Err(TreeError::NodeNotFound)));
}

// ============================================================
// Depth Tests
// ============================================================

#[test]
fn given_single_node_when_measuring_depth_then_one() {
    let mut tree = FsTree::new();
    let lone = tree.insert_node(NodeData::file("lone.txt", 0));
    assert_eq!(tree.depth(lone), 1);
}

#[test]
fn given_nested_folders_when_measuring_depth_then_counts_levels() {
    let mut tree = FsTree::new();
    let root = tree.insert_node(NodeData::folder("root"));
    let mid = tree.insert_node(NodeData::folder("mid"));
    let leaf = tree.insert_node(NodeData::file("leaf.txt", 0));
    let shallow = tree.insert_node(NodeData::file("shallow.txt", 0));
    tree.add_child(root, mid).unwrap();
    tree.add_child(mid, leaf).unwrap();
    tree.add_child(root, shallow).unwrap();

    assert_eq!(tree.depth(root), 3);
    assert_eq!(tree.depth(mid), 2);
}
