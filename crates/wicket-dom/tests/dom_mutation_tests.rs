//! Tests for DOM tree mutation: `remove_child`, `insert_before`, `move_children`,
//! and reparenting through `append_child`.

use wicket_dom::{DomTree, ElementData, Namespace, NodeId, NodeType};

/// Helper to create an HTML element node and return its `NodeId`.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(Namespace::Html, tag)))
}

/// Helper: a `div` under the document with children `names`.
fn parent_with(tree: &mut DomTree, names: &[&str]) -> (NodeId, Vec<NodeId>) {
    let parent = alloc_element(tree, "div");
    tree.append_child(NodeId::ROOT, parent);
    let children = names
        .iter()
        .map(|name| {
            let id = alloc_element(tree, name);
            tree.append_child(parent, id);
            id
        })
        .collect();
    (parent, children)
}

// ========== remove_child ==========

#[test]
fn test_remove_only_child() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["p"]);

    tree.remove_child(parent, kids[0]);

    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(kids[0]), None);
    assert_eq!(tree.prev_sibling(kids[0]), None);
    assert_eq!(tree.next_sibling(kids[0]), None);
}

#[test]
fn test_remove_first_middle_last() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["a", "b", "c", "d"]);
    let [a, b, c, d] = [kids[0], kids[1], kids[2], kids[3]];

    tree.remove_child(parent, a);
    assert_eq!(tree.children(parent), &[b, c, d]);
    assert_eq!(tree.prev_sibling(b), None);

    tree.remove_child(parent, c);
    assert_eq!(tree.children(parent), &[b, d]);
    assert_eq!(tree.next_sibling(b), Some(d));
    assert_eq!(tree.prev_sibling(d), Some(b));

    tree.remove_child(parent, d);
    assert_eq!(tree.children(parent), &[b]);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_remove_child_of_other_parent_is_noop() {
    let mut tree = DomTree::new();
    let (first, kids) = parent_with(&mut tree, &["span"]);
    let (other, _) = parent_with(&mut tree, &[]);

    tree.remove_child(other, kids[0]);

    assert_eq!(tree.parent(kids[0]), Some(first));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["b"]);
    let existing = kids[0];

    let new_child = alloc_element(&mut tree, "a");
    tree.insert_before(parent, new_child, existing);

    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_middle_links_both_sides() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["a", "c"]);
    let (a, c) = (kids[0], kids[1]);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
}

#[test]
fn test_insert_before_foreign_reference_appends() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["a"]);
    let (_, elsewhere) = parent_with(&mut tree, &["z"]);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, elsewhere[0]);

    assert_eq!(tree.children(parent), &[kids[0], b]);
}

// ========== reparenting ==========

#[test]
fn test_append_child_moves_node_between_parents() {
    let mut tree = DomTree::new();
    let (from, kids) = parent_with(&mut tree, &["a", "b", "c"]);
    let (to, _) = parent_with(&mut tree, &[]);

    tree.append_child(to, kids[1]);

    assert_eq!(tree.children(from), &[kids[0], kids[2]]);
    assert_eq!(tree.next_sibling(kids[0]), Some(kids[2]));
    assert_eq!(tree.children(to), &[kids[1]]);
    assert_eq!(tree.parent(kids[1]), Some(to));
    assert_eq!(tree.prev_sibling(kids[1]), None);
}

// ========== move_children ==========

#[test]
fn test_move_children_appends_to_existing() {
    let mut tree = DomTree::new();
    let (from, moved) = parent_with(&mut tree, &["x", "y"]);
    let (to, existing) = parent_with(&mut tree, &["w"]);

    tree.move_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing[0], moved[0], moved[1]]);
    assert_eq!(tree.next_sibling(existing[0]), Some(moved[0]));
    assert_eq!(tree.prev_sibling(moved[0]), Some(existing[0]));
}

#[test]
fn test_move_children_empty_source() {
    let mut tree = DomTree::new();
    let (from, _) = parent_with(&mut tree, &[]);
    let (to, _) = parent_with(&mut tree, &[]);

    tree.move_children(from, to);

    assert!(tree.children(to).is_empty());
}
