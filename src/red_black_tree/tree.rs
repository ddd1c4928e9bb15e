use crate::arena::{Arena, Handle};
use crate::error::ValidationError;
use crate::node::{BinaryNode, Link, Side};
use crate::red_black_tree::node::{is_red, Color, Node};
use crate::rotation::{double_rotate, rotate, side_of, splice};
use crate::traversal::{extreme, find};
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// Attaches `key` as a red leaf and repairs red-red edges on the way up. Returns `false` if an
/// equal key is already present.
pub fn insert<T>(arena: &mut Arena<Node<T>>, root: &mut Link, key: T) -> bool
where
    T: Ord,
{
    let mut parent = None;
    let mut side = Side::Left;
    let mut link = *root;
    while let Some(curr) = link {
        side = match key.cmp(&arena[curr].key) {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => return false,
        };
        parent = Some(curr);
        link = arena[curr].child(side);
    }

    let node = arena.allocate(Node::new(key, parent));
    match parent {
        Some(parent) => arena[parent].set_child(side, Some(node)),
        None => *root = Some(node),
    }
    insert_fixup(arena, root, node);
    true
}

fn insert_fixup<T>(arena: &mut Arena<Node<T>>, root: &mut Link, mut node: Handle) {
    loop {
        let parent = match arena[node].parent {
            Some(parent) if arena[parent].color == Color::Red => parent,
            _ => break,
        };
        let grandparent = arena[parent]
            .parent
            .expect("Expected a red node to have a parent.");
        let parent_side = side_of(arena, grandparent, parent);
        let uncle = arena[grandparent].child(parent_side.opposite());

        if let Some(uncle) = uncle {
            if arena[uncle].color == Color::Red {
                trace!("insert fixup: red uncle at {:?}", uncle);
                arena[parent].color = Color::Black;
                arena[uncle].color = Color::Black;
                arena[grandparent].color = Color::Red;
                node = grandparent;
                continue;
            }
        }

        let great_grandparent = arena[grandparent].parent;
        let subtree = if side_of(arena, parent, node) == parent_side {
            trace!("insert fixup: outer grandchild {:?}", node);
            arena[parent].color = Color::Black;
            rotate(arena, grandparent, parent_side.opposite())
        } else {
            trace!("insert fixup: inner grandchild {:?}", node);
            arena[node].color = Color::Black;
            double_rotate(arena, grandparent, parent_side.opposite())
        };
        arena[grandparent].color = Color::Red;
        splice(arena, root, great_grandparent, grandparent, Some(subtree));
        break;
    }

    if let Some(root) = *root {
        arena[root].color = Color::Black;
    }
}

/// Removes the node holding `key` and returns its key.
///
/// A node with two children takes the key of its in-order successor and keeps its own color;
/// the successor is the node that is unlinked. When the unlinked node was black, the fixup
/// starts from the child that took its place, which may be absent, so its parent is tracked
/// alongside it.
pub fn remove<T, Q>(arena: &mut Arena<Node<T>>, root: &mut Link, key: &Q) -> Option<T>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let target = find(arena, *root, key)?;
    let removed = match (arena[target].left, arena[target].right) {
        (Some(_), Some(right)) => extreme(arena, right, Side::Left),
        _ => target,
    };
    let child = arena[removed].left.or(arena[removed].right);
    let parent = arena[removed].parent;
    if let Some(child) = child {
        arena[child].parent = parent;
    }
    splice(arena, root, parent, removed, child);

    let Node { mut key, color, .. } = arena.free(removed);
    if removed != target {
        mem::swap(&mut arena[target].key, &mut key);
    }
    if color == Color::Black {
        remove_fixup(arena, root, child, parent);
    }
    Some(key)
}

fn remove_fixup<T>(
    arena: &mut Arena<Node<T>>,
    root: &mut Link,
    mut node: Link,
    mut parent: Link,
) {
    while node != *root && !is_red(arena, node) {
        let curr_parent = parent.expect("Expected a non-root node to have a parent.");
        let side = if arena[curr_parent].left == node {
            Side::Left
        } else {
            Side::Right
        };
        let far = side.opposite();
        let mut sibling = arena[curr_parent]
            .child(far)
            .expect("Expected a doubly black node to have a sibling.");

        if arena[sibling].color == Color::Red {
            trace!("remove fixup: red sibling {:?}", sibling);
            arena[sibling].color = Color::Black;
            arena[curr_parent].color = Color::Red;
            let great = arena[curr_parent].parent;
            let subtree = rotate(arena, curr_parent, side);
            splice(arena, root, great, curr_parent, Some(subtree));
            sibling = arena[curr_parent]
                .child(far)
                .expect("Expected a sibling after rotating the red sibling up.");
        }

        let near_red = is_red(arena, arena[sibling].child(side));
        let far_red = is_red(arena, arena[sibling].child(far));
        if !near_red && !far_red {
            trace!("remove fixup: black nephews under {:?}", sibling);
            arena[sibling].color = Color::Red;
            node = Some(curr_parent);
            parent = arena[curr_parent].parent;
            continue;
        }

        if !far_red {
            trace!("remove fixup: red near nephew under {:?}", sibling);
            let near = arena[sibling]
                .child(side)
                .expect("Expected a red near nephew.");
            arena[near].color = Color::Black;
            arena[sibling].color = Color::Red;
            let subtree = rotate(arena, sibling, far);
            arena[curr_parent].set_child(far, Some(subtree));
            sibling = subtree;
        }

        trace!("remove fixup: red far nephew under {:?}", sibling);
        arena[sibling].color = arena[curr_parent].color;
        arena[curr_parent].color = Color::Black;
        if let Some(far_nephew) = arena[sibling].child(far) {
            arena[far_nephew].color = Color::Black;
        }
        let great = arena[curr_parent].parent;
        let subtree = rotate(arena, curr_parent, side);
        splice(arena, root, great, curr_parent, Some(subtree));
        node = *root;
        break;
    }

    if let Some(node) = node {
        arena[node].color = Color::Black;
    }
}

/// Checks the coloring rules along a post-order traversal: the root is black, no red node has
/// a red child, and both subtrees of every node hold the same number of black nodes on any
/// path down to an absent child.
pub fn check_colors<T, I>(
    arena: &Arena<Node<T>>,
    root: Link,
    postorder: I,
) -> Result<(), ValidationError>
where
    I: Iterator<Item = Handle>,
{
    if let Some(root) = root {
        if arena[root].color == Color::Red {
            return Err(ValidationError::RedRoot { node: root.index() });
        }
    }

    let mut black_heights = vec![0usize; arena.slots()];
    for handle in postorder {
        let node = &arena[handle];
        if node.color == Color::Red && (is_red(arena, node.left) || is_red(arena, node.right)) {
            return Err(ValidationError::RedViolation {
                node: handle.index(),
            });
        }
        let left = node.left.map_or(1, |child| black_heights[child.index()]);
        let right = node.right.map_or(1, |child| black_heights[child.index()]);
        if left != right {
            return Err(ValidationError::BlackHeightMismatch {
                node: handle.index(),
                left,
                right,
            });
        }
        black_heights[handle.index()] = match node.color {
            Color::Black => left + 1,
            Color::Red => left,
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{insert, remove};
    use crate::arena::Arena;
    use crate::node::Link;
    use crate::red_black_tree::node::{Color, Node};

    fn build(keys: &[u32]) -> (Arena<Node<u32>>, Link) {
        let mut arena = Arena::new();
        let mut root = None;
        for key in keys {
            insert(&mut arena, &mut root, *key);
        }
        (arena, root)
    }

    #[test]
    fn test_insert_recolors_red_uncle() {
        let (arena, root) = build(&[2, 1, 3, 4]);
        let root = root.unwrap();
        let left = arena[root].left.unwrap();
        let right = arena[root].right.unwrap();
        let grandchild = arena[right].right.unwrap();
        assert_eq!(arena[root].color, Color::Black);
        assert_eq!(arena[left].color, Color::Black);
        assert_eq!(arena[right].color, Color::Black);
        assert_eq!(arena[grandchild].color, Color::Red);
    }

    #[test]
    fn test_insert_rotates_inner_grandchild() {
        let (arena, root) = build(&[3, 1, 2]);
        let root = root.unwrap();
        assert_eq!(arena[root].key, 2);
        assert_eq!(arena[root].color, Color::Black);
        assert_eq!(arena[root].parent, None);
        let left = arena[root].left.unwrap();
        let right = arena[root].right.unwrap();
        assert_eq!(arena[left].color, Color::Red);
        assert_eq!(arena[right].color, Color::Red);
    }

    #[test]
    fn test_remove_black_leaf_borrows_from_sibling() {
        let (mut arena, mut root) = build(&[2, 1, 3, 4]);
        assert_eq!(remove(&mut arena, &mut root, &1), Some(1));
        let root = root.unwrap();
        assert_eq!(arena[root].key, 3);
        assert_eq!(arena[root].color, Color::Black);
        let left = arena[root].left.unwrap();
        let right = arena[root].right.unwrap();
        assert_eq!(arena[left].key, 2);
        assert_eq!(arena[right].key, 4);
        assert_eq!(arena[left].color, Color::Black);
        assert_eq!(arena[right].color, Color::Black);
    }

    #[test]
    fn test_remove_missing() {
        let (mut arena, mut root) = build(&[2, 1, 3]);
        assert_eq!(remove(&mut arena, &mut root, &4), None);
        assert_eq!(arena.len(), 3);
    }
}
