use crate::arena::Arena;
use crate::avl_tree::node::Node;
use crate::node::{BinaryNode, HeightBalanced, Link, Side};
use crate::rotation::{rebalance, side_of, splice};
use crate::traversal::{extreme, find};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// Inserts `node` below `root` and restores the height invariant with at most one rotation.
/// Returns `false`, dropping `node`, if an equal key is already present.
///
/// The descent remembers the deepest node on the search path whose balance factor is non-zero,
/// or the root if there is none. Only the balance factors from that node down to the new leaf
/// change, and only that node can reach +-2. Works for both parent-linked and parentless nodes.
pub fn insert<N>(arena: &mut Arena<N>, root: &mut Link, mut node: N) -> bool
where
    N: HeightBalanced,
    N::Key: Ord,
{
    let mut curr = match *root {
        Some(root) => root,
        None => {
            *root = Some(arena.allocate(node));
            return true;
        },
    };
    let mut top = curr;
    let mut top_parent = None;
    let leaf = loop {
        let side = match node.key().cmp(arena[curr].key()) {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => return false,
        };
        match arena[curr].child(side) {
            Some(next) => {
                if arena[next].balance() != 0 {
                    top = next;
                    top_parent = Some(curr);
                }
                curr = next;
            },
            None => {
                node.set_parent(Some(curr));
                let leaf = arena.allocate(node);
                arena[curr].set_child(side, Some(leaf));
                break leaf;
            },
        }
    };

    let mut curr = top;
    while curr != leaf {
        let side = if arena[leaf].key() < arena[curr].key() {
            Side::Left
        } else {
            Side::Right
        };
        let balance = arena[curr].balance() + side.sign();
        arena[curr].set_balance(balance);
        curr = arena[curr]
            .child(side)
            .expect("Expected the search path to reach the new leaf.");
    }

    if arena[top].balance().abs() == 2 {
        let subtree = rebalance(arena, top);
        splice(arena, root, top_parent, top, Some(subtree));
    }
    true
}

/// Removes the node holding `key` and returns its key.
///
/// A node with two children takes the key of its in-order successor, and the successor is the
/// node that is unlinked. Balance factors are then retraced through parent links, rotating at
/// every ancestor that reaches +-2, until a subtree height is known not to have changed.
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
    let mut side = parent.map_or(Side::Left, |parent| side_of(arena, parent, removed));
    if let Some(child) = child {
        arena[child].parent = parent;
    }
    splice(arena, root, parent, removed, child);

    let mut key = arena.free(removed).key;
    if removed != target {
        mem::swap(&mut arena[target].key, &mut key);
    }

    let mut curr = parent;
    while let Some(node) = curr {
        let balance = arena[node].balance - side.sign();
        arena[node].balance = balance;
        let grandparent = arena[node].parent;
        let grandparent_side = grandparent.map_or(Side::Left, |g| side_of(arena, g, node));
        if balance.abs() == 1 {
            break;
        }
        if balance.abs() == 2 {
            let heavy = if balance < 0 { Side::Left } else { Side::Right };
            let heavy_child = arena[node]
                .child(heavy)
                .expect("Expected a child on the heavy side.");
            let heavy_child_balance = arena[heavy_child].balance;
            let subtree = rebalance(arena, node);
            splice(arena, root, grandparent, node, Some(subtree));
            // the rotated subtree kept its height
            if heavy_child_balance == 0 {
                break;
            }
        }
        curr = grandparent;
        side = grandparent_side;
    }
    Some(key)
}
